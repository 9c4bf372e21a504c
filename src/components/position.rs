use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space position of an entity.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position(pub Vec2);
