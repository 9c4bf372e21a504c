//! Example stage.
//!
//! Registers the assets listed in the configured manifest, then animates a
//! sprite and a camera with a patrol sequence that re-spawns itself forever:
//! wait, walk the sprite to a random point, turn the camera a quarter turn.
//!
//! Keys: Escape quits, F11 toggles the fullscreen flag, P pauses.

use crate::actions::{AngleAction, ExecuteAction, MoveAction, SequenceAction, WaitAction};
use crate::assets::font::BitmapFont;
use crate::components::angle::Angle;
use crate::components::position::Position;
use crate::events::{Key, KeyAction, StageEvent};
use crate::resources::actionengine::{ActionEngine, ActionSpawner};
use crate::resources::appstate::AppState;
use crate::resources::assetmanifest::AssetManifest;
use crate::resources::fontstore::FontStore;
use crate::resources::fpscounter::FpsCounter;
use crate::resources::gameconfig::GameConfig;
use crate::resources::musicstore::MusicStore;
use crate::resources::worldtime::WorldTime;
use crate::stage::{Stage, StageError};
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info, warn};
use std::cell::Cell;
use std::rc::Rc;

pub const HUD_FONT: &str = "bitmap-test";
pub const THEME_MUSIC: &str = "theme";

const PATROL_PAUSE_MS: u64 = 500;
const SPRITE_SPEED: f32 = 200.0;
const FPS_LOG_PERIOD_MS: u64 = 1000;

pub struct ExampleStage {
    sprite: Rc<Cell<Vec2>>,
    yaw: Rc<Cell<Angle>>,
    sprite_entity: Option<Entity>,
    camera_entity: Option<Entity>,
    hud_font: Option<Rc<BitmapFont>>,
    last_fps_log_ms: u64,
}

impl Default for ExampleStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ExampleStage {
    pub fn new() -> Self {
        ExampleStage {
            sprite: Rc::new(Cell::new(Vec2::ZERO)),
            yaw: Rc::new(Cell::new(Angle::from_degrees(180.0))),
            sprite_entity: None,
            camera_entity: None,
            hud_font: None,
            last_fps_log_ms: 0,
        }
    }

    pub fn sprite_position(&self) -> Vec2 {
        self.sprite.get()
    }

    pub fn camera_yaw(&self) -> Angle {
        self.yaw.get()
    }

    fn load_assets(&mut self, world: &mut World) -> Result<(), StageError> {
        let manifest_path = world.resource::<GameConfig>().manifest_path.clone();
        if manifest_path.is_file() {
            AssetManifest::load_from_file(&manifest_path)?.apply(world)?;
        } else {
            warn!(
                "Asset manifest {} not found, starting without assets",
                manifest_path.display()
            );
        }

        {
            let mut fonts = world.non_send_resource_mut::<FontStore>();
            if fonts.contains(HUD_FONT) {
                match fonts.get(HUD_FONT) {
                    Ok(font) => self.hud_font = Some(font),
                    Err(e) => warn!("HUD font unavailable: {e}"),
                }
            }
        }

        let mut music = world.non_send_resource_mut::<MusicStore>();
        if music.contains(THEME_MUSIC) {
            match music.get(THEME_MUSIC) {
                Ok(theme) => theme.play(),
                Err(e) => warn!("Theme music unavailable: {e}"),
            }
        }
        Ok(())
    }
}

/// One patrol lap. The last step queues the next lap.
fn patrol(
    spawner: ActionSpawner,
    sprite: Rc<Cell<Vec2>>,
    yaw: Rc<Cell<Angle>>,
    area: Vec2,
) -> SequenceAction {
    let target = Vec2::new(fastrand::f32() * area.x, fastrand::f32() * area.y);
    let yaw_target = yaw.get() + Angle::from_degrees(90.0);
    let next = (Rc::clone(&sprite), Rc::clone(&yaw));
    SequenceAction::new()
        .with(WaitAction::new(PATROL_PAUSE_MS))
        .with(MoveAction::new(sprite, target, SPRITE_SPEED))
        .with(AngleAction::new(yaw, yaw_target, Angle::from_degrees(45.0)))
        .with(ExecuteAction::new(move || {
            debug!("patrol lap done, heading to a new point");
            let (sprite, yaw) = next;
            spawner.spawn(patrol(spawner.clone(), sprite, yaw, area));
        }))
}

impl Stage for ExampleStage {
    fn initialize(&mut self, world: &mut World) -> Result<(), StageError> {
        info!("ExampleStage initialize");
        self.load_assets(world)?;

        let (width, height) = world.resource::<GameConfig>().window_size();
        let area = Vec2::new(width as f32, height as f32);
        self.sprite.set(area * 0.5);

        self.sprite_entity = Some(world.spawn(Position(self.sprite.get())).id());
        self.camera_entity = Some(world.spawn(self.yaw.get()).id());

        let mut engine = world.non_send_resource_mut::<ActionEngine>();
        let lap = patrol(
            engine.spawner(),
            Rc::clone(&self.sprite),
            Rc::clone(&self.yaw),
            area,
        );
        engine.add(lap);
        Ok(())
    }

    fn release(&mut self, world: &mut World) {
        info!("ExampleStage release");
        world.non_send_resource_mut::<ActionEngine>().clear();
        for entity in [self.sprite_entity.take(), self.camera_entity.take()]
            .into_iter()
            .flatten()
        {
            world.despawn(entity);
        }
        if self.hud_font.take().is_some() {
            world.non_send_resource_mut::<FontStore>().release(HUD_FONT);
        }
    }

    fn execute(&mut self, world: &mut World) {
        if let Some(entity) = self.sprite_entity {
            if let Some(mut position) = world.get_mut::<Position>(entity) {
                position.0 = self.sprite.get();
            }
        }
        if let Some(entity) = self.camera_entity {
            if let Some(mut angle) = world.get_mut::<Angle>(entity) {
                *angle = self.yaw.get().mod_360();
            }
        }
    }

    fn display(&mut self, world: &mut World) {
        let now = world.resource::<WorldTime>().elapsed_ms;
        let fps = world.resource::<FpsCounter>().fps();
        if now.saturating_sub(self.last_fps_log_ms) >= FPS_LOG_PERIOD_MS {
            info!("FPS: {:.2}", fps);
            self.last_fps_log_ms = now;
        }
        if let Some(font) = &self.hud_font {
            let text = format!("FPS: {:.2}", fps);
            debug!("HUD '{}' is {} px wide", text, font.text_width(&text));
        }
    }

    fn process_event(&mut self, world: &mut World, event: &StageEvent) {
        match event {
            StageEvent::Keyboard {
                key,
                action: KeyAction::Press,
            } => match key {
                Key::Escape => {
                    info!("Escape pressed, stopping");
                    world.resource_mut::<AppState>().stop();
                }
                Key::F11 => {
                    let mut config = world.resource_mut::<GameConfig>();
                    config.fullscreen = !config.fullscreen;
                    info!("Fullscreen {}", if config.fullscreen { "enabled" } else { "disabled" });
                }
                Key::Char('p') | Key::Char('P') => {
                    let mut state = world.resource_mut::<AppState>();
                    state.toggle_pause();
                    info!("Paused: {}", state.paused);
                }
                _ => {}
            },
            event if event.is_close_request() => {
                world.resource_mut::<AppState>().stop();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WindowEvent;

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(AppState::default());
        world.insert_resource(GameConfig::new());
        world
    }

    #[test]
    fn test_escape_stops() {
        let mut world = world();
        let mut stage = ExampleStage::new();
        stage.process_event(&mut world, &StageEvent::key_pressed(Key::Escape));
        assert!(world.resource::<AppState>().stopped);
    }

    #[test]
    fn test_f11_toggles_fullscreen_on_press_only() {
        let mut world = world();
        let mut stage = ExampleStage::new();
        stage.process_event(&mut world, &StageEvent::key_pressed(Key::F11));
        assert!(world.resource::<GameConfig>().fullscreen);
        stage.process_event(
            &mut world,
            &StageEvent::Keyboard {
                key: Key::F11,
                action: KeyAction::Release,
            },
        );
        assert!(world.resource::<GameConfig>().fullscreen);
    }

    #[test]
    fn test_close_and_pause() {
        let mut world = world();
        let mut stage = ExampleStage::new();
        stage.process_event(&mut world, &StageEvent::key_pressed(Key::Char('p')));
        assert!(world.resource::<AppState>().paused);
        stage.process_event(&mut world, &StageEvent::Window(WindowEvent::Closed));
        assert!(world.resource::<AppState>().stopped);
    }

    #[test]
    fn test_patrol_lap_respawns() {
        let mut engine = ActionEngine::new();
        let sprite = Rc::new(Cell::new(Vec2::ZERO));
        let yaw = Rc::new(Cell::new(Angle::ZERO));
        // A 1x1 area keeps the walk shorter than one frame
        engine.add(patrol(
            engine.spawner(),
            Rc::clone(&sprite),
            Rc::clone(&yaw),
            Vec2::ONE,
        ));
        // Wait ends, the walk snaps and the turn starts in the same frame
        engine.execute(PATROL_PAUSE_MS);
        engine.execute(1000);
        assert_eq!(engine.len(), 1);
        // Turn finishes and the next lap is queued
        engine.execute(2000);
        assert!(sprite.get().x <= 1.0 && sprite.get().y <= 1.0);
        assert_eq!(yaw.get(), Angle::from_degrees(90.0));
        assert_eq!(engine.len(), 1);
    }
}
