//! Application host.
//!
//! [`Application`] owns the ECS [`World`], the current [`Stage`], the
//! per-frame update schedule and the queue of pending [`StageEvent`]s.
//!
//! # World contents
//!
//! Resources: [`GameConfig`], [`WorldTime`], [`AppState`], [`FpsCounter`].
//! Non-send resources: [`ActionEngine`], [`TextureStore`], [`FontStore`],
//! [`SoundStore`], [`MusicStore`].
//!
//! # Frame
//!
//! 1. Advance [`WorldTime`] by the frame step (scaled by `time_scale`)
//! 2. [`Stage::execute`] unless paused
//! 3. Run the schedule: [`update_actions`] (unless paused), [`update_fps_counter`]
//! 4. [`Stage::display`]
//! 5. Drain the event queue into [`Stage::process_event`]
//!
//! [`run`](Application::run) loops frames from the wall clock until a stage
//! stops the application, then releases the stage and every asset store.
//! [`step`](Application::step) runs a single frame with a given step, which
//! makes the application deterministic under test.

use crate::events::{StageEvent, WindowEvent};
use crate::resources::actionengine::ActionEngine;
use crate::resources::appstate::AppState;
use crate::resources::fontstore::FontStore;
use crate::resources::fpscounter::FpsCounter;
use crate::resources::frameclock::FrameClock;
use crate::resources::gameconfig::GameConfig;
use crate::resources::musicstore::MusicStore;
use crate::resources::soundstore::SoundStore;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;
use crate::stage::{EmptyStage, Stage, StageError};
use crate::systems::actions::update_actions;
use crate::systems::appstate::app_not_paused;
use crate::systems::fps::update_fps_counter;
use crate::systems::time::update_world_time;
use bevy_ecs::prelude::*;
use log::{error, info, warn};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub struct Application {
    world: World,
    stage: Box<dyn Stage>,
    update: Schedule,
    events: VecDeque<StageEvent>,
}

impl Application {
    /// Build the world and schedule. The stage starts as an [`EmptyStage`].
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
        world.insert_resource(AppState::default());
        world.insert_resource(FpsCounter::new());
        world.insert_resource(config);
        world.insert_non_send_resource(ActionEngine::new());
        world.insert_non_send_resource(TextureStore::new());
        world.insert_non_send_resource(FontStore::new());
        world.insert_non_send_resource(SoundStore::new());
        world.insert_non_send_resource(MusicStore::new());

        let mut update = Schedule::default();
        update.add_systems(update_actions.run_if(app_not_paused));
        update.add_systems(update_fps_counter);

        Application {
            world,
            stage: Box::new(EmptyStage),
            update,
            events: VecDeque::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn is_launched(&self) -> bool {
        self.world.resource::<AppState>().launched
    }

    pub fn is_stopped(&self) -> bool {
        self.world.resource::<AppState>().stopped
    }

    pub fn stop(&mut self) {
        self.world.resource_mut::<AppState>().stop();
    }

    /// Replace the current stage.
    ///
    /// While launched, the old stage is released and the new one initialized
    /// right away; otherwise initialization waits for [`launch`](Self::launch).
    pub fn set_stage(&mut self, stage: impl Stage + 'static) -> Result<(), StageError> {
        let launched = self.is_launched();
        if launched {
            self.stage.release(&mut self.world);
        }
        self.stage = Box::new(stage);
        if launched {
            self.stage.initialize(&mut self.world)?;
        }
        Ok(())
    }

    /// Queue an event for the stage. Events are delivered at the end of the
    /// next frame, in order.
    pub fn push_event(&mut self, event: StageEvent) {
        self.events.push_back(event);
    }

    /// Mark the application launched and initialize the stage.
    ///
    /// Does nothing when already launched. On initialization failure the
    /// application is left not launched.
    pub fn launch(&mut self) -> Result<(), StageError> {
        if self.is_launched() {
            return Ok(());
        }
        {
            let mut state = self.world.resource_mut::<AppState>();
            state.launched = true;
            state.stopped = false;
        }
        info!("launching application");
        if let Err(e) = self.stage.initialize(&mut self.world) {
            error!("stage initialization failed: {e}");
            self.world.resource_mut::<AppState>().launched = false;
            return Err(e);
        }
        Ok(())
    }

    /// Run one frame with a step of `delta_ms` milliseconds, launching first
    /// if needed.
    pub fn step(&mut self, delta_ms: u64) -> Result<(), StageError> {
        self.launch()?;
        self.frame(delta_ms);
        Ok(())
    }

    /// Run frames until the stage stops the application.
    ///
    /// With `max_frames`, a [`WindowEvent::Closed`] is queued on the last
    /// frame; if the stage ignores it the loop stops anyway. Frames are
    /// paced to the configured `target_fps`.
    pub fn run(&mut self, max_frames: Option<u64>) -> Result<(), StageError> {
        if self.is_launched() {
            warn!("application is already launched");
            return Ok(());
        }
        self.launch()?;

        let budget = self
            .world
            .resource::<GameConfig>()
            .frame_budget_ms()
            .map(Duration::from_millis);
        let mut clock = FrameClock::new();
        let mut frames: u64 = 0;
        while !self.is_stopped() {
            if let Some(max) = max_frames {
                if frames >= max {
                    info!("frame limit {max} reached, stopping");
                    self.stop();
                    break;
                }
                if frames + 1 == max {
                    self.push_event(StageEvent::Window(WindowEvent::Closed));
                }
            }
            let frame_start = Instant::now();
            let dt = clock.tick();
            self.frame(dt);
            frames += 1;

            if let Some(budget) = budget {
                let spent = frame_start.elapsed();
                if spent < budget {
                    std::thread::sleep(budget - spent);
                }
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Release the stage and every asset payload.
    pub fn shutdown(&mut self) {
        if !self.is_launched() {
            return;
        }
        info!("shutting down application");
        self.stage.release(&mut self.world);
        self.world.non_send_resource_mut::<FontStore>().release_all();
        self.world.non_send_resource_mut::<TextureStore>().release_all();
        self.world.non_send_resource_mut::<SoundStore>().release_all();
        self.world.non_send_resource_mut::<MusicStore>().release_all();
        self.world.resource_mut::<AppState>().launched = false;
    }

    fn frame(&mut self, delta_ms: u64) {
        update_world_time(&mut self.world, delta_ms);

        if !self.world.resource::<AppState>().paused {
            self.stage.execute(&mut self.world);
        }
        self.update.run(&mut self.world);
        self.stage.display(&mut self.world);

        while let Some(event) = self.events.pop_front() {
            self.stage.process_event(&mut self.world, &event);
        }

        self.world.clear_trackers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::WaitAction;
    use crate::events::{ButtonAction, Key, MouseButton};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn test_config() -> GameConfig {
        GameConfig {
            target_fps: 0,
            ..GameConfig::new()
        }
    }

    /// Records the hooks it receives.
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Stage for Recorder {
        fn initialize(&mut self, _world: &mut World) -> Result<(), StageError> {
            self.log.borrow_mut().push("initialize".into());
            Ok(())
        }

        fn release(&mut self, _world: &mut World) {
            self.log.borrow_mut().push("release".into());
        }

        fn execute(&mut self, world: &mut World) {
            let delta = world.resource::<WorldTime>().delta_ms;
            self.log.borrow_mut().push(format!("execute {delta}"));
        }

        fn display(&mut self, _world: &mut World) {
            self.log.borrow_mut().push("display".into());
        }

        fn process_event(&mut self, world: &mut World, event: &StageEvent) {
            self.log.borrow_mut().push(format!("event {event:?}"));
            if event.is_close_request() {
                world.resource_mut::<AppState>().stop();
            }
        }
    }

    // ==== LIFECYCLE TESTS ====

    #[test]
    fn test_step_runs_hooks_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut app = Application::new(test_config());
        app.set_stage(Recorder { log: Rc::clone(&log) }).unwrap();
        app.push_event(StageEvent::key_pressed(Key::Space));
        app.step(16).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "initialize".to_string(),
                "execute 16".to_string(),
                "display".to_string(),
                format!("event {:?}", StageEvent::key_pressed(Key::Space)),
            ]
        );
    }

    #[test]
    fn test_events_are_delivered_in_queue_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut app = Application::new(test_config());
        app.set_stage(Recorder { log: Rc::clone(&log) }).unwrap();
        let events = [
            StageEvent::MouseMove {
                x: 4.0,
                y: 8.0,
                dx: 4.0,
                dy: 8.0,
            },
            StageEvent::MouseButton {
                button: MouseButton::Right,
                action: ButtonAction::Press,
            },
            StageEvent::MouseScroll { dx: 0.0, dy: -1.0 },
        ];
        for event in events {
            app.push_event(event);
        }
        app.step(16).unwrap();

        let delivered: Vec<String> = log
            .borrow()
            .iter()
            .filter(|entry| entry.starts_with("event"))
            .cloned()
            .collect();
        let expected: Vec<String> = events.iter().map(|e| format!("event {e:?}")).collect();
        assert_eq!(delivered, expected);
    }

    #[test]
    fn test_pause_skips_execute_and_actions() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut app = Application::new(test_config());
        app.set_stage(Recorder { log: Rc::clone(&log) }).unwrap();
        app.world_mut()
            .non_send_resource_mut::<ActionEngine>()
            .add(WaitAction::new(10));
        app.world_mut().resource_mut::<AppState>().paused = true;
        app.step(16).unwrap();

        assert!(!log.borrow().iter().any(|l| l.starts_with("execute")));
        assert_eq!(app.world().non_send_resource::<ActionEngine>().len(), 1);
        assert_eq!(app.world().resource::<WorldTime>().elapsed_ms, 16);
    }

    #[test]
    fn test_set_stage_while_launched_swaps() {
        let old = Rc::new(RefCell::new(Vec::new()));
        let new = Rc::new(RefCell::new(Vec::new()));
        let mut app = Application::new(test_config());
        app.set_stage(Recorder { log: Rc::clone(&old) }).unwrap();
        app.launch().unwrap();
        app.set_stage(Recorder { log: Rc::clone(&new) }).unwrap();

        assert_eq!(*old.borrow(), vec!["initialize", "release"]);
        assert_eq!(*new.borrow(), vec!["initialize"]);
    }

    #[test]
    fn test_failed_initialize_leaves_app_unlaunched() {
        struct Broken;
        impl Stage for Broken {
            fn initialize(&mut self, _world: &mut World) -> Result<(), StageError> {
                Err(StageError::Message("no window".into()))
            }
        }

        let mut app = Application::new(test_config());
        app.set_stage(Broken).unwrap();
        assert!(app.step(16).is_err());
        assert!(!app.is_launched());
    }

    #[test]
    fn test_run_stops_after_frame_limit() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut app = Application::new(test_config());
        app.set_stage(Recorder { log: Rc::clone(&log) }).unwrap();
        app.run(Some(3)).unwrap();

        let executes = log.borrow().iter().filter(|l| l.starts_with("execute")).count();
        assert_eq!(executes, 3);
        assert_eq!(log.borrow().last().map(String::as_str), Some("release"));
        assert!(!app.is_launched());
        assert_eq!(app.world().resource::<WorldTime>().frame_count, 3);
    }

    #[test]
    fn test_run_stops_stage_that_ignores_close() {
        struct Stubborn;
        impl Stage for Stubborn {
            fn process_event(&mut self, _world: &mut World, _event: &StageEvent) {}
        }

        let mut app = Application::new(test_config());
        app.set_stage(Stubborn).unwrap();
        app.run(Some(2)).unwrap();
        assert!(app.is_stopped());
        assert_eq!(app.world().resource::<WorldTime>().frame_count, 2);
    }
}
