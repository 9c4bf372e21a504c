//! stageworks main entry point.
//!
//! Runs the [`ExampleStage`](stageworks::game::ExampleStage) in a headless
//! application loop:
//!
//! 1. Load `config.ini` (defaults when missing), apply CLI overrides
//! 2. Build the [`Application`](stageworks::app::Application) world
//! 3. Run frames until the stage stops (Escape, window close, `--frames`)
//! 4. Release the stage and every asset store
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 600
//! ```

use clap::Parser;
use log::{error, info, warn};
use stageworks::app::Application;
use stageworks::game::ExampleStage;
use stageworks::resources::gameconfig::GameConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Stage engine demo
#[derive(Parser)]
#[command(version, about = "Runs the stageworks example stage")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Stop after this many frames.
    #[arg(long, value_name = "N")]
    frames: Option<u64>,

    /// Asset manifest, overrides the configuration file.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Target frames per second, overrides the configuration file.
    #[arg(long, value_name = "N")]
    fps: Option<u32>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Hello, world! This is stageworks!");
    let mut config = GameConfig::with_path(cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{e}, using defaults");
    }
    if let Some(manifest) = cli.manifest {
        config.manifest_path = manifest;
    }
    if let Some(fps) = cli.fps {
        config.target_fps = fps;
    }

    let mut app = Application::new(config);
    if let Err(e) = app.set_stage(ExampleStage::new()) {
        error!("Failed to set stage: {e}");
        return ExitCode::FAILURE;
    }
    match app.run(cli.frames) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Application failed: {e}");
            ExitCode::FAILURE
        }
    }
}
