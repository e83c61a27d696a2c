// src/main.rs

//! `fbsurface`: opens the configured display surface, reports its geometry and
//! idles in a flip loop until interrupted with SIGINT.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use fbsurface::config::{Config, CONFIG_ENV_VAR};
use fbsurface::native_state::{self, WindowProperties};
use fbsurface::QuitFlag;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// What the harness would ask for; framebuffer backends override it.
const REQUESTED_WIDTH: u32 = 800;
const REQUESTED_HEIGHT: u32 = 600;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting fbsurface...");

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
    let config = Config::load_or_default(config_path.as_deref())?;
    info!("Backend: {:?}, device: {}", config.backend, config.device.path().display());

    let quit = QuitFlag::new();
    let mut state = native_state::create(&config, quit.clone());

    state
        .init_display()
        .context("Failed to initialize display")?;
    state
        .create_window(WindowProperties::new(REQUESTED_WIDTH, REQUESTED_HEIGHT, false))
        .context("Failed to create window")?;

    let window = state.window();
    info!(
        "Display handle {:?}, window handle {:?}",
        state.display(),
        window.handle
    );
    state.visible(true);
    println!(
        "surface ready: {}x{} fullscreen={}",
        window.properties.width, window.properties.height, window.properties.fullscreen
    );

    let mut frames: u64 = 0;
    while !state.should_quit() {
        state.flip();
        frames += 1;
        thread::sleep(FRAME_INTERVAL);
    }

    info!("Interrupted after {} frames, shutting down", frames);
    state.cleanup();
    println!("quit requested");
    Ok(())
}
