//! Pixel collision demo
//!
//! A headless take on the classic per-pixel collision scene: an axe swings
//! like a pendulum from the top of the arena while a spinning spike ball
//! follows a wandering pointer. Every frame both transforms are rebuilt and
//! the sprites are tested texel against texel; contacts are logged.
//!
//! Usage: `collision_demo [config.toml|config.ron]` with `RUST_LOG=info`.

mod assets;
mod config;
mod scene;

use pixel_collision::config::Config;
use pixel_collision::foundation::logging;

use crate::config::DemoConfig;
use crate::scene::Scene;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading demo configuration from {path}");
            DemoConfig::load_from_file(&path)?
        }
        None => DemoConfig::default(),
    };

    let mut scene = Scene::new(&config);
    let summary = scene.run();

    log::info!(
        "Simulated {} frames ({:.1}s): {} contacts, colliding in {} frames",
        summary.frames,
        scene.elapsed(),
        summary.contacts,
        summary.colliding_frames
    );

    Ok(())
}
