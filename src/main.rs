//! Maze Ball entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Maze Ball starting...");
    if let Err(e) = maze_ball::platform::web::run() {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ticks to simulate headless (10 seconds at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_TICKS: u32 = 600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Maze Ball (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in the browser");

    if let Err(e) = run_headless() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Generate a maze from optional JSON settings (first argument), print it,
/// and let the ball roll for a few seconds
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> maze_ball::Result<()> {
    use maze_ball::engine::{BodyLabel, Engine, World};
    use maze_ball::{MazeError, Session, Settings};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| MazeError::InvalidConfig(format!("{path}: {e}")))?;
            log::info!("Loaded settings from {}", path);
            Settings::from_json(&json)?
        }
        None => Settings::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut session = Session::start(settings, World::new(), &mut Pcg32::seed_from_u64(seed))?;

    println!("{}", session.topology());
    println!("seed: {}", session.seed());

    for _ in 0..HEADLESS_TICKS {
        session.step()?;
    }

    let world = session.engine();
    log::info!(
        "After {} ticks: phase {:?}, ball at {:?}, {} walls",
        world.ticks(),
        session.phase(),
        world.body(session.actor()).map(|b| b.position),
        world.bodies_with_label(BodyLabel::Wall).len()
    );
    Ok(())
}
