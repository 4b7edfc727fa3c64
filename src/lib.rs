//! Maze Ball - steer a ball through a random perfect maze
//!
//! Core modules:
//! - `maze`: Randomized depth-first maze generation (pure, seeded)
//! - `scene`: Wall topology -> engine body descriptors
//! - `controller`: Keyboard velocity deltas and the win-state machine
//! - `engine`: Engine boundary trait plus a headless rigid-body world
//! - `game`: Session wiring and the fixed-timestep loop
//! - `platform`: Browser canvas/keyboard glue

pub mod controller;
pub mod engine;
pub mod error;
pub mod game;
pub mod maze;
pub mod platform;
pub mod scene;
pub mod settings;

pub use error::{MazeError, Result};
pub use game::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Outer boundary rectangle thickness
    pub const BOUNDARY_THICKNESS: f32 = 2.0;
    /// Ball radius as a fraction of the smaller cell side
    pub const ACTOR_RADIUS_FRACTION: f32 = 0.25;
    /// Goal marker size as a fraction of the cell
    pub const GOAL_SIZE_FRACTION: f32 = 0.6;

    /// Velocity added per key press (pixels per tick)
    pub const KEY_VELOCITY_DELTA: f32 = 1.0;
    /// Per-tick acceleration for unit gravity (pixels/tick², ~1e-3 px/ms² at 60 Hz)
    pub const GRAVITY_SCALE: f32 = 0.28;
    /// Fraction of velocity lost to drag each tick
    pub const AIR_FRICTION: f32 = 0.01;
}
