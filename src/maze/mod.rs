//! Maze generation
//!
//! Pure and deterministic given the injected RNG:
//! - No engine or platform dependencies
//! - Same seed, same dimensions, same maze

pub mod generator;
pub mod grid;
pub mod topology;

pub use generator::{generate, shuffled_directions};
pub use grid::{Cell, Direction, Grid};
pub use topology::WallTopology;
