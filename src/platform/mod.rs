//! Platform abstraction layer
//!
//! Handles browser specifics for:
//! - Drawing bodies onto a 2D canvas
//! - Keyboard input
//! - Revealing the win indicator

#[cfg(target_arch = "wasm32")]
pub mod web;
