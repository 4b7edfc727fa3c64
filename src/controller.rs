//! Keyboard input mapping and the win-state machine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::KEY_VELOCITY_DELTA;
use crate::engine::{BodyId, BodyLabel, CollisionPair, Engine};
use crate::error::Result;

/// Directional keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Left,
    Back,
    Right,
}

impl Key {
    /// Legacy DOM key codes: W=87, A=65, S=83, D=68
    pub fn from_key_code(code: u32) -> Option<Key> {
        match code {
            87 | 38 => Some(Key::Forward),
            65 | 37 => Some(Key::Left),
            83 | 40 => Some(Key::Back),
            68 | 39 => Some(Key::Right),
            _ => None,
        }
    }

    /// DOM `KeyboardEvent.key` names
    pub fn from_key_name(name: &str) -> Option<Key> {
        match name {
            "w" | "W" | "ArrowUp" => Some(Key::Forward),
            "a" | "A" | "ArrowLeft" => Some(Key::Left),
            "s" | "S" | "ArrowDown" => Some(Key::Back),
            "d" | "D" | "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }

    /// Velocity increment for one press (screen space, y grows downward)
    pub fn delta(self) -> Vec2 {
        match self {
            Key::Forward => Vec2::new(0.0, -KEY_VELOCITY_DELTA),
            Key::Left => Vec2::new(-KEY_VELOCITY_DELTA, 0.0),
            Key::Back => Vec2::new(0.0, KEY_VELOCITY_DELTA),
            Key::Right => Vec2::new(KEY_VELOCITY_DELTA, 0.0),
        }
    }
}

/// Add the key's delta to the actor's current velocity
pub fn apply_key<E: Engine + ?Sized>(engine: &mut E, actor: BodyId, key: Key) -> Result<Vec2> {
    let velocity = engine.velocity(actor)? + key.delta();
    engine.set_velocity(actor, velocity)?;
    log::debug!("{:?} -> velocity ({:.1}, {:.1})", key, velocity.x, velocity.y);
    Ok(velocity)
}

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Terminal
    Won,
}

/// Events for the display layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball touched the goal; reveal the win indicator
    Won,
}

/// Watches the collision-start feed for ball/goal contact
#[derive(Debug, Clone)]
pub struct WinController {
    phase: GamePhase,
    collapse_on_win: bool,
}

impl Default for WinController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl WinController {
    pub fn new(collapse_on_win: bool) -> Self {
        Self {
            phase: GamePhase::Playing,
            collapse_on_win,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Process one tick's worth of collision-start pairs.
    ///
    /// Returns `Some(GameEvent::Won)` on the single Playing -> Won transition.
    /// When collapse is enabled, every wall is released to dynamic and
    /// gravity is switched on so the maze falls apart.
    pub fn on_collisions<E: Engine + ?Sized>(
        &mut self,
        pairs: &[CollisionPair],
        engine: &mut E,
    ) -> Result<Option<GameEvent>> {
        if self.phase == GamePhase::Won {
            return Ok(None);
        }
        if !pairs
            .iter()
            .any(|p| p.is_between(BodyLabel::Ball, BodyLabel::Goal))
        {
            return Ok(None);
        }

        self.phase = GamePhase::Won;
        log::info!("Ball reached the goal!");

        // The collapse is cosmetic: a wall the engine refuses to release must
        // not swallow the win
        if self.collapse_on_win {
            let walls = engine.bodies_with_label(BodyLabel::Wall);
            let mut released = 0;
            for &wall in &walls {
                match engine.set_static(wall, false) {
                    Ok(()) => released += 1,
                    Err(e) => log::warn!("Wall #{} stays put: {}", wall.0, e),
                }
            }
            engine.set_gravity(Vec2::new(0.0, 1.0));
            log::info!("Released {}/{} walls", released, walls.len());
        }

        Ok(Some(GameEvent::Won))
    }
}
