//! Engine boundary
//!
//! The core only talks to physics/rendering through [`Engine`]:
//! - Bodies are created from [`BodyDesc`] and referred to by [`BodyId`]
//! - Velocity and the static flag are the only mutable knobs
//! - `step` advances one fixed tick and returns the collision-start feed
//!
//! [`World`] is the bundled headless implementation.

pub mod collision;
pub mod world;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use collision::Contact;
pub use world::{Body, World};

/// Opaque handle to a body owned by an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Semantic label attached to every body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLabel {
    Wall,
    Boundary,
    Ball,
    Goal,
}

impl BodyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyLabel::Wall => "wall",
            BodyLabel::Boundary => "boundary",
            BodyLabel::Ball => "ball",
            BodyLabel::Goal => "goal",
        }
    }
}

/// Render fill style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fill {
    Pink,
    Green,
    Orange,
    Grey,
}

impl Fill {
    /// CSS color string for canvas rendering
    pub fn css(&self) -> &'static str {
        match self {
            Fill::Pink => "pink",
            Fill::Green => "green",
            Fill::Orange => "orange",
            Fill::Grey => "#888",
        }
    }
}

/// Collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned rectangle, `size` is full width/height
    Rect { size: Vec2 },
    Circle { radius: f32 },
}

/// Everything an engine needs to create a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    pub shape: Shape,
    /// Center position
    pub position: Vec2,
    pub is_static: bool,
    pub label: BodyLabel,
    pub fill: Fill,
}

/// Two bodies whose contact began this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub a: BodyId,
    pub b: BodyId,
    pub label_a: BodyLabel,
    pub label_b: BodyLabel,
}

impl CollisionPair {
    /// Order-independent label match
    pub fn is_between(&self, x: BodyLabel, y: BodyLabel) -> bool {
        (self.label_a == x && self.label_b == y) || (self.label_a == y && self.label_b == x)
    }
}

/// Physics/render engine as seen by the game core
pub trait Engine {
    fn add_body(&mut self, desc: BodyDesc) -> BodyId;

    fn velocity(&self, id: BodyId) -> Result<Vec2>;

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2) -> Result<()>;

    fn set_static(&mut self, id: BodyId, is_static: bool) -> Result<()>;

    fn label(&self, id: BodyId) -> Result<BodyLabel>;

    /// All bodies carrying `label`, in creation order
    fn bodies_with_label(&self, label: BodyLabel) -> Vec<BodyId>;

    fn set_gravity(&mut self, gravity: Vec2);

    /// Advance one fixed tick, returning pairs whose contact started during it
    fn step(&mut self) -> Vec<CollisionPair>;
}
