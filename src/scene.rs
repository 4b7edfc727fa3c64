//! Scene assembly
//!
//! Turns a wall topology into engine-facing descriptors: one static rectangle
//! per standing wall, the outer boundary, the goal marker and the ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ACTOR_RADIUS_FRACTION, BOUNDARY_THICKNESS, GOAL_SIZE_FRACTION};
use crate::engine::{BodyDesc, BodyLabel, Fill, Shape};
use crate::error::{MazeError, Result};
use crate::maze::WallTopology;

/// Axis-aligned static rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleDescriptor {
    pub center: Vec2,
    /// Full width and height
    pub size: Vec2,
    pub label: BodyLabel,
}

impl ObstacleDescriptor {
    fn new(center: Vec2, size: Vec2, label: BodyLabel) -> Self {
        Self { center, size, label }
    }

    pub fn to_body(&self) -> BodyDesc {
        let fill = match self.label {
            BodyLabel::Goal => Fill::Green,
            BodyLabel::Boundary => Fill::Grey,
            BodyLabel::Ball => Fill::Orange,
            BodyLabel::Wall => Fill::Pink,
        };
        BodyDesc {
            shape: Shape::Rect { size: self.size },
            position: self.center,
            is_static: true,
            label: self.label,
            fill,
        }
    }
}

/// The player's ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Actor {
    pub fn to_body(&self) -> BodyDesc {
        BodyDesc {
            shape: Shape::Circle { radius: self.radius },
            position: self.position,
            is_static: false,
            label: BodyLabel::Ball,
            fill: Fill::Orange,
        }
    }
}

/// Everything the engine needs for one maze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub obstacles: Vec<ObstacleDescriptor>,
    pub actor: Actor,
    pub goal: ObstacleDescriptor,
    pub boundary: Vec<ObstacleDescriptor>,
    /// Play-area extent
    pub extent: Vec2,
}

impl Scene {
    /// Every descriptor in registration order: boundary, walls, goal, ball
    pub fn bodies(&self) -> impl Iterator<Item = BodyDesc> + '_ {
        self.boundary
            .iter()
            .chain(self.obstacles.iter())
            .chain(std::iter::once(&self.goal))
            .map(ObstacleDescriptor::to_body)
            .chain(std::iter::once(self.actor.to_body()))
    }
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MazeError::InvalidConfig(format!("{name} must be positive, got {value}")))
    }
}

/// Four thin rectangles centered on the edges of a `width x height` area
pub fn boundary(width: f32, height: f32) -> Vec<ObstacleDescriptor> {
    let t = BOUNDARY_THICKNESS;
    [
        (Vec2::new(width / 2.0, 0.0), Vec2::new(width, t)), // top
        (Vec2::new(0.0, height / 2.0), Vec2::new(t, height)), // left
        (Vec2::new(width / 2.0, height), Vec2::new(width, t)), // bottom
        (Vec2::new(width, height / 2.0), Vec2::new(t, height)), // right
    ]
    .into_iter()
    .map(|(center, size)| ObstacleDescriptor::new(center, size, BodyLabel::Boundary))
    .collect()
}

/// Lay out a topology on a grid of `cell_width x cell_height` cells
pub fn assemble(
    topology: &WallTopology,
    cell_width: f32,
    cell_height: f32,
    wall_thickness: f32,
) -> Result<Scene> {
    check_positive("cell width", cell_width)?;
    check_positive("cell height", cell_height)?;
    check_positive("wall thickness", wall_thickness)?;

    let (cw, ch) = (cell_width, cell_height);
    let mut obstacles = Vec::new();

    for (r, c, open) in topology.horizontal_walls().iter() {
        if !open {
            obstacles.push(ObstacleDescriptor::new(
                Vec2::new(c as f32 * cw + cw / 2.0, (r + 1) as f32 * ch),
                Vec2::new(cw, wall_thickness),
                BodyLabel::Wall,
            ));
        }
    }

    for (r, c, open) in topology.vertical_walls().iter() {
        if !open {
            obstacles.push(ObstacleDescriptor::new(
                Vec2::new((c + 1) as f32 * cw, r as f32 * ch + ch / 2.0),
                Vec2::new(wall_thickness, ch),
                BodyLabel::Wall,
            ));
        }
    }

    let extent = Vec2::new(topology.cols() as f32 * cw, topology.rows() as f32 * ch);

    let goal = ObstacleDescriptor::new(
        extent - Vec2::new(cw / 2.0, ch / 2.0),
        Vec2::new(cw, ch) * GOAL_SIZE_FRACTION,
        BodyLabel::Goal,
    );

    let actor = Actor {
        position: Vec2::new(cw / 2.0, ch / 2.0),
        velocity: Vec2::ZERO,
        radius: cw.min(ch) * ACTOR_RADIUS_FRACTION,
    };

    log::debug!(
        "Assembled scene: {} walls, extent {}x{}",
        obstacles.len(),
        extent.x,
        extent.y
    );

    Ok(Scene {
        obstacles,
        actor,
        goal,
        boundary: boundary(extent.x, extent.y),
        extent,
    })
}
