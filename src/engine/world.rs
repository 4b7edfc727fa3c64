//! Headless rigid-body world
//!
//! A deliberately small engine: axis-aligned rectangles and circles, no
//! rotation, fixed tick. Deterministic because bodies are stored and iterated
//! in ascending id order and contacts are tracked in an ordered set.

use std::collections::BTreeSet;

use glam::Vec2;

use super::collision::{contact, resolve_velocity};
use super::{BodyDesc, BodyId, BodyLabel, CollisionPair, Engine, Fill, Shape};
use crate::consts::{AIR_FRICTION, GRAVITY_SCALE};
use crate::error::{MazeError, Result};

/// A body owned by the world
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub shape: Shape,
    pub position: Vec2,
    /// Pixels per tick
    pub velocity: Vec2,
    pub is_static: bool,
    pub label: BodyLabel,
    pub fill: Fill,
}

#[derive(Debug, Clone)]
pub struct World {
    /// Sorted by id (ids are handed out in increasing order)
    bodies: Vec<Body>,
    gravity: Vec2,
    air_friction: f32,
    restitution: f32,
    /// Pairs in contact at the end of the previous tick
    contacts: BTreeSet<(BodyId, BodyId)>,
    next_id: u32,
    ticks: u64,
}

impl Default for World {
    fn default() -> Self {
        Self {
            bodies: Vec::new(),
            gravity: Vec2::ZERO,
            air_friction: AIR_FRICTION,
            restitution: 0.0,
            contacts: BTreeSet::new(),
            next_id: 1,
            ticks: 0,
        }
    }
}

impl World {
    /// Empty world with gravity disabled
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_air_friction(mut self, air_friction: f32) -> Self {
        self.air_friction = air_friction.clamp(0.0, 1.0);
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.max(0.0);
        self
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).ok().map(|i| &self.bodies[i])
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Ticks simulated so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Teleport a body; contacts are re-evaluated on the next tick
    pub fn set_position(&mut self, id: BodyId, position: Vec2) -> Result<()> {
        let i = self.index_of(id)?;
        self.bodies[i].position = position;
        Ok(())
    }

    fn index_of(&self, id: BodyId) -> Result<usize> {
        self.bodies
            .binary_search_by_key(&id, |b| b.id)
            .map_err(|_| MazeError::UnknownBody(id))
    }

    fn integrate(&mut self) {
        let accel = self.gravity * GRAVITY_SCALE;
        let damping = 1.0 - self.air_friction;
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.velocity = (body.velocity + accel) * damping;
            body.position += body.velocity;
        }
    }

    /// Detect every contact, push dynamic bodies out of static ones, and
    /// report contacts that were not present last tick
    fn solve_contacts(&mut self) -> Vec<CollisionPair> {
        let mut current = BTreeSet::new();
        let mut started = Vec::new();
        let count = self.bodies.len();

        for i in 0..count {
            for j in (i + 1)..count {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if a.is_static && b.is_static {
                    continue;
                }
                let Some(hit) = contact(&a.shape, a.position, &b.shape, b.position) else {
                    continue;
                };

                let key = (a.id, b.id);
                if !self.contacts.contains(&key) {
                    started.push(CollisionPair {
                        a: a.id,
                        b: b.id,
                        label_a: a.label,
                        label_b: b.label,
                    });
                }
                current.insert(key);

                // Only dynamic-vs-static contacts are resolved
                let (mover, normal) = match (a.is_static, b.is_static) {
                    (false, true) => (i, hit.normal),
                    (true, false) => (j, -hit.normal),
                    _ => continue,
                };
                let body = &mut self.bodies[mover];
                if hit.penetration > 0.0 {
                    body.position += normal * hit.penetration;
                }
                body.velocity = resolve_velocity(body.velocity, normal, self.restitution);
            }
        }

        self.contacts = current;
        started
    }
}

impl Engine for World {
    fn add_body(&mut self, desc: BodyDesc) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            shape: desc.shape,
            position: desc.position,
            velocity: Vec2::ZERO,
            is_static: desc.is_static,
            label: desc.label,
            fill: desc.fill,
        });
        id
    }

    fn velocity(&self, id: BodyId) -> Result<Vec2> {
        Ok(self.bodies[self.index_of(id)?].velocity)
    }

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2) -> Result<()> {
        let i = self.index_of(id)?;
        self.bodies[i].velocity = velocity;
        Ok(())
    }

    fn set_static(&mut self, id: BodyId, is_static: bool) -> Result<()> {
        let i = self.index_of(id)?;
        let body = &mut self.bodies[i];
        body.is_static = is_static;
        if is_static {
            body.velocity = Vec2::ZERO;
        }
        Ok(())
    }

    fn label(&self, id: BodyId) -> Result<BodyLabel> {
        Ok(self.bodies[self.index_of(id)?].label)
    }

    fn bodies_with_label(&self, label: BodyLabel) -> Vec<BodyId> {
        self.bodies
            .iter()
            .filter(|b| b.label == label)
            .map(|b| b.id)
            .collect()
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn step(&mut self) -> Vec<CollisionPair> {
        self.ticks += 1;
        self.integrate();
        let started = self.solve_contacts();
        for pair in &started {
            log::debug!(
                "collision start: {} #{} <-> {} #{}",
                pair.label_a.as_str(),
                pair.a.0,
                pair.label_b.as_str(),
                pair.b.0
            );
        }
        started
    }
}
