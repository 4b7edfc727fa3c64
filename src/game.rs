//! A single play session
//!
//! Wires settings -> generator -> scene -> engine, then runs the fixed-timestep
//! loop and routes key presses and collision events.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::controller::{GameEvent, GamePhase, Key, WinController, apply_key};
use crate::engine::{BodyId, Engine};
use crate::error::{MazeError, Result};
use crate::maze::{WallTopology, generate};
use crate::scene::assemble;
use crate::settings::Settings;

pub struct Session<E: Engine> {
    engine: E,
    settings: Settings,
    topology: WallTopology,
    /// Seed the maze was generated from
    seed: u64,
    actor: BodyId,
    goal: BodyId,
    controller: WinController,
    accumulator: f32,
}

impl<E: Engine> Session<E> {
    /// Generate a maze, assemble it and register every body with `engine`.
    ///
    /// `settings.seed` wins over `rng`; otherwise a seed is drawn from `rng`
    /// so the maze can be reproduced later.
    pub fn start<R: RngCore + ?Sized>(
        settings: Settings,
        mut engine: E,
        rng: &mut R,
    ) -> Result<Self> {
        settings.validate()?;

        let seed = settings.seed.unwrap_or_else(|| rng.next_u64());
        let topology = generate(settings.rows, settings.cols, &mut Pcg32::seed_from_u64(seed))?;
        let scene = assemble(
            &topology,
            settings.cell_width(),
            settings.cell_height(),
            settings.wall_thickness,
        )?;

        let ids: Vec<BodyId> = scene.bodies().map(|desc| engine.add_body(desc)).collect();
        // Registration order ends with the goal, then the ball
        let &[.., goal, actor] = ids.as_slice() else {
            return Err(MazeError::InvalidConfig("scene produced no bodies".to_string()));
        };

        log::info!(
            "Session started: {}x{} maze, seed {}, {} walls",
            settings.rows,
            settings.cols,
            seed,
            scene.obstacles.len()
        );

        Ok(Self {
            engine,
            controller: WinController::new(settings.collapse_on_win),
            settings,
            topology,
            seed,
            actor,
            goal,
            accumulator: 0.0,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.controller.phase()
    }

    pub fn topology(&self) -> &WallTopology {
        &self.topology
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn actor(&self) -> BodyId {
        self.actor
    }

    pub fn goal(&self) -> BodyId {
        self.goal
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Apply one directional key press to the ball
    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        apply_key(&mut self.engine, self.actor, key)?;
        Ok(())
    }

    /// Advance exactly one tick
    pub fn step(&mut self) -> Result<Option<GameEvent>> {
        let pairs = self.engine.step();
        self.controller.on_collisions(&pairs, &mut self.engine)
    }

    /// Advance by wall-clock `dt` seconds using a fixed timestep
    pub fn update(&mut self, dt: f32) -> Result<Vec<GameEvent>> {
        // Non-finite frame times (clock glitches) count as an empty frame
        let dt = if dt.is_finite() { dt.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if let Some(event) = self.step()? {
                events.push(event);
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        Ok(events)
    }
}
