//! Game session: explicit ownership of one grid, one agent, and the rules.
//!
//! Replaces the original's global landscape/agent singletons. The session
//! owns the move budget and is the side that ends the game: after every
//! accepted move it recomputes the countdown and, at zero, kills the agent
//! and notifies the registered game-over listeners. The agent itself never
//! inspects the budget.

use crate::agent::{Agent, Observation};
use crate::config::Config;
use crate::error::GameError;
use crate::grid::Grid;
use crate::visibility::{MoveDirection, Variant};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::sync::Arc;

/// End-of-game summary handed to listeners for external persistence
/// (score submission is the caller's business; the core does no I/O).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameReport {
    pub variant: Variant,
    pub move_count: usize,
    pub final_energy: f64,
}

/// Budget outcome of one accepted move. The post-move view is available
/// from [`Session::observation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub moves_left: u32,
    pub game_over: bool,
}

type GameOverListener = Box<dyn FnMut(&GameReport)>;

/// One playing session: a grid shared with its agent, a move budget, and a
/// seeded RNG for placement.
pub struct Session {
    grid: Arc<Grid>,
    agent: Agent,
    max_moves: u32,
    fixed_start: Option<(i64, i64)>,
    listeners: Vec<GameOverListener>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Session {
    /// Create a session from config with a random seed.
    pub fn new(config: &Config) -> Result<Self, GameError> {
        let seed = rand::thread_rng().gen();
        Self::with_seed(config, seed)
    }

    /// Create a session with a specific seed for reproducible placement.
    pub fn with_seed(config: &Config, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let grid = Arc::new(config.build_grid()?);
        let variant = config.variant()?;

        let (row, col) = match config.game.start {
            Some(start) => start,
            None => random_start(&grid, &mut rng),
        };
        let agent = Agent::new(grid.clone(), variant, row, col, config.game.allow_stay);

        log::info!(
            "session started: {}x{} grid, variant {} ({}), {} moves",
            grid.rows(),
            grid.cols(),
            variant.code(),
            variant.nickname(),
            config.game.max_moves
        );

        Ok(Self {
            grid,
            agent,
            max_moves: config.game.max_moves,
            fixed_start: config.game.start,
            listeners: Vec::new(),
            rng,
            seed,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    #[inline]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn energy(&self) -> f64 {
        self.agent.energy()
    }

    /// Moves remaining in the budget.
    #[inline]
    pub fn moves_left(&self) -> u32 {
        self.max_moves.saturating_sub(self.agent.move_count() as u32)
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        !self.agent.alive()
    }

    /// The agent's current 5-cell view.
    pub fn observation(&self) -> Observation<'_> {
        self.agent.current_observation()
    }

    /// Register a game-over listener. Registrations survive [`reset`].
    ///
    /// [`reset`]: Session::reset
    pub fn on_game_over<F>(&mut self, listener: F)
    where
        F: FnMut(&GameReport) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Play one move. State commits before any caller-side animation:
    /// energy and histories are final when this returns.
    pub fn play(&mut self, direction: MoveDirection) -> Result<Turn, GameError> {
        self.agent.step(direction)?;

        let moves_left = self.moves_left();
        if moves_left == 0 {
            self.agent.kill();
            let report = GameReport {
                variant: self.agent.variant(),
                move_count: self.agent.move_count(),
                final_energy: self.agent.energy(),
            };
            log::info!(
                "game over: {} scored {:.2} in {} moves",
                report.variant.nickname(),
                report.final_energy,
                report.move_count
            );
            for listener in &mut self.listeners {
                listener(&report);
            }
        }

        Ok(Turn {
            moves_left,
            game_over: !self.agent.alive(),
        })
    }

    /// Switch the observability variant mid-game.
    pub fn set_variant(&mut self, variant: Variant) {
        self.agent.set_variant(variant);
    }

    /// Begin a new game on the same grid: fresh start cell (the configured
    /// fixed start, or a new random draw), zeroed history and energy.
    /// Listener registrations are kept.
    pub fn reset(&mut self) {
        let start = match self.fixed_start {
            Some(start) => start,
            None => random_start(&self.grid, &mut self.rng),
        };
        self.agent.reset(Some(start));
        log::debug!("session reset: new start {:?}", self.agent.position());
    }
}

fn random_start(grid: &Grid, rng: &mut ChaCha8Rng) -> (i64, i64) {
    (
        rng.gen_range(0..grid.rows()) as i64,
        rng.gen_range(0..grid.cols()) as i64,
    )
}
