//! # NEMATODE
//!
//! Core of a landscape-exploration game: a simulated nematode crawls over a
//! 2D scalar field discretized onto a toroidal grid, seeing only what its
//! observability variant discloses, and accumulates the field values it
//! visits as its score.
//!
//! ## Features
//!
//! - **Toroidal addressing**: one wrap primitive, correct for any integer
//!   index; the grid has no edges
//! - **Multi-frame cells**: continuous, display, and render-box coordinates
//!   precomputed per cell
//! - **Four observability variants**: blind, rearview, headlight, omniscient
//! - **Explicit ownership**: a [`Session`] holds the grid, agent, move
//!   budget, and game-over listeners; no global state
//! - **Reproducible**: seeded random placement via ChaCha8
//!
//! ## Quick Start
//!
//! ```rust
//! use nematode::{Config, MoveDirection, Session};
//!
//! let config = Config::easy();
//! let mut session = Session::with_seed(&config, 42).unwrap();
//!
//! let turn = session.play(MoveDirection::Right).unwrap();
//! println!("energy so far: {:.2}", session.energy());
//! println!("moves left: {}", turn.moves_left);
//! ```
//!
//! ## Score submission
//!
//! The core performs no network I/O. Register a listener and post the
//! report wherever your scoreboard lives:
//!
//! ```rust
//! use nematode::{Config, Session};
//!
//! let mut session = Session::new(&Config::hard()).unwrap();
//! session.on_game_over(|report| {
//!     println!("{} finished with {:.1}", report.variant.nickname(), report.final_energy);
//! });
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod session;
pub mod visibility;

// Re-export main types
pub use agent::{Agent, Observation, ObservedCell};
pub use config::Config;
pub use error::GameError;
pub use field::{Field, Gaussian};
pub use grid::{Cell, Grid};
pub use session::{GameReport, Session, Turn};
pub use visibility::{visible_offsets, DirectionSet, MoveDirection, Variant};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
