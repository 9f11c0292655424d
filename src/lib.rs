//! Hero Clicker simulation core.
//!
//! Everything the browser frontend drives lives here: the economy, combat
//! resolution, the encounter state machine, progression, persistence and the
//! [`Game`] context that owns them. DOM access is confined to
//! `cfg(target_arch = "wasm32")` blocks so the whole core runs in host tests.

pub mod clock;
pub mod combat;
pub mod config;
pub mod economy;
pub mod encounter;
pub mod engine;
pub mod error;
pub mod format;
pub mod logging;
pub mod progression;
pub mod rng;
pub mod save;
pub mod sinks;
pub mod skills;
pub mod state;

pub use config::Tuning;
pub use engine::{ClickReport, DroneReward, Game, TickReport};
pub use error::{GameError, GameResult, PersistenceError};
pub use sinks::{AudioSink, Notice, RenderSink};
