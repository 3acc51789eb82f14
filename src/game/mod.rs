//! Core snake engine
//!
//! Pure game logic with no I/O, timing or rendering dependencies. A caller
//! drives it by calling [`Engine::update`] at whatever pace it likes and
//! reads snapshots back for drawing.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod rng;
pub mod state;

// Re-export commonly used types
pub use config::{EngineConfig, MAX_GRID_DIMENSION};
pub use direction::Direction;
pub use engine::{Engine, StepInfo};
pub use error::EngineError;
pub use rng::FoodRng;
pub use state::{GameOverReason, Position, Snake};
