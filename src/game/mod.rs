//! Core game logic for Snake on a toroidal grid
//!
//! This module has no I/O: time arrives as deltas, input as directions, and
//! frames leave as draw commands on a [`DrawSurface`](crate::render::DrawSurface).

pub mod config;
pub mod direction;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use state::{GameState, GameStatus, GridPosition, SnakeSegment, TickOutcome};
