//! Torus Snake - Snake on a wrap-around grid
//!
//! This library provides:
//! - Core game logic with a fixed-timestep tick (game module)
//! - Drawing surfaces and the terminal layout (render module)
//! - Frame timing (clock module)
//! - Keyboard mapping (input module)
//! - The interactive terminal driver (modes module)

pub mod clock;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
