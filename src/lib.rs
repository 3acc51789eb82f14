//! Snake Engine - a renderer-agnostic snake game
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - A terminal frontend built on it: keyboard mapping (input), drawing
//!   (render), session statistics (metrics) and the play loop (modes)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
