//! Keyboard mapping for the terminal frontend

pub mod handler;

pub use handler::{InputHandler, KeyAction};
