use thiserror::Error;

/// Precondition violations reported by the engine.
///
/// Running into a wall or into the snake is not an error; that is reported
/// through [`GameOverReason`](super::GameOverReason).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid grid size {width}x{height}: both dimensions must be in 1..={max}")]
    InvalidGridSize {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    CellOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}
