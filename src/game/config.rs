use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Largest accepted grid dimension. Coordinates stay within i16 range.
pub const MAX_GRID_DIMENSION: usize = i16::MAX as usize;

/// Configuration for the engine
///
/// The grid size is fixed once an [`Engine`](super::Engine) is built; the two
/// rule flags can still be flipped on a running engine.
///
/// # Example
///
/// ```rust
/// use snake_engine::game::EngineConfig;
///
/// let config = EngineConfig {
///     loop_at_edge: true,
///     ..EngineConfig::new(30, 15)
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of columns
    pub grid_width: usize,
    /// Number of rows
    pub grid_height: usize,
    /// Wrap around to the opposite edge instead of ending the game
    pub loop_at_edge: bool,
    /// End the game when the snake runs into itself
    pub collide_with_snake: bool,
    /// Food items spawned by every reset. Fewer are placed if the grid
    /// runs out of free cells.
    pub initial_food: usize,
    /// Seed for food placement; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            loop_at_edge: false,
            collide_with_snake: true,
            initial_food: 1,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Set a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the configuration describes a playable grid
    pub fn validate(&self) -> Result<(), EngineError> {
        let dimension_ok = |d: usize| (1..=MAX_GRID_DIMENSION).contains(&d);
        if !dimension_ok(self.grid_width) || !dimension_ok(self.grid_height) {
            return Err(EngineError::InvalidGridSize {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_GRID_DIMENSION,
            });
        }

        Ok(())
    }

    /// Load and validate a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&json).context("Failed to deserialize engine config")?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize engine config")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}
