use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::state::Position;

/// Engine-scoped random source, seeded once.
///
/// Keeping the seed around lets a game be replayed with the same food
/// sequence.
#[derive(Debug, Clone)]
pub struct FoodRng {
    rng: StdRng,
    seed: u64,
}

impl FoodRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniformly random cell inside a `width` x `height` grid
    pub fn cell(&mut self, width: usize, height: usize) -> Position {
        let x = self.rng.gen_range(0..width) as i32;
        let y = self.rng.gen_range(0..height) as i32;
        Position::new(x, y)
    }

    /// Uniformly random element of `cells`
    pub fn choose(&mut self, cells: &[Position]) -> Option<Position> {
        cells.choose(&mut self.rng).copied()
    }
}
