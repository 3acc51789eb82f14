use std::collections::{HashMap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the position lies inside a `width` x `height` grid
    pub fn in_bounds(&self, width: usize, height: usize) -> bool {
        self.x >= 0 && (self.x as usize) < width && self.y >= 0 && (self.y as usize) < height
    }

    /// Wrap the position onto a `width` x `height` torus
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.rem_euclid(width as i32),
            y: self.y.rem_euclid(height as i32),
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The game hasn't ended
    #[default]
    None,
    /// The game ended for a reason outside the built-in rules
    Other,
    /// The snake ran into itself
    SelfCollision,
    /// The snake ran into the edge of the grid
    EdgeCollision,
}

impl GameOverReason {
    pub fn is_over(self) -> bool {
        self != GameOverReason::None
    }
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameOverReason::None => "the game is still running",
            GameOverReason::Other => "the game ended",
            GameOverReason::SelfCollision => "the snake collided with itself",
            GameOverReason::EdgeCollision => "the snake collided with the edge",
        };
        f.write_str(text)
    }
}

/// The snake's body plus an occupancy count per cell.
///
/// The occupancy map is kept in step with the body on every push/pop, so
/// "are any two segments on the same cell" is answered in O(1) instead of a
/// pairwise scan.
#[derive(Debug, Clone)]
pub struct Snake {
    /// Body segments, head at the front
    body: VecDeque<Position>,
    occupancy: HashMap<Position, usize>,
    /// Sum over all cells of (segments on cell - 1)
    overlaps: usize,
}

impl Snake {
    /// Create a one-segment snake
    pub fn new(head: Position) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            occupancy: HashMap::new(),
            overlaps: 0,
        };
        snake.push_head(head);
        snake
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least one segment
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Owned copy of the body, head first
    pub fn segments(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }

    /// Check if any segment sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.occupancy.contains_key(&pos)
    }

    /// True when two or more segments share a cell
    pub fn has_overlap(&self) -> bool {
        self.overlaps > 0
    }

    /// Check that every segment lies inside a `width` x `height` grid
    pub fn in_bounds(&self, width: usize, height: usize) -> bool {
        self.body.iter().all(|pos| pos.in_bounds(width, height))
    }

    /// Add a new head in front of the current one
    pub fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
        self.occupy(pos);
    }

    /// Drop the last segment. The final segment is never removed.
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() <= 1 {
            return None;
        }
        let pos = self.body.pop_back()?;
        self.vacate(pos);
        Some(pos)
    }

    /// Move every segment that left the grid to the opposite edge
    pub fn wrap_into(&mut self, width: usize, height: usize) {
        for i in 0..self.body.len() {
            let pos = self.body[i];
            if pos.in_bounds(width, height) {
                continue;
            }
            let wrapped = pos.wrapped(width, height);
            self.body[i] = wrapped;
            self.vacate(pos);
            self.occupy(wrapped);
        }
    }

    fn occupy(&mut self, pos: Position) {
        let count = self.occupancy.entry(pos).or_insert(0);
        *count += 1;
        if *count > 1 {
            self.overlaps += 1;
        }
    }

    fn vacate(&mut self, pos: Position) {
        if let Some(count) = self.occupancy.get_mut(&pos) {
            if *count > 1 {
                self.overlaps -= 1;
            }
            *count -= 1;
            if *count == 0 {
                self.occupancy.remove(&pos);
            }
        }
    }
}

impl PartialEq for Snake {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

impl Eq for Snake {}
