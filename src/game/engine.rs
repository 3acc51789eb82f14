use tracing::{debug, info};

use super::{
    config::EngineConfig,
    direction::Direction,
    error::EngineError,
    rng::FoodRng,
    state::{GameOverReason, Position, Snake},
};

/// Random draws tried before falling back to enumerating the free cells
const MAX_REJECTED_SAMPLES: usize = 64;

/// What a single [`Engine::update`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Set when this step ended the game
    pub collision: Option<GameOverReason>,
}

/// The snake game engine.
///
/// Owns the grid, the snake, the food and the score. It has no notion of
/// time: the caller decides how often to call [`update`](Engine::update),
/// and reads the state back through the accessors between steps.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    snake: Snake,
    food: Vec<Position>,
    direction: Direction,
    score: u32,
    game_over: GameOverReason,
    rng: FoodRng,
}

impl Engine {
    /// Create an engine with a `width` x `height` grid and default rules
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::new(width, height))
    }

    /// Create an engine from a full configuration
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => FoodRng::new(seed),
            None => FoodRng::from_entropy(),
        };

        let mut engine = Self {
            snake: Snake::new(Position::new(0, 0)),
            food: Vec::new(),
            direction: Direction::Left,
            score: 0,
            game_over: GameOverReason::None,
            rng,
            config,
        };
        engine.reset();
        Ok(engine)
    }

    /// Start a new game: one-segment snake in the centre heading left,
    /// fresh food, score 0. Grid size and rule flags are kept.
    pub fn reset(&mut self) {
        let center = Position::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );
        self.snake = Snake::new(center);
        self.food.clear();
        self.spawn_food(self.config.initial_food);
        self.direction = Direction::Left;
        self.game_over = GameOverReason::None;
        self.score = 0;

        info!(x = center.x, y = center.y, "game reset");
    }

    /// Change direction unless it would reverse the snake onto itself.
    ///
    /// Returns whether the direction was accepted. Several calls between two
    /// updates are allowed; the latest accepted one wins.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advance the game by one step. Does nothing once the game is over.
    pub fn update(&mut self) -> StepInfo {
        if self.is_game_over() {
            return StepInfo::default();
        }

        let (width, height) = (self.config.grid_width, self.config.grid_height);

        let new_head = self.snake.head().moved_in_direction(self.direction);
        self.snake.push_head(new_head);
        self.snake.pop_tail();

        // Eating pushes one more head further along; matched before wrapping
        let ate_food = self.take_food_at(new_head);
        if ate_food {
            self.snake
                .push_head(new_head.moved_in_direction(self.direction));
            self.score = self.score.saturating_add(1);
            debug!(x = new_head.x, y = new_head.y, score = self.score, "food eaten");
        }

        if self.config.loop_at_edge {
            self.snake.wrap_into(width, height);
        } else if !self.snake.in_bounds(width, height) {
            self.game_over = GameOverReason::EdgeCollision;
        }

        if self.config.collide_with_snake && self.snake.has_overlap() {
            self.game_over = GameOverReason::SelfCollision;
        }

        // Replacement food goes down once the body has settled on the grid
        if ate_food {
            self.spawn_food(1);
        }

        let collision = self.game_over.is_over().then_some(self.game_over);
        if let Some(reason) = collision {
            info!(
                reason = ?reason,
                score = self.score,
                length = self.snake.len(),
                "game over"
            );
        }

        StepInfo {
            ate_food,
            collision,
        }
    }

    /// Spawn up to `count` food items on random free cells.
    ///
    /// Food never lands on the snake or on other food. Returns how many items
    /// were placed, which is less than `count` only when the grid is full.
    pub fn spawn_food(&mut self, count: usize) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            let Some(cell) = self.free_cell() else {
                debug!(requested = count, spawned, "no free cell left for food");
                break;
            };
            self.food.push(cell);
            spawned += 1;
            debug!(x = cell.x, y = cell.y, "food spawned");
        }
        spawned
    }

    /// Put food on a specific cell.
    ///
    /// Returns `Ok(false)` if the cell already holds food.
    pub fn place_food(&mut self, cell: Position) -> Result<bool, EngineError> {
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        if !cell.in_bounds(width, height) {
            return Err(EngineError::CellOutOfBounds {
                x: cell.x,
                y: cell.y,
                width,
                height,
            });
        }
        if self.food.contains(&cell) {
            return Ok(false);
        }
        self.food.push(cell);
        Ok(true)
    }

    /// Remove all food from the grid
    pub fn clear_food(&mut self) {
        self.food.clear();
    }

    pub fn set_loop_at_edge(&mut self, loop_at_edge: bool) {
        self.config.loop_at_edge = loop_at_edge;
    }

    pub fn set_collide_with_snake(&mut self, collide_with_snake: bool) {
        self.config.collide_with_snake = collide_with_snake;
    }

    pub fn grid_width(&self) -> usize {
        self.config.grid_width
    }

    pub fn grid_height(&self) -> usize {
        self.config.grid_height
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Snapshot of the snake, head first
    pub fn segments(&self) -> Vec<Position> {
        self.snake.segments()
    }

    /// Snapshot of the food cells, in no particular order
    pub fn food(&self) -> Vec<Position> {
        self.food.clone()
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_over()
    }

    pub fn game_over_reason(&self) -> GameOverReason {
        self.game_over
    }

    pub fn loop_at_edge(&self) -> bool {
        self.config.loop_at_edge
    }

    pub fn collide_with_snake(&self) -> bool {
        self.config.collide_with_snake
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed of the food RNG, for replaying a game
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Remove the food item at `cell`, if any
    fn take_food_at(&mut self, cell: Position) -> bool {
        match self.food.iter().position(|&f| f == cell) {
            Some(index) => {
                self.food.swap_remove(index);
                true
            }
            None => false,
        }
    }

    fn is_free(&self, cell: Position) -> bool {
        !self.snake.occupies(cell) && !self.food.contains(&cell)
    }

    fn free_cell(&mut self) -> Option<Position> {
        let (width, height) = (self.config.grid_width, self.config.grid_height);

        for _ in 0..MAX_REJECTED_SAMPLES {
            let cell = self.rng.cell(width, height);
            if self.is_free(cell) {
                return Some(cell);
            }
        }

        // Crowded grid: pick among what's left
        let free: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|&cell| self.is_free(cell))
            .collect();
        self.rng.choose(&free)
    }
}
