use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ConfigError, GridSize, MIN_SPEED, SPEED_STEP};
use crate::input::GameInput;
use crate::items::ItemSet;
use crate::snake::{Position, Snake};

/// Simulation lifecycle. The transition to `Stopped` is one-way; a stopped
/// game only changes state by being replaced through [`GameState::restart`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Stopped,
}

/// Complete mutable simulation state for one session.
///
/// Owns the snake, both item sets, the score, and its own seedable RNG so
/// separate simulations are independent and replayable.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: ItemSet,
    pub poison: ItemSet,
    pub score: i64,
    pub tick_count: u64,
    pub status: GameStatus,
    bounds: GridSize,
    item_target: usize,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    pub fn new(bounds: GridSize, item_target: usize) -> Result<Self, ConfigError> {
        Self::with_rng(bounds, item_target, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(
        bounds: GridSize,
        item_target: usize,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(bounds, item_target, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, item_target: usize, mut rng: StdRng) -> Result<Self, ConfigError> {
        let snake = Snake::new(bounds);

        // Fail fast when the initial occupancy would leave no room to move;
        // rejection-sampling placement relies on free cells existing.
        let capacity_error = || ConfigError::GridTooSmall {
            total_cells: bounds.total_cells(),
            item_count: item_target,
        };
        if snake.len() + 2 * item_target >= bounds.total_cells() {
            return Err(capacity_error());
        }

        let mut food = ItemSet::new();
        let mut poison = ItemSet::new();
        for _ in 0..item_target {
            replenish(&mut food, &poison, &snake, &mut rng, bounds).ok_or_else(capacity_error)?;
            replenish(&mut poison, &food, &snake, &mut rng, bounds).ok_or_else(capacity_error)?;
        }

        Ok(Self {
            snake,
            food,
            poison,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            bounds,
            item_target,
            rng,
        })
    }

    /// Advances the simulation by one tick. No-op once stopped: score,
    /// items, and body are all frozen.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }

        self.tick_count += 1;
        self.snake.update(self.bounds);

        if !self.snake.is_alive() {
            self.status = GameStatus::Stopped;
            return;
        }

        let head = self.snake.head_cell(self.bounds);

        if self.food.occupies(head) {
            self.score += 1;
            self.food.remove(head);
            self.snake.grow();
            self.snake.speed += SPEED_STEP;
            self.replenish_food();
        }

        // Not an else-if: the placement invariant keeps the sets disjoint,
        // but each set is still checked on its own terms.
        if self.poison.occupies(head) {
            self.score -= 1;
            self.poison.remove(head);
            self.snake.shrink();
            self.snake.speed = (self.snake.speed - SPEED_STEP).max(MIN_SPEED);
            self.replenish_poison();
        }
    }

    /// Applies one external input event. Only heading changes reach the
    /// simulation; quit and restart are outer-loop concerns.
    pub fn apply_input(&mut self, input: GameInput) {
        if let GameInput::Direction(direction) = input {
            if self.status == GameStatus::Running {
                self.snake.set_heading(direction);
            }
        }
    }

    /// Replaces this session with a fresh one on the same grid, reseeded
    /// from OS entropy.
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        *self = Self::new(self.bounds, self.item_target)?;
        Ok(())
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn item_target(&self) -> usize {
        self.item_target
    }

    fn replenish_food(&mut self) {
        if replenish(
            &mut self.food,
            &self.poison,
            &self.snake,
            &mut self.rng,
            self.bounds,
        )
        .is_none()
        {
            // Board saturated: nothing left to eat and nowhere to place.
            self.status = GameStatus::Stopped;
        }
    }

    fn replenish_poison(&mut self) {
        if replenish(
            &mut self.poison,
            &self.food,
            &self.snake,
            &mut self.rng,
            self.bounds,
        )
        .is_none()
        {
            self.status = GameStatus::Stopped;
        }
    }
}

/// Places one point into `set` on a cell free of the snake and both sets.
fn replenish(
    set: &mut ItemSet,
    other: &ItemSet,
    snake: &Snake,
    rng: &mut StdRng,
    bounds: GridSize,
) -> Option<Position> {
    set.place_random(rng, bounds, |cell| {
        !snake.occupies(cell) && !other.occupies(cell)
    })
}
