use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::{GameConfig, GridSize, INITIAL_SNAKE_LENGTH};
use crate::direction_queue::DirectionQueue;
use crate::engine::{self, StepOutcome};
use crate::food::Food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    /// Committed direction: the one the last tick moved in.
    pub direction: Direction,
    pub food: Food,
    pub score: u32,
    pub is_over: bool,
    pub is_running: bool,
    pub end_reason: Option<EndReason>,
    /// Ticks that actually moved the snake.
    pub tick_count: u64,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    /// Creates the starting state using `rng` for food placement.
    ///
    /// Bounds smaller than the playable minimum are raised to it.
    #[must_use]
    pub fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let bounds = bounds.playable();
        let snake = starting_snake(bounds);
        let food = spawn_initial_food(&mut rng, bounds, &snake);

        Self {
            snake,
            direction: Direction::Up,
            food,
            score: 0,
            is_over: false,
            is_running: true,
            end_reason: None,
            tick_count: 0,
            bounds,
            rng,
        }
    }

    /// Rebuilds the starting state in place, continuing the RNG stream.
    pub fn reset(&mut self) {
        self.snake = starting_snake(self.bounds);
        self.food = spawn_initial_food(&mut self.rng, self.bounds, &self.snake);
        self.direction = Direction::Up;
        self.score = 0;
        self.is_over = false;
        self.is_running = true;
        self.end_reason = None;
        self.tick_count = 0;

        info!(
            width = self.bounds.width,
            height = self.bounds.height,
            food_x = self.food.position.x,
            food_y = self.food.position.y,
            "game reset"
        );
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Moves the food to a free cell. Returns false when the board is full.
    pub(crate) fn respawn_food(&mut self) -> bool {
        match Food::spawn(&mut self.rng, self.bounds, &self.snake) {
            Some(food) => {
                self.food = food;
                true
            }
            None => false,
        }
    }

    /// Marks the session as over. The snake is left as it was.
    pub(crate) fn end(&mut self, reason: EndReason) {
        self.is_over = true;
        self.end_reason = Some(reason);
    }
}

/// Fixed starting snake: head at the board center, body trailing downwards.
///
/// `bounds` must be [`GridSize::playable`], which leaves room for every segment.
fn starting_snake(bounds: GridSize) -> Snake {
    let head = Position {
        x: i32::from(bounds.width / 2),
        y: i32::from(bounds.height / 2),
    };
    Snake::vertical(head, INITIAL_SNAKE_LENGTH)
}

fn spawn_initial_food(rng: &mut StdRng, bounds: GridSize, snake: &Snake) -> Food {
    Food::spawn(rng, bounds, snake)
        .expect("a playable board always has free cells around the starting snake")
}

/// Single owner of the state and its direction queue.
///
/// Input handlers call [`Game::enqueue_direction`]; the scheduler calls
/// [`Game::step`]; renderers use the read-only accessors.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    queue: DirectionQueue,
}

impl Game {
    /// Starts a session, seeding from the config or from OS entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::from_state(config, GameState::with_rng(config.bounds(), rng))
    }

    /// Starts a reproducible session regardless of the configured seed.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_state(config, GameState::new_with_seed(config.bounds(), seed))
    }

    /// Wraps an existing state with an empty direction queue.
    #[must_use]
    pub fn from_state(config: GameConfig, state: GameState) -> Self {
        info!(
            width = state.bounds().width,
            height = state.bounds().height,
            seeded = config.seed.is_some(),
            "game created"
        );

        Self {
            config,
            state,
            queue: DirectionQueue::new(),
        }
    }

    /// Discards the current session and starts over.
    pub fn reset(&mut self) -> &GameState {
        self.queue.clear();
        self.state.reset();
        &self.state
    }

    /// Buffers a turn for a later tick. Returns whether it was accepted.
    pub fn enqueue_direction(&mut self, requested: Direction) -> bool {
        self.queue.enqueue(requested, self.state.direction)
    }

    /// Advances one tick and returns the resulting state.
    pub fn step(&mut self) -> &GameState {
        self.step_with_outcome();
        &self.state
    }

    /// Advances one tick and reports what happened.
    pub fn step_with_outcome(&mut self) -> StepOutcome {
        engine::step(&mut self.state, &mut self.queue)
    }

    /// Flips between running and paused. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) {
        if !self.state.is_over {
            self.state.is_running = !self.state.is_running;
        }
    }

    pub fn set_running(&mut self, running: bool) {
        if !self.state.is_over {
            self.state.is_running = running;
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn queue(&self) -> &DirectionQueue {
        &self.queue
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.state.snake
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.state.food.position
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.state.score
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.state.end_reason
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.state.bounds()
    }

    /// Interval the scheduler should wait before the next tick.
    #[must_use]
    pub fn tick_interval(&self) -> std::time::Duration {
        self.config.tick_interval(self.state.score)
    }
}
