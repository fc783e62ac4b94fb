use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, trace};

use super::{config::GameConfig, direction::Direction};
use crate::render::{Color, DrawSurface, PixelRect};

pub const BACKGROUND_COLOR: Color = Color::BLACK;
pub const SNAKE_COLOR: Color = Color::WHITE;
pub const FOOD_COLOR: Color = Color::RED;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position in a direction, without wrapping
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Bring a position that is at most one cell off the grid back onto it,
    /// treating each axis as a ring.
    pub fn wrapped(self, width: i32, height: i32) -> Self {
        let mut pos = self;
        if pos.x < 0 {
            pos.x = width - 1;
        } else if pos.x >= width {
            pos.x = 0;
        }
        if pos.y < 0 {
            pos.y = height - 1;
        } else if pos.y >= height {
            pos.y = 0;
        }
        pos
    }

    pub fn is_on_grid(&self, width: i32, height: i32) -> bool {
        (0..width).contains(&self.x) && (0..height).contains(&self.y)
    }
}

/// One piece of the snake, head first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakeSegment {
    pub position: GridPosition,
    pub direction: Direction,
}

impl SnakeSegment {
    pub fn new(position: GridPosition, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// The head ran into the body. Terminal.
    GameOver,
}

/// What a call to [`GameState::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not enough time accumulated for a tick; nothing moved
    Idle,
    /// One simulation step ran and the frame should be redrawn
    Stepped,
    GameOver,
}

impl TickOutcome {
    pub fn stepped(&self) -> bool {
        matches!(self, TickOutcome::Stepped)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, TickOutcome::GameOver)
    }
}

/// Complete game state
///
/// The snake moves one cell per tick on a toroidal grid. Time is fed in with
/// [`advance`](GameState::advance), steering with
/// [`handle_direction_input`](GameState::handle_direction_input), and the
/// current frame is drawn with [`render`](GameState::render).
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    config: GameConfig,
    /// Segments with the head at index 0; never empty
    snake: Vec<SnakeSegment>,
    food: GridPosition,
    /// Seconds of simulated time not yet consumed by a tick
    accumulator: f64,
    /// Set once a direction change is accepted, cleared by the next tick
    awaiting_move: bool,
    status: GameStatus,
    rng: R,
}

impl GameState<StdRng> {
    /// Start a game with an OS-seeded random source
    pub fn from_entropy(config: GameConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }

    /// Start a game whose food placement is fully determined by `seed`
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Start a game: a single head segment in the middle of the grid facing
    /// up, and food on a random cell.
    ///
    /// `config` must have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let head = GridPosition::new(config.grid_width / 2, config.grid_height / 2);
        let food = random_cell(&config, &mut rng);

        Self {
            snake: vec![SnakeSegment::new(head, Direction::Up)],
            food,
            accumulator: 0.0,
            awaiting_move: false,
            status: GameStatus::Running,
            config,
            rng,
        }
    }

    /// Feed elapsed wall time into the simulation. Runs at most one tick per
    /// call; leftover time stays in the accumulator for the next call.
    pub fn advance(&mut self, delta_seconds: f64) -> TickOutcome {
        if self.status == GameStatus::GameOver {
            return TickOutcome::GameOver;
        }

        self.accumulator += delta_seconds.max(0.0);
        if self.accumulator < self.config.tick_length {
            return TickOutcome::Idle;
        }
        self.accumulator -= self.config.tick_length;

        self.step()
    }

    fn step(&mut self) -> TickOutcome {
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let head = self.snake[0];
        let next = head.position.moved_in_direction(head.direction).wrapped(width, height);

        // The tail has not moved yet, so it counts as an obstacle too.
        if self.snake[1..].iter().any(|segment| segment.position == next) {
            self.status = GameStatus::GameOver;
            info!(length = self.snake.len(), x = next.x, y = next.y, "snake ran into itself");
            return TickOutcome::GameOver;
        }

        if next == self.food {
            self.relocate_food();
            self.grow();
            debug!(
                length = self.snake.len(),
                food_x = self.food.x,
                food_y = self.food.y,
                "food eaten"
            );
        }

        self.snake[0].position = next;

        // Each trailing segment moves along its own heading, then takes the
        // heading the segment ahead had before this tick.
        let mut heading_ahead = head.direction;
        for segment in self.snake.iter_mut().skip(1) {
            segment.position = segment
                .position
                .moved_in_direction(segment.direction)
                .wrapped(width, height);
            let own = segment.direction;
            segment.direction = heading_ahead;
            heading_ahead = own;
        }

        self.awaiting_move = false;
        TickOutcome::Stepped
    }

    /// Append a copy of the tail one cell behind it, so that after this
    /// tick's movement the snake is exactly one segment longer.
    fn grow(&mut self) {
        let mut tail = self.snake[self.snake.len() - 1];
        tail.position = tail
            .position
            .moved_in_direction(tail.direction.opposite())
            .wrapped(self.config.grid_width, self.config.grid_height);
        self.snake.push(tail);
    }

    /// Move food to a uniformly random cell. Cells under the snake are not
    /// excluded.
    fn relocate_food(&mut self) {
        self.food = random_cell(&self.config, &mut self.rng);
    }

    /// Steer the head. At most one change is accepted per tick, and the head
    /// can never turn straight back on itself.
    pub fn handle_direction_input(&mut self, requested: Direction) -> bool {
        if self.status == GameStatus::GameOver || self.awaiting_move {
            trace!(?requested, "direction input dropped until next tick");
            return false;
        }

        let current = self.snake[0].direction;
        if current.is_opposite(requested) {
            trace!(?requested, ?current, "reverse direction rejected");
            return false;
        }

        self.snake[0].direction = requested;
        self.awaiting_move = true;
        trace!(?requested, "direction accepted");
        true
    }
}

impl<R> GameState<R> {
    /// Draw the current frame. Cells are square, sized from the surface
    /// width alone.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let tile = surface.width() as f32 / self.config.grid_width as f32;

        surface.clear(BACKGROUND_COLOR);
        for segment in &self.snake {
            surface.fill_rect(cell_rect(segment.position, tile), SNAKE_COLOR);
        }
        surface.fill_rect(cell_rect(self.food, tile), FOOD_COLOR);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &[SnakeSegment] {
        &self.snake
    }

    pub fn head(&self) -> SnakeSegment {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    /// Always false; the snake has at least a head
    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn food(&self) -> GridPosition {
        self.food
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn is_awaiting_move(&self) -> bool {
        self.awaiting_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: GridPosition) -> bool {
        self.snake.iter().any(|segment| segment.position == pos)
    }
}

fn random_cell<R: Rng>(config: &GameConfig, rng: &mut R) -> GridPosition {
    let x = rng.gen_range(0..config.grid_width);
    let y = rng.gen_range(0..config.grid_height);
    GridPosition::new(x, y)
}

fn cell_rect(pos: GridPosition, tile: f32) -> PixelRect {
    PixelRect::new(pos.x as f32 * tile, pos.y as f32 * tile, tile, tile)
}
