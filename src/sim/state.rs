use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use rand::Rng;

use crate::config::GameConfig;
use crate::sim::engine::place_food;

/// A cell on the grid. Valid coordinates are 0..grid_size on both axes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn shifted(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Position::new(self.x, self.y - 1),
            Direction::Down => Position::new(self.x, self.y + 1),
            Direction::Left => Position::new(self.x - 1, self.y),
            Direction::Right => Position::new(self.x + 1, self.y),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }
}

/// Lifecycle of a single run. A fresh state starts Idle and is promoted to
/// Running by `start`; Over is terminal until the driver replaces the state.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The grid cannot hold the initial body without overlapping itself.
    GridTooSmall { grid_size: i16, required: i16 },
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StateError::GridTooSmall {
                grid_size,
                required,
            } => write!(
                f,
                "grid size {grid_size} cannot hold an initial snake of length {required}"
            ),
        }
    }
}

impl Error for StateError {}

/// The authoritative model of one run: body, food, direction, score, phase.
///
/// Mutation happens in exactly two places: `engine::tick` (driven by the
/// scheduler) and `set_intended_direction` (driven by input events, buffered
/// until the next tick boundary). Everything else reads.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) grid_size: i16,
    pub(crate) food_reward: u32,
    /// Head first; the tail is the back.
    pub(crate) body: VecDeque<Position>,
    pub(crate) food: Position,
    /// Direction the last tick actually moved in.
    pub(crate) direction: Direction,
    /// Buffered request, committed at the start of the next tick.
    pub(crate) intended_direction: Direction,
    pub(crate) score: u32,
    pub(crate) phase: Phase,
}

impl GameState {
    /// Seeds a body of `initial_length` cells centered on the grid, facing
    /// Right, with food on a free cell. The state starts Idle.
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Result<Self, StateError> {
        if config.grid_size < config.initial_length || config.initial_length < 1 {
            return Err(StateError::GridTooSmall {
                grid_size: config.grid_size,
                required: config.initial_length,
            });
        }

        let center = config.grid_size / 2;
        // On the smallest valid grids the center column is shorter than the
        // body; push the head right so every segment stays on-board.
        let head_x = center.max(config.initial_length - 1);
        let body: VecDeque<Position> = (0..config.initial_length)
            .map(|i| Position::new(head_x - i, center))
            .collect();

        let food = place_food(&body, config.grid_size, rng)
            .expect("a validated grid always has a free cell for food");

        Ok(Self {
            grid_size: config.grid_size,
            food_reward: config.food_reward,
            body,
            food,
            direction: Direction::Right,
            intended_direction: Direction::Right,
            score: 0,
            phase: Phase::Idle,
        })
    }

    /// Buffers a direction request. Ignored while not Running, and ignored
    /// when `direction` reverses the currently committed one; the committed
    /// direction, not the buffer, is what the reversal check runs against.
    /// Rapid requests before the next tick overwrite each other.
    pub fn set_intended_direction(&mut self, direction: Direction) {
        if self.phase != Phase::Running {
            return;
        }
        if direction.is_opposite(self.direction) {
            return;
        }
        self.intended_direction = direction;
    }

    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    pub fn head(&self) -> Position {
        *self.body.front().expect("body is never empty")
    }

    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn grid_size(&self) -> i16 {
        self.grid_size
    }
}
