//! Game state and the per-tick transition.
//!
//! Everything here is free of terminal I/O: the frontend queues directions,
//! calls [`GameState::tick`] once per timer interval and reads the result back.

use std::{error::Error, fmt};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::snake::{Direction, Position, Snake};

pub const DEFAULT_BOARD_SIZE: u16 = 20;
pub const MIN_BOARD_SIZE: u16 = 4;
pub const MAX_BOARD_SIZE: u16 = 60;

const INITIAL_SNAKE_LENGTH: u16 = 2;
const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndReason {
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

impl EndReason {
    pub fn is_win(self) -> bool {
        matches!(self, EndReason::BoardFilled)
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::SelfCollision => f.write_str("You ran into yourself!"),
            EndReason::BoardFilled => f.write_str("You filled the board!"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    Over(EndReason),
}

/// What a single tick did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Moved { new_head: Position, old_tail: Position },
    Ate { new_head: Position, food: Position },
    Over(EndReason),
    /// The game was already over, nothing changed.
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BoardSize { size: u16, min: u16, max: u16 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardSize { size, min, max } => {
                write!(f, "board size {} is outside {}..={}", size, min, max)
            }
        }
    }
}

impl Error for ConfigError {}

pub struct GameState<R = StdRng> {
    board_size: u16,
    snake: Snake,
    direction: Direction,
    queued_direction: Direction,
    food: Position,
    score: u32,
    status: Status,
    rng: R,
}

impl GameState<StdRng> {
    /// A fresh game. With a seed, the food sequence is reproducible.
    pub fn new(board_size: u16, seed: Option<u64>) -> Result<Self, ConfigError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GameState::with_rng(board_size, rng)
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(board_size: u16, rng: R) -> Result<Self, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
            return Err(ConfigError::BoardSize {
                size: board_size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }

        let snake = initial_snake(board_size);
        let mut state = GameState {
            board_size,
            food: snake.head(),
            snake,
            direction: INITIAL_DIRECTION,
            queued_direction: INITIAL_DIRECTION,
            score: 0,
            status: Status::Running,
            rng,
        };
        state.restart();

        Ok(state)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        board_size: u16,
        snake: Snake,
        direction: Direction,
        food: Position,
        rng: R,
    ) -> Self {
        GameState {
            board_size,
            snake,
            direction,
            queued_direction: direction,
            food,
            score: 0,
            status: Status::Running,
            rng,
        }
    }

    pub fn board_size(&self) -> u16 {
        self.board_size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, Status::Over(_))
    }

    /// The direction the last tick moved in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn queued_direction(&self) -> Direction {
        self.queued_direction
    }

    /// Latches `direction` for the next tick. A reversal of the applied
    /// direction is refused, as is any input once the game is over.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.is_over() || direction.is_opposite(self.direction) {
            return false;
        }

        self.queued_direction = direction;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.is_over() {
            return TickOutcome::Idle;
        }

        self.direction = self.queued_direction;
        let new_head = self.snake.head().stepped(self.direction, self.board_size);

        // The tail still counts: it only moves away after the head has moved in
        if self.snake.occupies(new_head) {
            return self.end(EndReason::SelfCollision);
        }

        if new_head != self.food {
            let old_tail = self.snake.advance(new_head, false).unwrap_or(new_head);
            return TickOutcome::Moved { new_head, old_tail };
        }

        let food = self.food;
        self.snake.advance(new_head, true);
        self.score += 1;

        match self.spawn_food() {
            Some(next) => {
                self.food = next;
                TickOutcome::Ate { new_head, food }
            }
            None => self.end(EndReason::BoardFilled),
        }
    }

    /// Back to the opening position with fresh food and a zero score.
    pub fn restart(&mut self) {
        self.snake = initial_snake(self.board_size);
        self.direction = INITIAL_DIRECTION;
        self.queued_direction = INITIAL_DIRECTION;
        self.score = 0;
        self.status = Status::Running;

        match self.spawn_food() {
            Some(food) => self.food = food,
            None => self.status = Status::Over(EndReason::BoardFilled),
        }
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        self.status = Status::Over(reason);
        TickOutcome::Over(reason)
    }

    /// Uniform pick among the cells the snake leaves free; `None` once there are none.
    fn spawn_food(&mut self) -> Option<Position> {
        let size = self.board_size;
        let choices: Vec<Position> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .filter(|pos| !self.snake.occupies(*pos))
            .collect();

        choices.choose(&mut self.rng).copied()
    }
}

/// Two segments heading right, head at (8, 10) on the default board.
fn initial_snake(board_size: u16) -> Snake {
    let head = Position::new(board_size * 2 / 5, board_size / 2);
    Snake::new(head, INITIAL_DIRECTION, INITIAL_SNAKE_LENGTH, board_size)
}
