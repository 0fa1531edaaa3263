use std::collections::VecDeque;

use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit vector of one step, y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub const fn new(x: u16, y: u16) -> Self {
        Position { x, y }
    }

    /// One cell further in `direction`, wrapping around a `board_size` square board.
    pub fn stepped(self, direction: Direction, board_size: u16) -> Position {
        let (dx, dy) = direction.delta();
        let size = i32::from(board_size);
        let x = (i32::from(self.x) + dx).rem_euclid(size);
        let y = (i32::from(self.y) + dy).rem_euclid(size);
        Position::new(x as u16, y as u16)
    }
}

/// Snake body, head first.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Lays out `length` segments in a straight line trailing behind `head`.
    pub fn new(head: Position, direction: Direction, length: u16, board_size: u16) -> Self {
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(length as usize);
        let mut pos = head;

        for _ in 0..length {
            body.push_back(pos);
            pos = pos.stepped(back, board_size);
        }

        Snake { body }
    }

    #[cfg(test)]
    pub fn from_segments(segments: &[Position]) -> Self {
        Snake { body: segments.iter().copied().collect() }
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Puts a new head in front. Unless growing, the tail is dropped and returned.
    pub fn advance(&mut self, new_head: Position, grow: bool) -> Option<Position> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }
}
