use rand::Rng;

use crate::snake::Position;
use crate::state::GameState;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cell {
    Head,
    Body,
    Food,
    Empty,
}

/// Read-only picture of the board, one cell per square, row-major.
pub struct Grid {
    size: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// Classifies every cell of `state`. Head beats body, body beats food.
    pub fn project<R: Rng>(state: &GameState<R>) -> Self {
        let size = state.board_size();
        let mut cells = vec![Cell::Empty; size as usize * size as usize];
        let index = |pos: Position| pos.y as usize * size as usize + pos.x as usize;

        cells[index(state.food())] = Cell::Food;

        let mut body = state.snake().body().iter();
        if let Some(head) = body.next() {
            for pos in body {
                cells[index(*pos)] = Cell::Body;
            }
            cells[index(*head)] = Cell::Head;
        }

        Grid { size, cells }
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.y as usize * self.size as usize + pos.x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::{Direction, Snake};
    use rand::{rngs::StdRng, SeedableRng};

    fn state(body: &[Position], food: Position) -> GameState {
        GameState::from_parts(
            6,
            Snake::from_segments(body),
            Direction::Right,
            food,
            StdRng::seed_from_u64(1),
        )
    }

    #[test]
    fn test_classifies_cells() {
        let body = [Position::new(2, 1), Position::new(1, 1), Position::new(0, 1)];
        let grid = Grid::project(&state(&body, Position::new(4, 4)));

        assert_eq!(grid.size(), 6);
        assert_eq!(grid.get(Position::new(2, 1)), Cell::Head);
        assert_eq!(grid.get(Position::new(1, 1)), Cell::Body);
        assert_eq!(grid.get(Position::new(0, 1)), Cell::Body);
        assert_eq!(grid.get(Position::new(4, 4)), Cell::Food);
        assert_eq!(grid.get(Position::new(5, 5)), Cell::Empty);

        let counted = grid.cells.iter().filter(|c| **c == Cell::Empty).count();
        assert_eq!(counted, 36 - 4);
    }

    #[test]
    fn test_row_major_layout() {
        let body = [Position::new(1, 0), Position::new(0, 0)];
        let grid = Grid::project(&state(&body, Position::new(3, 2)));

        assert_eq!(grid.cells.len(), 36);
        assert_eq!(grid.cells[2 * 6 + 3], Cell::Food);
        assert_eq!(grid.cells[1], Cell::Head);
        assert_eq!(grid.cells[0], Cell::Body);
    }

    #[test]
    fn test_head_wins_over_food() {
        // After the final meal the food cell sits under the head
        let body = [Position::new(3, 3), Position::new(2, 3)];
        let grid = Grid::project(&state(&body, Position::new(3, 3)));

        assert_eq!(grid.get(Position::new(3, 3)), Cell::Head);
        assert!(!grid.cells.contains(&Cell::Food));
    }
}
