use serde::{Deserialize, Serialize};

/// Number of cells on the 3x3 board.
pub const CELL_COUNT: usize = 9;

/// The eight lines of three that win.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A mark on the board. The player is always `Circle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    Circle,
    Cross,
}

/// Row-major 3x3 board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Option<Mark>; CELL_COUNT],
}

impl Board {
    pub fn get(&self, cell: usize) -> Option<Mark> {
        self.cells.get(cell).copied().flatten()
    }

    /// Place `mark` on an empty in-range cell. Returns whether it was placed.
    pub fn place(&mut self, cell: usize, mark: Mark) -> bool {
        match self.cells.get_mut(cell) {
            Some(slot @ None) => {
                *slot = Some(mark);
                true
            },
            _ => false,
        }
    }

    /// Whether `mark` fills any line of three.
    pub fn has_line(&self, mark: Mark) -> bool {
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == Some(mark)))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&i| self.cells[i].is_none()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_rejects_occupied_and_out_of_range() {
        let mut board = Board::default();
        assert!(board.place(4, Mark::Circle));
        assert!(!board.place(4, Mark::Cross));
        assert!(!board.place(9, Mark::Cross));
        assert_eq!(board.get(4), Some(Mark::Circle));
        assert_eq!(board.empty_cells().len(), 8);
    }

    #[test]
    fn mixed_line_is_not_a_win() {
        let mut board = Board::default();
        board.place(0, Mark::Circle);
        board.place(1, Mark::Cross);
        board.place(2, Mark::Circle);
        assert!(!board.has_line(Mark::Circle));
        assert!(!board.has_line(Mark::Cross));
    }

    #[test]
    fn full_board_without_line_is_full() {
        use Mark::{Circle as O, Cross as X};
        let board = Board {
            cells: [
                Some(O),
                Some(X),
                Some(O),
                Some(O),
                Some(X),
                Some(X),
                Some(X),
                Some(O),
                Some(O),
            ],
        };
        assert!(board.is_full());
        assert!(!board.has_line(O));
        assert!(!board.has_line(X));
        assert!(board.empty_cells().is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_full_line_is_detected(line in 0usize..8, cross in any::<bool>()) {
                let mark = if cross { Mark::Cross } else { Mark::Circle };
                let mut board = Board::default();
                for &i in &WIN_LINES[line] {
                    board.place(i, mark);
                }
                prop_assert!(board.has_line(mark));
                let other = if cross { Mark::Circle } else { Mark::Cross };
                prop_assert!(!board.has_line(other));
            }
        }
    }
}
