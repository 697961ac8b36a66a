use rand::Rng;
use rand::seq::IndexedRandom;

use crate::board::Board;

/// Pick the opponent's cell uniformly among the empty ones.
///
/// No lookahead: the opponent is meant to be beatable.
pub fn choose_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    board.empty_cells().choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn always_picks_an_empty_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::default();
        for cell in [0, 2, 4, 6, 8] {
            board.place(cell, Mark::Circle);
        }
        for _ in 0..100 {
            let cell = choose_move(&board, &mut rng).unwrap();
            assert!(board.get(cell).is_none());
        }
    }

    #[test]
    fn full_board_has_no_move() {
        let mut board = Board::default();
        for cell in 0..9 {
            board.place(cell, Mark::Cross);
        }
        assert!(choose_move(&board, &mut StdRng::seed_from_u64(0)).is_none());
    }

    #[test]
    fn spreads_over_all_empty_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = Board::default();
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[choose_move(&board, &mut rng).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
