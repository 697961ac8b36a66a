pub mod board;
pub mod config;
pub mod opponent;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use dailyflame_core::catalog::BehaviorTag;
use dailyflame_core::dailyflame_game_boilerplate;
use dailyflame_core::game_trait::{DailyGame, GameEvent, SlotContext};

use board::{Board, Mark};
use config::TicTacToeConfig;

/// The player's mark.
pub const PLAYER_MARK: Mark = Mark::Circle;
/// The computer's mark.
pub const OPPONENT_MARK: Mark = Mark::Cross;

/// Whose turn it is, or how the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    PlayerTurn,
    OpponentTurn,
    PlayerWin,
    OpponentWin,
    Draw,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::PlayerWin | Phase::OpponentWin | Phase::Draw)
    }
}

/// Serializable game state for the render surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeState {
    pub board: Board,
    pub phase: Phase,
    /// Set once the end-of-game pause has elapsed.
    pub finished: bool,
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self {
            board: Board::default(),
            phase: Phase::PlayerTurn,
            finished: false,
        }
    }
}

/// Player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicTacToeInput {
    /// Place the player's mark on `cell` (0..9, row-major).
    Place { cell: u8 },
    /// Clear the board; the player always moves first.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicTacToeTimer {
    /// End-of-game pause elapsed.
    Finish,
}

/// Tic-tac-toe against a random opponent, implementing `DailyGame`.
pub struct TicTacToe {
    state: TicTacToeState,
    config: TicTacToeConfig,
    rng: StdRng,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self::with_rng(TicTacToeConfig::default(), StdRng::from_os_rng())
    }

    pub fn with_config(config: TicTacToeConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic opponent for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(TicTacToeConfig::default(), StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: TicTacToeConfig, rng: StdRng) -> Self {
        Self {
            state: TicTacToeState::default(),
            config,
            rng,
        }
    }

    pub fn state(&self) -> &TicTacToeState {
        &self.state
    }

    fn reset(&mut self, ctx: &mut SlotContext<'_>) {
        ctx.cancel_all();
        self.state = TicTacToeState::default();
    }

    fn place(&mut self, cell: usize, ctx: &mut SlotContext<'_>) {
        if self.state.phase != Phase::PlayerTurn || !self.state.board.place(cell, PLAYER_MARK) {
            return;
        }
        if self.settle(PLAYER_MARK, ctx) {
            return;
        }

        self.state.phase = Phase::OpponentTurn;
        let Some(reply) = opponent::choose_move(&self.state.board, &mut self.rng) else {
            return;
        };
        self.state.board.place(reply, OPPONENT_MARK);
        if !self.settle(OPPONENT_MARK, ctx) {
            self.state.phase = Phase::PlayerTurn;
        }
    }

    /// Check for a win by `mover`, then for a draw. On either, enter the
    /// terminal phase and schedule the closing pause.
    fn settle(&mut self, mover: Mark, ctx: &mut SlotContext<'_>) -> bool {
        let phase = if self.state.board.has_line(mover) {
            if mover == PLAYER_MARK {
                Phase::PlayerWin
            } else {
                Phase::OpponentWin
            }
        } else if self.state.board.is_full() {
            Phase::Draw
        } else {
            return false;
        };
        tracing::debug!(slot = %ctx.slot(), ?phase, "Tic-tac-toe over");
        self.state.phase = phase;
        ctx.schedule(self.config.end_delay_ms, &TicTacToeTimer::Finish);
        true
    }

    fn handle_input(
        &mut self,
        input: TicTacToeInput,
        ctx: &mut SlotContext<'_>,
    ) -> Vec<GameEvent> {
        match input {
            TicTacToeInput::Place { cell } => self.place(usize::from(cell), ctx),
            TicTacToeInput::Reset => self.reset(ctx),
        }
        Vec::new()
    }

    fn handle_timer(
        &mut self,
        timer: TicTacToeTimer,
        _ctx: &mut SlotContext<'_>,
    ) -> Vec<GameEvent> {
        match timer {
            TicTacToeTimer::Finish if self.state.phase.is_terminal() && !self.state.finished => {
                self.state.finished = true;
                // Only a player win counts toward the day; losses and draws
                // just close.
                if self.state.phase == Phase::PlayerWin {
                    vec![GameEvent::Completed, GameEvent::CloseRequested]
                } else {
                    vec![GameEvent::CloseRequested]
                }
            },
            TicTacToeTimer::Finish => Vec::new(),
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyGame for TicTacToe {
    fn behavior(&self) -> BehaviorTag {
        BehaviorTag::TicTacToe
    }

    fn start(&mut self, ctx: &mut SlotContext<'_>) -> Vec<GameEvent> {
        self.reset(ctx);
        Vec::new()
    }

    dailyflame_game_boilerplate!(
        state_type: TicTacToeState,
        input_type: TicTacToeInput,
        timer_type: TicTacToeTimer
    );

    fn is_finished(&self) -> bool {
        self.state.phase.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dailyflame_core::test_helpers::{
        GameHarness, contract_cancel_all_quiesces, contract_malformed_bytes_ignored,
        contract_start_creates_state, encode,
    };

    fn started(seed: u64) -> GameHarness<TicTacToe> {
        let mut h = GameHarness::new(TicTacToe::with_seed(seed));
        h.start();
        h
    }

    fn place(h: &mut GameHarness<TicTacToe>, cell: u8) -> Vec<GameEvent> {
        h.input(&TicTacToeInput::Place { cell })
    }

    /// Play cells in order (skipping occupied ones) until the game ends.
    fn play_out(h: &mut GameHarness<TicTacToe>) -> usize {
        let mut moves = 0;
        for _ in 0..9 {
            if h.game.state().phase.is_terminal() {
                break;
            }
            let cell = h.game.state().board.empty_cells()[0];
            place(h, cell as u8);
            moves += 1;
        }
        moves
    }

    #[test]
    fn player_moves_first_then_opponent_replies() {
        let mut h = started(1);
        assert_eq!(h.game.state().phase, Phase::PlayerTurn);
        place(&mut h, 4);
        let board = h.game.state().board;
        assert_eq!(board.get(4), Some(PLAYER_MARK));
        assert_eq!(
            board.cells.iter().filter(|c| **c == Some(OPPONENT_MARK)).count(),
            1
        );
        assert_eq!(h.game.state().phase, Phase::PlayerTurn);
    }

    #[test]
    fn occupied_cell_is_ignored() {
        let mut h = started(2);
        place(&mut h, 0);
        let before = h.game.state().clone();
        place(&mut h, 0);
        let taken = before
            .board
            .cells
            .iter()
            .position(|c| *c == Some(OPPONENT_MARK))
            .unwrap();
        place(&mut h, taken as u8);
        place(&mut h, 42);
        assert_eq!(h.game.state(), &before);
    }

    #[test]
    fn player_win_completes_after_pause() {
        let mut h = started(0);
        h.game.state.board.place(0, PLAYER_MARK);
        h.game.state.board.place(1, PLAYER_MARK);
        h.game.state.board.place(3, OPPONENT_MARK);
        h.game.state.board.place(4, OPPONENT_MARK);

        assert!(place(&mut h, 2).is_empty());
        assert_eq!(h.game.state().phase, Phase::PlayerWin);
        assert!(h.game.is_finished());

        assert!(h.advance(799).is_empty());
        let events = h.advance(1);
        assert_eq!(events, vec![GameEvent::Completed, GameEvent::CloseRequested]);
        assert_eq!(h.completions(), 1);
    }

    #[test]
    fn opponent_win_closes_without_completion() {
        let mut h = started(0);
        // O X O / X X _ / _ O X
        for (cell, mark) in [
            (0, PLAYER_MARK),
            (3, OPPONENT_MARK),
            (4, OPPONENT_MARK),
            (2, PLAYER_MARK),
            (1, OPPONENT_MARK),
            (7, PLAYER_MARK),
            (8, OPPONENT_MARK),
        ] {
            h.game.state.board.place(cell, mark);
        }
        // Free: 5 and 6. Player takes 6; the opponent must take 5 and wins 3-4-5.
        place(&mut h, 6);
        assert_eq!(h.game.state().phase, Phase::OpponentWin);
        let events = h.advance(800);
        assert_eq!(events, vec![GameEvent::CloseRequested]);
        assert_eq!(h.completions(), 0);
    }

    #[test]
    fn draw_closes_without_completion() {
        let mut h = started(0);
        // O X O / O X X / X O _ : player filling 8 draws.
        for (cell, mark) in [
            (0, PLAYER_MARK),
            (1, OPPONENT_MARK),
            (2, PLAYER_MARK),
            (3, PLAYER_MARK),
            (4, OPPONENT_MARK),
            (5, OPPONENT_MARK),
            (6, OPPONENT_MARK),
            (7, PLAYER_MARK),
        ] {
            h.game.state.board.place(cell, mark);
        }
        place(&mut h, 8);
        assert_eq!(h.game.state().phase, Phase::Draw);
        assert_eq!(h.advance(800), vec![GameEvent::CloseRequested]);
        assert_eq!(h.completions(), 0);
    }

    #[test]
    fn no_moves_after_game_over() {
        let mut h = started(0);
        for (cell, mark) in [(0, PLAYER_MARK), (1, PLAYER_MARK), (3, OPPONENT_MARK)] {
            h.game.state.board.place(cell, mark);
        }
        place(&mut h, 2);
        let over = h.game.state().clone();
        place(&mut h, 5);
        assert_eq!(h.game.state(), &over);
    }

    #[test]
    fn reset_clears_board_and_cancels_pending_close() {
        let mut h = started(0);
        for (cell, mark) in [(0, PLAYER_MARK), (1, PLAYER_MARK), (3, OPPONENT_MARK)] {
            h.game.state.board.place(cell, mark);
        }
        place(&mut h, 2);
        assert_eq!(h.pending(), 1);

        h.input(&TicTacToeInput::Reset);
        assert_eq!(h.pending(), 0);
        assert_eq!(h.game.state(), &TicTacToeState::default());
        assert!(h.advance(5_000).is_empty());
        assert_eq!(h.completions(), 0);
    }

    #[test]
    fn random_games_terminate_within_nine_moves() {
        let mut terminated = 0;
        for seed in 0..200 {
            let mut h = started(seed);
            let moves = play_out(&mut h);
            assert!(moves <= 5, "player places at most 5 marks");
            if h.game.state().phase.is_terminal() {
                terminated += 1;
            }
            let marks = h.game.state().board.cells.iter().flatten().count();
            assert!(marks <= 9);
        }
        assert_eq!(terminated, 200);
    }

    #[test]
    fn contract_start_creates_state_tictactoe() {
        contract_start_creates_state(TicTacToe::with_seed(0));
    }

    #[test]
    fn contract_malformed_bytes_ignored_tictactoe() {
        contract_malformed_bytes_ignored(TicTacToe::with_seed(0));
    }

    #[test]
    fn contract_cancel_all_quiesces_tictactoe() {
        contract_cancel_all_quiesces(
            TicTacToe::with_seed(0),
            Some(encode(&TicTacToeInput::Place { cell: 4 })),
        );
    }
}
