use std::fmt::Write as _;
use std::io::Write;

use dailyflame_core::catalog::{BehaviorTag, GameDescriptor};
use dailyflame_core::slot::Slot;

use crate::surface::{RenderSurface, SlotCard};

/// Plain-text surface for the terminal front-end.
pub struct TextSurface<W: Write> {
    out: W,
}

impl TextSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::warn!("Failed to write to terminal: {e}");
        }
    }
}

impl<W: Write> RenderSurface for TextSurface<W> {
    fn render_slots(&mut self, cards: &[SlotCard]) {
        let done = cards.iter().filter(|c| c.completed).count();
        let mut text = format!("Today's games ({done}/{}):", cards.len());
        for card in cards {
            let mark = if card.completed { "x" } else { " " };
            let _ = write!(
                text,
                "\n  [{mark}] {}. {} - {}",
                card.slot, card.name, card.description
            );
        }
        self.emit(&text);
    }

    fn set_reward(&mut self, lit: bool) {
        if lit {
            self.emit("The daily flame is lit. See you tomorrow!");
        }
    }

    fn open_modal(&mut self, slot: Slot, descriptor: &GameDescriptor) {
        self.emit(&format!(
            "== {} (slot {slot}) ==\n{}",
            descriptor.name, descriptor.instruction
        ));
    }

    fn render_game(&mut self, slot: Slot, behavior: BehaviorTag, state: &[u8]) {
        match describe_state(behavior, state) {
            Some(text) => self.emit(&format!("[{slot}] {text}")),
            None => tracing::debug!(%slot, ?behavior, "Undrawable game state"),
        }
    }

    fn close_modal(&mut self, slot: Slot) {
        self.emit(&format!("(slot {slot} closed)"));
    }

    fn reload(&mut self) {
        self.emit("-- reloaded --");
    }
}

/// Text rendering of a game state snapshot, or `None` if it cannot be
/// decoded in this build.
pub fn describe_state(behavior: BehaviorTag, state: &[u8]) -> Option<String> {
    match behavior {
        #[cfg(feature = "number-memory")]
        BehaviorTag::NumberMemory => rmp_serde::from_slice(state).ok().map(number_memory),
        #[cfg(feature = "pairs")]
        BehaviorTag::PairMatching => rmp_serde::from_slice(state).ok().map(pairs),
        #[cfg(feature = "tictactoe")]
        BehaviorTag::TicTacToe => rmp_serde::from_slice(state).ok().map(tictactoe),
        #[cfg(feature = "visual-memory")]
        BehaviorTag::VisualMemory => rmp_serde::from_slice(state).ok().map(visual_memory),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

#[cfg(feature = "number-memory")]
fn number_memory(state: dailyflame_number_memory::NumberMemoryState) -> String {
    use dailyflame_number_memory::NumberPhase;

    let shown = state.display.unwrap_or_default();
    match state.phase {
        NumberPhase::Showing => format!("Round {}: remember {shown}", state.length),
        NumberPhase::AwaitingInput => format!("Round {}: type the number", state.length),
        NumberPhase::Correct => "Correct!".to_string(),
        NumberPhase::Incorrect => format!("Wrong, it was {shown}. Type 'restart'."),
        NumberPhase::Finished => "You made it! 'again' to keep going, 'stop' to finish.".to_string(),
    }
}

#[cfg(feature = "pairs")]
fn pairs(state: dailyflame_pairs::PairsState) -> String {
    let mut text = format!("Attempts: {}", state.attempts);
    for (i, card) in state.cards.iter().enumerate() {
        if i % 6 == 0 {
            text.push('\n');
        }
        let face = if card.face_up || card.matched {
            card.symbol.name()
        } else {
            "?"
        };
        let _ = write!(text, "{i:>2}:{face:<11}");
    }
    if state.phase == dailyflame_pairs::PairsPhase::Won {
        text.push_str("\nAll pairs found!");
    }
    text
}

#[cfg(feature = "tictactoe")]
fn tictactoe(state: dailyflame_tictactoe::TicTacToeState) -> String {
    use dailyflame_tictactoe::Phase;
    use dailyflame_tictactoe::board::Mark;

    let mut text = String::new();
    for row in 0..3 {
        text.push('\n');
        for col in 0..3 {
            let cell = row * 3 + col;
            let glyph = match state.board.get(cell) {
                Some(Mark::Circle) => "O".to_string(),
                Some(Mark::Cross) => "X".to_string(),
                None => cell.to_string(),
            };
            let _ = write!(text, " {glyph}");
        }
    }
    let status = match state.phase {
        Phase::PlayerTurn => "Your move",
        Phase::OpponentTurn => "Computer is thinking",
        Phase::PlayerWin => "You won!",
        Phase::OpponentWin => "The computer won.",
        Phase::Draw => "Draw.",
    };
    format!("{status}{text}")
}

#[cfg(feature = "visual-memory")]
fn visual_memory(state: dailyflame_visual_memory::VisualMemoryState) -> String {
    use dailyflame_visual_memory::VisualPhase;

    let header = format!(
        "Level {} | Lives {} | Grid {}x{}",
        state.level, state.lives, state.grid_size, state.grid_size
    );
    let status = match state.phase {
        VisualPhase::Idle => return format!("{header}\nType 'start' to begin."),
        VisualPhase::Won => return format!("{header}\nWell remembered!"),
        VisualPhase::GameOver => return format!("{header}\nOut of lives."),
        VisualPhase::Revealing => "Remember the lit cells",
        VisualPhase::AwaitingClicks => "Click the cells",
        VisualPhase::LevelCleared => "Level cleared!",
        VisualPhase::LifeLost => "Wrong cell!",
    };
    let mut text = format!("{header}\n{status}");
    for cell in 0..state.grid_size * state.grid_size {
        if cell % state.grid_size == 0 {
            text.push('\n');
        }
        let glyph = if state.phase == VisualPhase::Revealing && state.targets.contains(&cell) {
            "#".to_string()
        } else if state.found.contains(&cell) {
            "+".to_string()
        } else if state.missed == Some(cell) {
            "!".to_string()
        } else {
            cell.to_string()
        };
        let _ = write!(text, " {glyph:>2}");
    }
    text
}
