pub mod config;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use dailyflame_core::catalog::BehaviorTag;
use dailyflame_core::dailyflame_game_boilerplate;
use dailyflame_core::game_trait::{DailyGame, GameEvent, SlotContext};

use config::NumberMemoryConfig;

/// A random string of `len` decimal digits. Leading zeros are allowed.
pub fn generate_number<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberPhase {
    /// The number is on screen.
    Showing,
    /// The number is hidden and an answer is expected.
    AwaitingInput,
    /// Right answer; the next round starts shortly.
    Correct,
    /// Wrong answer; the correct number is revealed until restart.
    Incorrect,
    /// The winning round was reached; play again or stop.
    Finished,
}

/// Serializable game state for the render surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberMemoryState {
    /// Digits in the current round; also the round number.
    pub length: usize,
    pub phase: NumberPhase,
    /// What the display shows: the number while showing, the correct answer
    /// after a miss, otherwise nothing.
    pub display: Option<String>,
    /// Whether this session already reported its completion.
    pub completed: bool,
}

impl Default for NumberMemoryState {
    fn default() -> Self {
        Self {
            length: 1,
            phase: NumberPhase::Showing,
            display: None,
            completed: false,
        }
    }
}

/// Player actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberMemoryInput {
    Submit { answer: String },
    /// After a miss: start over from one digit.
    Restart,
    /// After finishing: keep going with longer numbers.
    PlayAgain,
    /// After finishing: close the game.
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberMemoryTimer {
    Hide,
    NextRound,
}

/// Remember-the-number game, implementing `DailyGame`.
pub struct NumberMemory {
    state: NumberMemoryState,
    secret: String,
    config: NumberMemoryConfig,
    rng: StdRng,
}

impl NumberMemory {
    pub fn new() -> Self {
        Self::with_rng(NumberMemoryConfig::default(), StdRng::from_os_rng())
    }

    pub fn with_config(config: NumberMemoryConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(NumberMemoryConfig::default(), StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: NumberMemoryConfig, rng: StdRng) -> Self {
        Self {
            state: NumberMemoryState::default(),
            secret: String::new(),
            config,
            rng,
        }
    }

    pub fn state(&self) -> &NumberMemoryState {
        &self.state
    }

    /// The number the player must reproduce this round.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    fn start_round(&mut self, ctx: &mut SlotContext<'_>) {
        ctx.cancel_all();
        self.secret = generate_number(self.state.length, &mut self.rng);
        self.state.phase = NumberPhase::Showing;
        self.state.display = Some(self.secret.clone());
        ctx.schedule(self.config.show_ms, &NumberMemoryTimer::Hide);
    }

    fn submit(&mut self, answer: &str, ctx: &mut SlotContext<'_>) -> Vec<GameEvent> {
        if self.state.phase != NumberPhase::AwaitingInput {
            return Vec::new();
        }
        if answer.trim() != self.secret {
            self.state.phase = NumberPhase::Incorrect;
            self.state.display = Some(self.secret.clone());
            return Vec::new();
        }

        self.state.length += 1;
        if self.state.length > self.config.win_rounds {
            ctx.cancel_all();
            self.state.phase = NumberPhase::Finished;
            self.state.display = None;
            if self.state.completed {
                return Vec::new();
            }
            self.state.completed = true;
            tracing::debug!(slot = %ctx.slot(), rounds = self.config.win_rounds, "Number memory won");
            return vec![GameEvent::Completed];
        }
        self.state.phase = NumberPhase::Correct;
        ctx.schedule(self.config.advance_ms, &NumberMemoryTimer::NextRound);
        Vec::new()
    }

    fn handle_input(
        &mut self,
        input: NumberMemoryInput,
        ctx: &mut SlotContext<'_>,
    ) -> Vec<GameEvent> {
        match (input, self.state.phase) {
            (NumberMemoryInput::Submit { answer }, _) => self.submit(&answer, ctx),
            (NumberMemoryInput::Restart, NumberPhase::Incorrect) => {
                self.state.length = 1;
                self.start_round(ctx);
                Vec::new()
            },
            (NumberMemoryInput::PlayAgain, NumberPhase::Finished) => {
                self.start_round(ctx);
                Vec::new()
            },
            (NumberMemoryInput::Stop, NumberPhase::Finished) => vec![GameEvent::CloseRequested],
            _ => Vec::new(),
        }
    }

    fn handle_timer(
        &mut self,
        timer: NumberMemoryTimer,
        ctx: &mut SlotContext<'_>,
    ) -> Vec<GameEvent> {
        match (timer, self.state.phase) {
            (NumberMemoryTimer::Hide, NumberPhase::Showing) => {
                self.state.display = None;
                self.state.phase = NumberPhase::AwaitingInput;
            },
            (NumberMemoryTimer::NextRound, NumberPhase::Correct) => self.start_round(ctx),
            _ => {},
        }
        Vec::new()
    }
}

impl Default for NumberMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyGame for NumberMemory {
    fn behavior(&self) -> BehaviorTag {
        BehaviorTag::NumberMemory
    }

    fn start(&mut self, ctx: &mut SlotContext<'_>) -> Vec<GameEvent> {
        self.state = NumberMemoryState::default();
        self.start_round(ctx);
        Vec::new()
    }

    dailyflame_game_boilerplate!(
        state_type: NumberMemoryState,
        input_type: NumberMemoryInput,
        timer_type: NumberMemoryTimer
    );

    fn is_finished(&self) -> bool {
        self.state.phase == NumberPhase::Finished
    }
}
