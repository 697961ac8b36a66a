pub mod config;
pub mod deck;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use dailyflame_core::catalog::BehaviorTag;
use dailyflame_core::dailyflame_game_boilerplate;
use dailyflame_core::game_trait::{DailyGame, GameEvent, SlotContext};

use config::PairsConfig;
use deck::{Card, PAIR_COUNT, shuffled_deck};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairsPhase {
    NoneFlipped,
    OneFlipped { first: u8 },
    /// A mismatched pair is showing; the board ignores flips.
    Resolving,
    /// Every pair is matched; waiting to close.
    Won,
}

/// Serializable game state for the render surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairsState {
    pub cards: Vec<Card>,
    pub phase: PairsPhase,
    /// Pairs of flips made so far.
    pub attempts: u32,
    pub matched_pairs: u8,
}

/// Player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairsInput {
    Flip { index: u8 },
    /// Reshuffle and start over.
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairsTimer {
    FlipBack { first: u8, second: u8 },
    Finish,
}

/// Memory pair matching, implementing `DailyGame`.
pub struct Pairs {
    state: PairsState,
    config: PairsConfig,
    rng: StdRng,
}

impl Pairs {
    pub fn new() -> Self {
        Self::with_rng(PairsConfig::default(), StdRng::from_os_rng())
    }

    pub fn with_config(config: PairsConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(PairsConfig::default(), StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PairsConfig, mut rng: StdRng) -> Self {
        let cards = shuffled_deck(&mut rng);
        Self {
            state: PairsState {
                cards,
                phase: PairsPhase::NoneFlipped,
                attempts: 0,
                matched_pairs: 0,
            },
            config,
            rng,
        }
    }

    pub fn state(&self) -> &PairsState {
        &self.state
    }

    fn deal(&mut self, ctx: &mut SlotContext<'_>) {
        ctx.cancel_all();
        self.state = PairsState {
            cards: shuffled_deck(&mut self.rng),
            phase: PairsPhase::NoneFlipped,
            attempts: 0,
            matched_pairs: 0,
        };
    }

    fn flip(&mut self, index: u8, ctx: &mut SlotContext<'_>) {
        let idx = index as usize;
        let Some(card) = self.state.cards.get(idx) else {
            return;
        };
        if card.face_up || card.matched {
            return;
        }
        match self.state.phase {
            PairsPhase::Resolving | PairsPhase::Won => {},
            PairsPhase::NoneFlipped => {
                self.state.cards[idx].face_up = true;
                self.state.phase = PairsPhase::OneFlipped { first: index };
            },
            PairsPhase::OneFlipped { first } => {
                self.state.cards[idx].face_up = true;
                self.state.attempts += 1;
                let first_idx = first as usize;
                if self.state.cards[first_idx].symbol == self.state.cards[idx].symbol {
                    self.state.cards[first_idx].matched = true;
                    self.state.cards[idx].matched = true;
                    self.state.matched_pairs += 1;
                    if self.state.matched_pairs as usize == PAIR_COUNT {
                        self.state.phase = PairsPhase::Won;
                        tracing::debug!(
                            slot = %ctx.slot(),
                            attempts = self.state.attempts,
                            "All pairs matched"
                        );
                        ctx.schedule(self.config.finish_delay_ms, &PairsTimer::Finish);
                    } else {
                        self.state.phase = PairsPhase::NoneFlipped;
                    }
                } else {
                    self.state.phase = PairsPhase::Resolving;
                    ctx.schedule(
                        self.config.flip_back_ms,
                        &PairsTimer::FlipBack {
                            first,
                            second: index,
                        },
                    );
                }
            },
        }
    }

    fn handle_input(&mut self, input: PairsInput, ctx: &mut SlotContext<'_>) -> Vec<GameEvent> {
        match input {
            PairsInput::Flip { index } => self.flip(index, ctx),
            PairsInput::Restart => self.deal(ctx),
        }
        Vec::new()
    }

    fn handle_timer(&mut self, timer: PairsTimer, _ctx: &mut SlotContext<'_>) -> Vec<GameEvent> {
        match (timer, self.state.phase) {
            (PairsTimer::FlipBack { first, second }, PairsPhase::Resolving) => {
                for idx in [first, second] {
                    if let Some(card) = self.state.cards.get_mut(idx as usize) {
                        card.face_up = false;
                    }
                }
                self.state.phase = PairsPhase::NoneFlipped;
                Vec::new()
            },
            (PairsTimer::Finish, PairsPhase::Won) => {
                vec![GameEvent::Completed, GameEvent::CloseRequested]
            },
            _ => Vec::new(),
        }
    }
}

impl Default for Pairs {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyGame for Pairs {
    fn behavior(&self) -> BehaviorTag {
        BehaviorTag::PairMatching
    }

    fn start(&mut self, ctx: &mut SlotContext<'_>) -> Vec<GameEvent> {
        self.deal(ctx);
        Vec::new()
    }

    dailyflame_game_boilerplate!(
        state_type: PairsState,
        input_type: PairsInput,
        timer_type: PairsTimer
    );

    fn is_finished(&self) -> bool {
        self.state.phase == PairsPhase::Won
    }
}
