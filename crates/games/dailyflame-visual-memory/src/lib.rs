pub mod config;
pub mod grid;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use dailyflame_core::catalog::BehaviorTag;
use dailyflame_core::dailyflame_game_boilerplate;
use dailyflame_core::game_trait::{DailyGame, GameEvent, SlotContext};

use config::VisualMemoryConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualPhase {
    /// Waiting for the start button.
    Idle,
    /// Targets are highlighted; clicks are ignored.
    Revealing,
    AwaitingClicks,
    /// Every target found; the next level follows shortly.
    LevelCleared,
    /// A wrong cell cost a life; the level is dealt again shortly.
    LifeLost,
    Won,
    GameOver,
}

impl VisualPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, VisualPhase::Won | VisualPhase::GameOver)
    }
}

/// Serializable game state for the render surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualMemoryState {
    pub level: u32,
    pub lives: u32,
    pub grid_size: u32,
    pub phase: VisualPhase,
    /// Target cells; only meant to be drawn while revealing.
    pub targets: Vec<u32>,
    pub found: Vec<u32>,
    /// The wrong cell that cost the last life, if any.
    pub missed: Option<u32>,
}

impl VisualMemoryState {
    fn idle(lives: u32) -> Self {
        Self {
            level: 1,
            lives,
            grid_size: grid::grid_size(1),
            phase: VisualPhase::Idle,
            targets: Vec::new(),
            found: Vec::new(),
            missed: None,
        }
    }
}

/// Player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualMemoryInput {
    /// Begin (or restart) at level 1 with full lives.
    Start,
    Click { cell: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualMemoryTimer {
    HideTargets,
    DealLevel,
}

/// Grid-recall game with levels and lives, implementing `DailyGame`.
pub struct VisualMemory {
    state: VisualMemoryState,
    config: VisualMemoryConfig,
    rng: StdRng,
}

impl VisualMemory {
    pub fn new() -> Self {
        Self::with_rng(VisualMemoryConfig::default(), StdRng::from_os_rng())
    }

    pub fn with_config(config: VisualMemoryConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(VisualMemoryConfig::default(), StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: VisualMemoryConfig, rng: StdRng) -> Self {
        Self {
            state: VisualMemoryState::idle(config.starting_lives),
            config,
            rng,
        }
    }

    pub fn state(&self) -> &VisualMemoryState {
        &self.state
    }

    fn deal_level(&mut self, ctx: &mut SlotContext<'_>) {
        let level = self.state.level;
        self.state.grid_size = grid::grid_size(level);
        self.state.targets = grid::pick_targets(level, &mut self.rng);
        self.state.found.clear();
        self.state.missed = None;
        self.state.phase = VisualPhase::Revealing;
        ctx.schedule(self.config.reveal_ms, &VisualMemoryTimer::HideTargets);
    }

    fn click(&mut self, cell: u32, ctx: &mut SlotContext<'_>) -> Vec<GameEvent> {
        if self.state.phase != VisualPhase::AwaitingClicks || self.state.found.contains(&cell) {
            return Vec::new();
        }
        if cell >= self.state.grid_size * self.state.grid_size {
            return Vec::new();
        }

        if self.state.targets.contains(&cell) {
            self.state.found.push(cell);
            if self.state.found.len() < self.state.targets.len() {
                return Vec::new();
            }
            self.state.level += 1;
            if self.state.level > self.config.final_level {
                self.state.phase = VisualPhase::Won;
                tracing::debug!(slot = %ctx.slot(), "Visual memory won");
                return vec![GameEvent::Completed, GameEvent::CloseRequested];
            }
            self.state.phase = VisualPhase::LevelCleared;
            ctx.schedule(self.config.between_levels_ms, &VisualMemoryTimer::DealLevel);
            return Vec::new();
        }

        self.state.lives = self.state.lives.saturating_sub(1);
        self.state.missed = Some(cell);
        if self.state.lives == 0 {
            self.state.phase = VisualPhase::GameOver;
            tracing::debug!(slot = %ctx.slot(), level = self.state.level, "Visual memory out of lives");
            // Running out of lives still counts as playing today's game.
            return vec![GameEvent::Completed, GameEvent::CloseRequested];
        }
        self.state.phase = VisualPhase::LifeLost;
        ctx.schedule(self.config.between_levels_ms, &VisualMemoryTimer::DealLevel);
        Vec::new()
    }

    fn handle_input(
        &mut self,
        input: VisualMemoryInput,
        ctx: &mut SlotContext<'_>,
    ) -> Vec<GameEvent> {
        match input {
            VisualMemoryInput::Start => {
                ctx.cancel_all();
                self.state = VisualMemoryState::idle(self.config.starting_lives);
                self.deal_level(ctx);
                Vec::new()
            },
            VisualMemoryInput::Click { cell } => self.click(cell, ctx),
        }
    }

    fn handle_timer(
        &mut self,
        timer: VisualMemoryTimer,
        ctx: &mut SlotContext<'_>,
    ) -> Vec<GameEvent> {
        match (timer, self.state.phase) {
            (VisualMemoryTimer::HideTargets, VisualPhase::Revealing) => {
                self.state.phase = VisualPhase::AwaitingClicks;
            },
            (VisualMemoryTimer::DealLevel, VisualPhase::LevelCleared | VisualPhase::LifeLost) => {
                self.deal_level(ctx);
            },
            _ => {},
        }
        Vec::new()
    }
}

impl Default for VisualMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyGame for VisualMemory {
    fn behavior(&self) -> BehaviorTag {
        BehaviorTag::VisualMemory
    }

    fn start(&mut self, ctx: &mut SlotContext<'_>) -> Vec<GameEvent> {
        ctx.cancel_all();
        self.state = VisualMemoryState::idle(self.config.starting_lives);
        Vec::new()
    }

    dailyflame_game_boilerplate!(
        state_type: VisualMemoryState,
        input_type: VisualMemoryInput,
        timer_type: VisualMemoryTimer
    );

    fn is_finished(&self) -> bool {
        self.state.phase.is_terminal()
    }
}
