use serde::{Deserialize, Serialize};

use crate::catalog::BehaviorTag;
use crate::slot::Slot;
use crate::timers::{TimerHandle, TimerRegistry};

/// Encoded timer payload as stored in the shared registry.
pub type TimerPayload = Vec<u8>;

/// Core trait that every daily game state machine implements.
///
/// The host owns slots, modals, timers and persistence; the game only
/// handles its own rules. Inputs and timer payloads arrive MessagePack
/// encoded so the host can route them without knowing the game's types.
pub trait DailyGame: Send {
    /// Which catalog behavior this game implements.
    fn behavior(&self) -> BehaviorTag;

    /// Called once when the slot's modal opens. Resets all state.
    fn start(&mut self, ctx: &mut SlotContext<'_>) -> Vec<GameEvent>;

    /// Apply one player action. Malformed input is dropped.
    fn apply_input(&mut self, input: &[u8], ctx: &mut SlotContext<'_>) -> Vec<GameEvent>;

    /// Called when a timer this game scheduled fires.
    fn on_timer(&mut self, payload: &[u8], ctx: &mut SlotContext<'_>) -> Vec<GameEvent>;

    /// Serialize the current state for the render surface.
    fn serialize_state(&self) -> Vec<u8>;

    /// Whether the session has reached a terminal state.
    fn is_finished(&self) -> bool;
}

/// Events a game hands back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The slot's win (or counted-as-done) condition was met.
    Completed,
    /// The game wants its modal closed.
    CloseRequested,
}

/// A game's view of its slot: identity, clock, and the timers it owns.
pub struct SlotContext<'a> {
    slot: Slot,
    timers: &'a mut TimerRegistry<TimerPayload>,
}

impl<'a> SlotContext<'a> {
    pub fn new(slot: Slot, timers: &'a mut TimerRegistry<TimerPayload>) -> Self {
        Self { slot, timers }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Schedule `payload` to come back through `on_timer` after `delay_ms`.
    pub fn schedule<T: Serialize>(&mut self, delay_ms: u64, payload: &T) -> Option<TimerHandle> {
        match rmp_serde::to_vec(payload) {
            Ok(bytes) => Some(self.timers.schedule(self.slot, delay_ms, bytes)),
            Err(e) => {
                tracing::warn!(slot = %self.slot, error = %e, "Failed to encode timer payload");
                None
            },
        }
    }

    /// Drop every timer pending for this slot.
    pub fn cancel_all(&mut self) -> usize {
        self.timers.cancel_all(self.slot)
    }

    /// Number of timers pending for this slot.
    pub fn pending(&self) -> usize {
        self.timers.pending(self.slot)
    }
}

/// Generates the `DailyGame` methods that are identical across all games:
/// `apply_input`, `on_timer`, `serialize_state`.
///
/// Requires the implementing struct to have a `state: $StateType` field and
/// inherent methods `handle_input(&mut self, $InputType, &mut SlotContext)`
/// and `handle_timer(&mut self, $TimerType, &mut SlotContext)`, both
/// returning `Vec<GameEvent>`.
#[macro_export]
macro_rules! dailyflame_game_boilerplate {
    (state_type: $StateType:ty, input_type: $InputType:ty, timer_type: $TimerType:ty) => {
        fn apply_input(
            &mut self,
            input: &[u8],
            ctx: &mut $crate::game_trait::SlotContext<'_>,
        ) -> Vec<$crate::game_trait::GameEvent> {
            match rmp_serde::from_slice::<$InputType>(input) {
                Ok(input) => self.handle_input(input, ctx),
                Err(e) => {
                    tracing::debug!(slot = %ctx.slot(), error = %e, "Dropped malformed input");
                    Vec::new()
                },
            }
        }

        fn on_timer(
            &mut self,
            payload: &[u8],
            ctx: &mut $crate::game_trait::SlotContext<'_>,
        ) -> Vec<$crate::game_trait::GameEvent> {
            match rmp_serde::from_slice::<$TimerType>(payload) {
                Ok(timer) => self.handle_timer(timer, ctx),
                Err(e) => {
                    tracing::debug!(slot = %ctx.slot(), error = %e, "Dropped malformed timer");
                    Vec::new()
                },
            }
        }

        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).unwrap_or_default()
        }
    };
}
