pub mod catalog;
pub mod day;
pub mod game_trait;
pub mod progress;
pub mod selection;
pub mod slot;
pub mod store;
pub mod timers;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use crate::catalog::{BehaviorTag, GameDescriptor, GameId};
    use crate::day::DateKey;
    use crate::game_trait::{DailyGame, GameEvent, SlotContext, TimerPayload};
    use crate::slot::Slot;
    use crate::timers::TimerRegistry;

    /// A fixed day for tests: 2026-10-18.
    pub fn test_day() -> DateKey {
        DateKey::from_ymd(2026, 10, 18).expect("valid test date")
    }

    /// A descriptor with placeholder texts.
    pub fn make_descriptor(id: &str, behavior: BehaviorTag) -> GameDescriptor {
        GameDescriptor {
            id: GameId::new(id),
            name: format!("Game {id}"),
            description: format!("About {id}"),
            instruction: format!("How to play {id}"),
            behavior,
        }
    }

    /// Encode an input the way the host does before routing it.
    pub fn encode<T: Serialize>(value: &T) -> Vec<u8> {
        rmp_serde::to_vec(value).unwrap_or_default()
    }

    /// Drives one game in slot 1 against a private timer registry.
    pub struct GameHarness<G: DailyGame> {
        pub game: G,
        pub timers: TimerRegistry<TimerPayload>,
        pub slot: Slot,
        /// Every event seen since the harness was created.
        pub events: Vec<GameEvent>,
    }

    impl<G: DailyGame> GameHarness<G> {
        pub fn new(game: G) -> Self {
            Self {
                game,
                timers: TimerRegistry::new(),
                slot: Slot::ALL[0],
                events: Vec::new(),
            }
        }

        pub fn start(&mut self) -> Vec<GameEvent> {
            let mut ctx = SlotContext::new(self.slot, &mut self.timers);
            let events = self.game.start(&mut ctx);
            self.events.extend(events.iter().copied());
            events
        }

        pub fn input<I: Serialize>(&mut self, input: &I) -> Vec<GameEvent> {
            self.raw_input(&encode(input))
        }

        pub fn raw_input(&mut self, bytes: &[u8]) -> Vec<GameEvent> {
            let mut ctx = SlotContext::new(self.slot, &mut self.timers);
            let events = self.game.apply_input(bytes, &mut ctx);
            self.events.extend(events.iter().copied());
            events
        }

        /// Move the clock forward `ms`, firing every timer that falls due.
        pub fn advance(&mut self, ms: u64) -> Vec<GameEvent> {
            let target = self.timers.now_ms().saturating_add(ms);
            let mut events = Vec::new();
            while let Some(fired) = self.timers.pop_due(target) {
                let mut ctx = SlotContext::new(self.slot, &mut self.timers);
                events.extend(self.game.on_timer(&fired.payload, &mut ctx));
            }
            self.timers.advance_to(target);
            self.events.extend(events.iter().copied());
            events
        }

        pub fn pending(&self) -> usize {
            self.timers.pending(self.slot)
        }

        pub fn cancel_all(&mut self) -> usize {
            self.timers.cancel_all(self.slot)
        }

        /// Decode the game's current state snapshot.
        pub fn state<S: DeserializeOwned>(&self) -> S {
            match rmp_serde::from_slice(&self.game.serialize_state()) {
                Ok(state) => state,
                Err(e) => panic!("state snapshot must decode: {e}"),
            }
        }

        /// How many `Completed` events have been seen so far.
        pub fn completions(&self) -> usize {
            self.events
                .iter()
                .filter(|e| **e == GameEvent::Completed)
                .count()
        }

        pub fn close_requests(&self) -> usize {
            self.events
                .iter()
                .filter(|e| **e == GameEvent::CloseRequested)
                .count()
        }
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Every DailyGame implementation must pass these. Game crates call them
    // from their own #[cfg(test)] modules with a fresh game instance.

    /// After start(), serialize_state() must return non-empty bytes and no
    /// completion may have fired.
    pub fn contract_start_creates_state<G: DailyGame>(game: G) {
        let mut h = GameHarness::new(game);
        h.start();
        assert!(
            !h.game.serialize_state().is_empty(),
            "serialize_state() must return non-empty bytes after start"
        );
        assert_eq!(h.completions(), 0, "start must not complete the slot");
        assert!(!h.game.is_finished(), "a fresh session is not finished");
    }

    /// Undecodable input and timer payloads change nothing.
    pub fn contract_malformed_bytes_ignored<G: DailyGame>(game: G) {
        let mut h = GameHarness::new(game);
        h.start();
        let before = h.game.serialize_state();
        let pending = h.pending();

        // 0xc1 is never used by MessagePack.
        assert!(h.raw_input(&[0xc1]).is_empty());
        let mut ctx = SlotContext::new(h.slot, &mut h.timers);
        assert!(h.game.on_timer(&[0xc1, 0x00], &mut ctx).is_empty());

        assert_eq!(before, h.game.serialize_state(), "state must not change");
        assert_eq!(pending, h.pending(), "no timers may be scheduled");
    }

    /// After cancel_all(), no amount of elapsed time changes the game.
    pub fn contract_cancel_all_quiesces<G: DailyGame>(game: G, input: Option<Vec<u8>>) {
        let mut h = GameHarness::new(game);
        h.start();
        if let Some(bytes) = input {
            h.raw_input(&bytes);
        }
        h.cancel_all();
        let before = h.game.serialize_state();
        let events = h.advance(60_000);
        assert!(events.is_empty(), "cancelled timers must not fire");
        assert_eq!(before, h.game.serialize_state(), "state must be frozen");
    }
}
