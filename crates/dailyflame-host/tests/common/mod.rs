use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::de::DeserializeOwned;

use dailyflame_core::catalog::{BehaviorTag, Catalog, GameDescriptor, GameId};
use dailyflame_core::day::DateKey;
use dailyflame_core::game_trait::{DailyGame, GameEvent, SlotContext};
use dailyflame_core::slot::Slot;
use dailyflame_core::store::MemoryStore;
use dailyflame_core::test_helpers::{make_descriptor, test_day};
use dailyflame_host::registry::GameRegistry;
use dailyflame_host::session::SessionHost;
use dailyflame_host::surface::{RenderSurface, SlotCard};

/// Everything the host asked the surface to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Slots(Vec<SlotCard>),
    Reward(bool),
    Open(Slot, GameId),
    Game(Slot, BehaviorTag),
    Close(Slot),
    Reload,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub last_state: HashMap<Slot, Vec<u8>>,
}

impl RecordingSurface {
    pub fn last_cards(&self) -> Vec<SlotCard> {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                SurfaceCall::Slots(cards) => Some(cards.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn reward_lit(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                SurfaceCall::Reward(lit) => Some(*lit),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn count(&self, wanted: &SurfaceCall) -> usize {
        self.calls.iter().filter(|c| *c == wanted).count()
    }

    /// Decode the latest state drawn for `slot`.
    pub fn state<S: DeserializeOwned>(&self, slot: Slot) -> S {
        let bytes = self.last_state.get(&slot).expect("slot was drawn");
        rmp_serde::from_slice(bytes).expect("state decodes")
    }
}

impl RenderSurface for RecordingSurface {
    fn render_slots(&mut self, cards: &[SlotCard]) {
        self.calls.push(SurfaceCall::Slots(cards.to_vec()));
    }

    fn set_reward(&mut self, lit: bool) {
        self.calls.push(SurfaceCall::Reward(lit));
    }

    fn open_modal(&mut self, slot: Slot, descriptor: &GameDescriptor) {
        self.calls.push(SurfaceCall::Open(slot, descriptor.id.clone()));
    }

    fn render_game(&mut self, slot: Slot, behavior: BehaviorTag, state: &[u8]) {
        self.calls.push(SurfaceCall::Game(slot, behavior));
        self.last_state.insert(slot, state.to_vec());
    }

    fn close_modal(&mut self, slot: Slot) {
        self.calls.push(SurfaceCall::Close(slot));
    }

    fn reload(&mut self) {
        self.calls.push(SurfaceCall::Reload);
    }
}

/// Completes and asks to close on the first input.
#[derive(Default)]
pub struct InstantWin {
    inputs: u8,
}

impl DailyGame for InstantWin {
    fn behavior(&self) -> BehaviorTag {
        BehaviorTag::TicTacToe
    }

    fn start(&mut self, _ctx: &mut SlotContext<'_>) -> Vec<GameEvent> {
        Vec::new()
    }

    fn apply_input(&mut self, _input: &[u8], _ctx: &mut SlotContext<'_>) -> Vec<GameEvent> {
        self.inputs += 1;
        vec![GameEvent::Completed, GameEvent::CloseRequested]
    }

    fn on_timer(&mut self, _payload: &[u8], _ctx: &mut SlotContext<'_>) -> Vec<GameEvent> {
        Vec::new()
    }

    fn serialize_state(&self) -> Vec<u8> {
        vec![self.inputs]
    }

    fn is_finished(&self) -> bool {
        self.inputs > 0
    }
}

/// Every tag resolves to [`InstantWin`].
pub fn instant_registry() -> GameRegistry {
    let mut registry = GameRegistry::empty();
    for tag in BehaviorTag::ALL {
        registry.register(tag, || Box::new(InstantWin::default()));
    }
    registry
}

/// Exactly three games, so every slot is known up to order.
pub fn three_game_catalog() -> Catalog {
    Catalog::new(
        vec![
            make_descriptor("tictac", BehaviorTag::TicTacToe),
            make_descriptor("vendes", BehaviorTag::PairMatching),
            make_descriptor("visualmemory", BehaviorTag::VisualMemory),
        ],
        Some(GameId::new("tictac")),
    )
}

/// A settable day for roll-over tests.
#[derive(Clone)]
pub struct TestClock(Rc<Cell<DateKey>>);

impl TestClock {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(test_day())))
    }

    pub fn set(&self, day: DateKey) {
        self.0.set(day);
    }

    pub fn boxed(&self) -> Box<dyn Fn() -> DateKey> {
        let cell = Rc::clone(&self.0);
        Box::new(move || cell.get())
    }
}

pub type TestHost = SessionHost<MemoryStore, RecordingSurface>;

pub fn make_host(registry: GameRegistry, store: MemoryStore, clock: &TestClock) -> TestHost {
    SessionHost::new(
        three_game_catalog(),
        registry,
        store,
        RecordingSurface::default(),
        StdRng::seed_from_u64(42),
        clock.boxed(),
    )
}

/// The slot today's selection put `behavior` in.
pub fn slot_of(host: &TestHost, behavior: BehaviorTag) -> Slot {
    Slot::ALL
        .into_iter()
        .find(|&s| host.selection().descriptor(s).map(|d| d.behavior) == Some(behavior))
        .expect("behavior selected today")
}
