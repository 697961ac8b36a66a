use rand::rngs::StdRng;
use serde::Serialize;

use dailyflame_core::catalog::{BehaviorTag, Catalog};
use dailyflame_core::day::DateKey;
use dailyflame_core::game_trait::{DailyGame, GameEvent, SlotContext, TimerPayload};
use dailyflame_core::progress::{self, DailyProgress};
use dailyflame_core::selection::{self, DailySelection};
use dailyflame_core::slot::{SLOT_COUNT, Slot};
use dailyflame_core::store::KeyValueStore;
use dailyflame_core::timers::TimerRegistry;

use crate::error::HostError;
use crate::registry::GameRegistry;
use crate::surface::{RenderSurface, SlotCard};

/// Where the host reads the current day from.
pub type DayClock = Box<dyn Fn() -> DateKey>;

struct ActiveSession {
    game: Box<dyn DailyGame>,
    behavior: BehaviorTag,
}

/// Binds today's three games to their slots and drives them.
///
/// Owns the day's selection and progress, the shared timer registry and at
/// most one running game per slot. Every entry point first checks whether
/// the day has rolled over.
pub struct SessionHost<S: KeyValueStore, V: RenderSurface> {
    catalog: Catalog,
    registry: GameRegistry,
    store: S,
    surface: V,
    rng: StdRng,
    clock: DayClock,
    today: DateKey,
    selection: DailySelection,
    progress: DailyProgress,
    timers: TimerRegistry<TimerPayload>,
    sessions: [Option<ActiveSession>; SLOT_COUNT],
}

impl<S: KeyValueStore, V: RenderSurface> SessionHost<S, V> {
    /// Load (or draw) today's selection and progress, then draw the page.
    pub fn new(
        catalog: Catalog,
        registry: GameRegistry,
        mut store: S,
        surface: V,
        mut rng: StdRng,
        clock: DayClock,
    ) -> Self {
        let today = clock();
        let selection = selection::get_today_selection(&catalog, &mut store, today, &mut rng);
        let progress = progress::load(&store, today);
        let mut host = Self {
            catalog,
            registry,
            store,
            surface,
            rng,
            clock,
            today,
            selection,
            progress,
            timers: TimerRegistry::new(),
            sessions: [None, None, None],
        };
        host.render_page();
        host
    }

    pub fn today(&self) -> DateKey {
        self.today
    }

    pub fn selection(&self) -> &DailySelection {
        &self.selection
    }

    pub fn progress(&self) -> &DailyProgress {
        &self.progress
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    /// Due time of the earliest pending timer in any slot.
    pub fn next_due(&self) -> Option<u64> {
        self.timers.next_due()
    }

    pub fn is_open(&self, slot: Slot) -> bool {
        self.sessions[slot.index()].is_some()
    }

    pub fn active_behavior(&self, slot: Slot) -> Option<BehaviorTag> {
        self.sessions[slot.index()].as_ref().map(|s| s.behavior)
    }

    pub fn pending_timers(&self, slot: Slot) -> usize {
        self.timers.pending(slot)
    }

    /// Resolve a 1-based slot number from user input.
    pub fn slot(number: u8) -> Result<Slot, HostError> {
        Slot::new(number).ok_or(HostError::UnknownSlot(number))
    }

    /// Open the modal for `slot` and start a fresh game in it.
    pub fn start(&mut self, slot: Slot) -> Result<(), HostError> {
        self.check_day();
        let descriptor = self
            .selection
            .descriptor(slot)
            .cloned()
            .ok_or(HostError::EmptySlot(slot))?;
        if self.progress.is_complete(slot) {
            return Err(HostError::AlreadyCompleted(slot));
        }
        let mut game = self
            .registry
            .create(descriptor.behavior)
            .ok_or(HostError::NoFactory(descriptor.behavior))?;

        self.teardown(slot);
        self.surface.open_modal(slot, &descriptor);
        let mut ctx = SlotContext::new(slot, &mut self.timers);
        let events = game.start(&mut ctx);
        self.surface
            .render_game(slot, descriptor.behavior, &game.serialize_state());
        self.sessions[slot.index()] = Some(ActiveSession {
            game,
            behavior: descriptor.behavior,
        });
        tracing::debug!(%slot, game = %descriptor.id, "Started game");
        self.handle_events(slot, events);
        Ok(())
    }

    /// Close the modal for `slot`, discarding its game. Returns whether a
    /// game was running.
    pub fn close(&mut self, slot: Slot) -> bool {
        self.check_day();
        self.teardown(slot)
    }

    /// A click on the modal backdrop closes it like the close button.
    pub fn backdrop_click(&mut self, slot: Slot) -> bool {
        self.close(slot)
    }

    /// Route MessagePack-encoded input to the game running in `slot`.
    pub fn input(&mut self, slot: Slot, bytes: &[u8]) -> Result<(), HostError> {
        self.check_day();
        let session = self.sessions[slot.index()]
            .as_mut()
            .ok_or(HostError::NoActiveSession(slot))?;
        let mut ctx = SlotContext::new(slot, &mut self.timers);
        let events = session.game.apply_input(bytes, &mut ctx);
        self.surface
            .render_game(slot, session.behavior, &session.game.serialize_state());
        self.handle_events(slot, events);
        Ok(())
    }

    /// Encode `input` and route it to `slot`.
    pub fn send<I: Serialize>(&mut self, slot: Slot, input: &I) -> Result<(), HostError> {
        let bytes = rmp_serde::to_vec(input).map_err(|e| HostError::Encode(e.to_string()))?;
        self.input(slot, &bytes)
    }

    /// Move the virtual clock forward `ms`, firing due timers in order.
    pub fn advance(&mut self, ms: u64) {
        let target = self.timers.now_ms().saturating_add(ms);
        self.advance_to(target);
    }

    /// Move the virtual clock to `target_ms`. Earlier targets are ignored.
    pub fn advance_to(&mut self, target_ms: u64) {
        self.check_day();
        while let Some(fired) = self.timers.pop_due(target_ms) {
            let slot = fired.slot;
            let Some(session) = self.sessions[slot.index()].as_mut() else {
                tracing::debug!(%slot, "Timer fired for a closed slot");
                continue;
            };
            let mut ctx = SlotContext::new(slot, &mut self.timers);
            let events = session.game.on_timer(&fired.payload, &mut ctx);
            self.surface
                .render_game(slot, session.behavior, &session.game.serialize_state());
            self.handle_events(slot, events);
        }
        self.timers.advance_to(target_ms);
    }

    /// Draw a new selection, wipe today's progress, close every game and
    /// reload the surface.
    pub fn admin_reset(&mut self) {
        for slot in Slot::ALL {
            self.teardown(slot);
        }
        self.today = (self.clock)();
        let (selection, progress) =
            selection::reset_selection(&self.catalog, &mut self.store, self.today, &mut self.rng);
        self.selection = selection;
        self.progress = progress;
        tracing::info!(day = %self.today, "Daily games reset");
        self.surface.reload();
        self.render_page();
    }

    /// Redraw the slot cards and the reward flame.
    pub fn render_page(&mut self) {
        let cards: Vec<SlotCard> = Slot::ALL
            .iter()
            .filter_map(|&slot| {
                self.selection.descriptor(slot).map(|d| SlotCard {
                    slot,
                    name: d.name.clone(),
                    description: d.description.clone(),
                    completed: self.progress.is_complete(slot),
                })
            })
            .collect();
        let lit = !cards.is_empty() && cards.iter().all(|c| c.completed);
        self.surface.render_slots(&cards);
        self.surface.set_reward(lit);
    }

    /// Reload selection and progress if the calendar day has changed.
    fn check_day(&mut self) {
        let now = (self.clock)();
        if now == self.today {
            return;
        }
        tracing::info!(from = %self.today, to = %now, "Day rolled over");
        for slot in Slot::ALL {
            self.teardown(slot);
        }
        self.today = now;
        self.selection =
            selection::get_today_selection(&self.catalog, &mut self.store, now, &mut self.rng);
        self.progress = progress::load(&self.store, now);
        self.render_page();
    }

    fn teardown(&mut self, slot: Slot) -> bool {
        self.timers.cancel_all(slot);
        let was_open = self.sessions[slot.index()].take().is_some();
        if was_open {
            self.surface.close_modal(slot);
        }
        was_open
    }

    fn handle_events(&mut self, slot: Slot, events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::Completed => {
                    self.progress = progress::mark_slot_complete(&mut self.store, &self.progress, slot);
                    self.render_page();
                },
                GameEvent::CloseRequested => {
                    self.teardown(slot);
                },
            }
        }
    }
}
