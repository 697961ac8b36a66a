use std::collections::HashMap;

use crate::slot::Slot;

/// Opaque handle for one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A timer whose delay has elapsed, handed back to the owner for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTimer<P> {
    pub handle: TimerHandle,
    pub slot: Slot,
    pub due_ms: u64,
    pub payload: P,
}

#[derive(Debug)]
struct PendingTimer<P> {
    handle: TimerHandle,
    due_ms: u64,
    payload: P,
}

/// Delayed one-shot callbacks, recorded per slot, on a virtual millisecond
/// clock.
///
/// The registry never runs anything itself. The owner advances the clock and
/// pulls due timers with [`TimerRegistry::pop_due`]; a timer removed by
/// `cancel` or `cancel_all` before that point is never returned.
#[derive(Debug)]
pub struct TimerRegistry<P> {
    now_ms: u64,
    next_handle: u64,
    pending: HashMap<Slot, Vec<PendingTimer<P>>>,
}

impl<P> Default for TimerRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TimerRegistry<P> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_handle: 0,
            pending: HashMap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Register `payload` to fire `delay_ms` after the current time.
    pub fn schedule(&mut self, slot: Slot, delay_ms: u64, payload: P) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.pending.entry(slot).or_default().push(PendingTimer {
            handle,
            due_ms: self.now_ms.saturating_add(delay_ms),
            payload,
        });
        handle
    }

    /// Cancel a single timer. Unknown or already-fired handles are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        for timers in self.pending.values_mut() {
            if let Some(pos) = timers.iter().position(|t| t.handle == handle) {
                timers.remove(pos);
                return true;
            }
        }
        false
    }

    /// Cancel every timer recorded for `slot`. Returns how many were dropped.
    pub fn cancel_all(&mut self, slot: Slot) -> usize {
        let dropped = self.pending.remove(&slot).map_or(0, |t| t.len());
        if dropped > 0 {
            tracing::debug!(%slot, dropped, "Cancelled pending timers");
        }
        dropped
    }

    /// Number of timers still pending for `slot`.
    pub fn pending(&self, slot: Slot) -> usize {
        self.pending.get(&slot).map_or(0, Vec::len)
    }

    /// Earliest due time across all slots.
    pub fn next_due(&self) -> Option<u64> {
        self.pending
            .values()
            .flat_map(|timers| timers.iter().map(|t| t.due_ms))
            .min()
    }

    /// Remove and return the earliest timer due at or before `until_ms`.
    ///
    /// Ties fire in scheduling order. The clock moves to the fired timer's
    /// due time, so anything it schedules is relative to that instant.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<FiredTimer<P>> {
        let (slot, pos) = self
            .pending
            .iter()
            .flat_map(|(slot, timers)| {
                timers
                    .iter()
                    .enumerate()
                    .map(move |(pos, t)| (*slot, pos, t.due_ms, t.handle))
            })
            .filter(|&(_, _, due, _)| due <= until_ms)
            .min_by_key(|&(_, _, due, handle)| (due, handle))
            .map(|(slot, pos, _, _)| (slot, pos))?;

        let timers = self.pending.get_mut(&slot)?;
        let timer = timers.remove(pos);
        if timers.is_empty() {
            self.pending.remove(&slot);
        }
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(FiredTimer {
            handle: timer.handle,
            slot,
            due_ms: timer.due_ms,
            payload: timer.payload,
        })
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
