use serde::{Deserialize, Serialize};

use crate::day::DateKey;
use crate::slot::{SLOT_COUNT, Slot};
use crate::store::{KeyValueStore, read_json, write_json};

/// Storage key of the persisted progress record.
pub const PROGRESS_KEY: &str = "dailyGamesProgress";

/// Which of today's slots have been completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub day: DateKey,
    #[serde(rename = "completions")]
    pub slot_completed: [bool; SLOT_COUNT],
}

impl DailyProgress {
    /// Nothing completed yet.
    pub fn fresh(day: DateKey) -> Self {
        Self {
            day,
            slot_completed: [false; SLOT_COUNT],
        }
    }

    pub fn is_complete(&self, slot: Slot) -> bool {
        self.slot_completed[slot.index()]
    }

    /// Number of completed slots, in `0..=SLOT_COUNT`.
    pub fn completed_count(&self) -> usize {
        self.slot_completed.iter().filter(|&&done| done).count()
    }

    /// Whether every slot is done, which lights the reward indicator.
    pub fn all_complete(&self) -> bool {
        self.completed_count() == SLOT_COUNT
    }
}

/// Load today's progress. A record from another day, or one that cannot be
/// read, yields fresh progress; the fresh value is not written back.
pub fn load(store: &dyn KeyValueStore, today: DateKey) -> DailyProgress {
    match read_json::<DailyProgress>(store, PROGRESS_KEY) {
        Some(progress) if progress.day == today => progress,
        Some(progress) => {
            tracing::debug!(stored = %progress.day, %today, "Stored progress is stale");
            DailyProgress::fresh(today)
        },
        None => DailyProgress::fresh(today),
    }
}

/// Mark `slot` complete and persist the whole record immediately.
///
/// The record is written wholesale under `progress.day`, so it never merges
/// with another day's data. Marking a completed slot changes nothing.
pub fn mark_slot_complete(
    store: &mut dyn KeyValueStore,
    progress: &DailyProgress,
    slot: Slot,
) -> DailyProgress {
    if progress.is_complete(slot) {
        return *progress;
    }
    let mut next = *progress;
    next.slot_completed[slot.index()] = true;
    tracing::info!(day = %next.day, %slot, completed = next.completed_count(), "Slot completed");
    write_json(store, PROGRESS_KEY, &next);
    next
}

/// Persist and return all-false progress for `today`.
pub fn reset(store: &mut dyn KeyValueStore, today: DateKey) -> DailyProgress {
    let progress = DailyProgress::fresh(today);
    write_json(store, PROGRESS_KEY, &progress);
    progress
}
