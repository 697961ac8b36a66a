use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, GameDescriptor, GameId};
use crate::day::DateKey;
use crate::progress::{self, DailyProgress};
use crate::slot::{SLOT_COUNT, Slot};
use crate::store::{KeyValueStore, read_json, write_json};

/// Storage key of the persisted selection record.
pub const SELECTION_KEY: &str = "dailyGamesSelection";

/// Persisted form: descriptor ids only, resolved against the catalog on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SelectionRecord {
    day: DateKey,
    slots: Vec<GameId>,
}

/// The games assigned to today's slots, in slot order.
///
/// Holds exactly [`SLOT_COUNT`] entries whenever the catalog has that many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySelection {
    pub day: DateKey,
    pub slots: Vec<GameDescriptor>,
}

impl DailySelection {
    pub fn descriptor(&self, slot: Slot) -> Option<&GameDescriptor> {
        self.slots.get(slot.index())
    }

    pub fn ids(&self) -> Vec<GameId> {
        self.slots.iter().map(|d| d.id.clone()).collect()
    }

    fn to_record(&self) -> SelectionRecord {
        SelectionRecord {
            day: self.day,
            slots: self.ids(),
        }
    }
}

/// Return today's selection, drawing and persisting a new one only when no
/// usable record exists for `today`.
///
/// A stored record is reused when it was written today, names the expected
/// number of distinct games, and every id still resolves in `catalog`.
pub fn get_today_selection<R: Rng + ?Sized>(
    catalog: &Catalog,
    store: &mut dyn KeyValueStore,
    today: DateKey,
    rng: &mut R,
) -> DailySelection {
    if let Some(selection) = load_selection(catalog, store, today) {
        return selection;
    }
    let selection = draw_selection(catalog, today, rng);
    tracing::info!(day = %today, games = ?selection.ids(), "Drew daily selection");
    write_json(store, SELECTION_KEY, &selection.to_record());
    selection
}

/// Force a fresh draw regardless of what is stored, and reset today's
/// progress to nothing completed.
pub fn reset_selection<R: Rng + ?Sized>(
    catalog: &Catalog,
    store: &mut dyn KeyValueStore,
    today: DateKey,
    rng: &mut R,
) -> (DailySelection, DailyProgress) {
    store.remove(SELECTION_KEY);
    let selection = draw_selection(catalog, today, rng);
    tracing::info!(day = %today, games = ?selection.ids(), "Selection reset");
    write_json(store, SELECTION_KEY, &selection.to_record());
    let progress = progress::reset(store, today);
    (selection, progress)
}

fn load_selection(
    catalog: &Catalog,
    store: &dyn KeyValueStore,
    today: DateKey,
) -> Option<DailySelection> {
    let record: SelectionRecord = read_json(store, SELECTION_KEY)?;
    if record.day != today {
        tracing::debug!(stored = %record.day, %today, "Stored selection is stale");
        return None;
    }
    if record.slots.len() != expected_len(catalog) {
        tracing::debug!(len = record.slots.len(), "Stored selection has wrong length");
        return None;
    }
    let mut slots: Vec<GameDescriptor> = Vec::with_capacity(record.slots.len());
    for id in &record.slots {
        let Some(descriptor) = catalog.find(id) else {
            tracing::debug!(%id, "Stored selection references a removed game");
            return None;
        };
        if slots.iter().any(|d| d.id == *id) {
            tracing::debug!(%id, "Stored selection repeats a game");
            return None;
        }
        slots.push(descriptor.clone());
    }
    Some(DailySelection { day: today, slots })
}

fn expected_len(catalog: &Catalog) -> usize {
    catalog.len().min(SLOT_COUNT)
}

/// Draw a selection without touching storage.
///
/// Slot 0 holds the mandatory entry; the rest are drawn uniformly without
/// replacement from the other entries. If the mandatory entry is gone the
/// rule is skipped and every slot is drawn from what remains. A catalog
/// smaller than [`SLOT_COUNT`] yields all of its entries in random order.
pub fn draw_selection<R: Rng + ?Sized>(
    catalog: &Catalog,
    today: DateKey,
    rng: &mut R,
) -> DailySelection {
    let mut slots = Vec::with_capacity(SLOT_COUNT);
    let pool: Vec<&GameDescriptor> = match catalog.mandatory() {
        Some(mandatory) => {
            slots.push(mandatory.clone());
            catalog
                .entries()
                .iter()
                .filter(|e| e.id != mandatory.id)
                .collect()
        },
        None => {
            if let Some(id) = catalog.mandatory_id() {
                tracing::warn!(%id, "Mandatory game missing from catalog, drawing freely");
            }
            catalog.entries().iter().collect()
        },
    };

    let wanted = (SLOT_COUNT - slots.len()).min(pool.len());
    for i in index::sample(rng, pool.len(), wanted).into_iter() {
        slots.push(pool[i].clone());
    }
    if slots.len() < SLOT_COUNT {
        tracing::warn!(
            available = slots.len(),
            "Catalog too small to fill every daily slot"
        );
    }
    DailySelection { day: today, slots }
}
