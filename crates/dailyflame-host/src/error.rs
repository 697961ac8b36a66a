use dailyflame_core::catalog::BehaviorTag;
use dailyflame_core::slot::Slot;

/// Failures opening or parsing the JSON data file.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "data file I/O error: {e}"),
            Self::Parse(e) => write!(f, "data file is not valid JSON: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// A host call that could not be carried out. Each error concerns one slot
/// only; the host stays usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    UnknownSlot(u8),
    /// Today's selection has no game in this slot.
    EmptySlot(Slot),
    NoFactory(BehaviorTag),
    AlreadyCompleted(Slot),
    NoActiveSession(Slot),
    Encode(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSlot(n) => write!(f, "there is no slot {n}"),
            Self::EmptySlot(slot) => write!(f, "slot {slot} has no game today"),
            Self::NoFactory(tag) => write!(f, "no game is registered for {tag:?}"),
            Self::AlreadyCompleted(slot) => write!(f, "slot {slot} is already completed today"),
            Self::NoActiveSession(slot) => write!(f, "slot {slot} has no game running"),
            Self::Encode(m) => write!(f, "failed to encode input: {m}"),
        }
    }
}

impl std::error::Error for HostError {}
