use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifies one calendar day in the user's local timezone.
///
/// Persisted records carry the key they were written under; a record read
/// back under a different key is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Today's key in local time.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Build a key from a calendar date. Returns `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The following calendar day. Saturates at the end of chrono's range.
    pub fn next_day(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_calendar_day() {
        let a = DateKey::from_ymd(2026, 1, 31).unwrap();
        let b = DateKey::from_ymd(2026, 1, 31).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, a.next_day());
        assert_eq!(a.next_day(), DateKey::from_ymd(2026, 2, 1).unwrap());
    }

    #[test]
    fn json_form_is_iso_date() {
        let key = DateKey::from_ymd(2026, 10, 18).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2026-10-18\"");
        let back: DateKey = serde_json::from_str("\"2026-10-18\"").unwrap();
        assert_eq!(back, key);
        assert_eq!(key.to_string(), "2026-10-18");
    }

    #[test]
    fn impossible_date_rejected() {
        assert!(DateKey::from_ymd(2026, 2, 30).is_none());
    }
}
