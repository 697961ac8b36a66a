use serde::{Deserialize, Serialize};

/// Data-driven configuration for pair matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PairsConfig {
    /// How long a mismatched pair stays face up (ms).
    pub flip_back_ms: u64,
    /// Pause after the last pair before the slot completes (ms).
    pub finish_delay_ms: u64,
}

impl Default for PairsConfig {
    fn default() -> Self {
        Self {
            flip_back_ms: 900,
            finish_delay_ms: 700,
        }
    }
}

impl PairsConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        let path = std::env::var("DAILYFLAME_PAIRS_CONFIG")
            .unwrap_or_else(|_| "config/pairs.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str::<Self>(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}
