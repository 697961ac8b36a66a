use serde::{Deserialize, Serialize};

/// Data-driven configuration for the number memory game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberMemoryConfig {
    /// How long the number stays visible (ms).
    pub show_ms: u64,
    /// Pause after a correct answer before the next number appears (ms).
    pub advance_ms: u64,
    /// Correct answers needed to complete the slot.
    pub win_rounds: usize,
}

impl Default for NumberMemoryConfig {
    fn default() -> Self {
        Self {
            show_ms: 4000,
            advance_ms: 800,
            win_rounds: 5,
        }
    }
}

impl NumberMemoryConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("DAILYFLAME_NUMBER_MEMORY_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
        {
            return Self::parse_or_default(&path, &contents);
        }
        match std::fs::read_to_string("config/number_memory.toml") {
            Ok(contents) => Self::parse_or_default("config/number_memory.toml", &contents),
            Err(_) => Self::default(),
        }
    }

    fn parse_or_default(path: &str, contents: &str) -> Self {
        match toml::from_str::<Self>(contents) {
            Ok(cfg) if cfg.win_rounds > 0 => cfg,
            Ok(_) => {
                tracing::warn!("{path}: win_rounds must be > 0, using defaults");
                Self::default()
            },
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                Self::default()
            },
        }
    }
}
