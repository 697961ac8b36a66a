use serde::{Deserialize, Serialize};

/// Data-driven configuration for visual memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualMemoryConfig {
    /// How long the targets stay highlighted (ms).
    pub reveal_ms: u64,
    /// Pause before the next level or a retry (ms).
    pub between_levels_ms: u64,
    pub starting_lives: u32,
    /// Clearing this level wins the game.
    pub final_level: u32,
}

impl Default for VisualMemoryConfig {
    fn default() -> Self {
        Self {
            reveal_ms: 1200,
            between_levels_ms: 600,
            starting_lives: 3,
            final_level: 5,
        }
    }
}

impl VisualMemoryConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        let path = std::env::var("DAILYFLAME_VISUAL_MEMORY_CONFIG")
            .unwrap_or_else(|_| "config/visual_memory.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(cfg) if cfg.starting_lives > 0 && cfg.final_level > 0 => cfg,
                Ok(_) => {
                    tracing::warn!("{path}: lives and final level must be > 0, using defaults");
                    Self::default()
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }
}
