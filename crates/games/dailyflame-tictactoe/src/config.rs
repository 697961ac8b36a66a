use serde::{Deserialize, Serialize};

/// Data-driven configuration for tic-tac-toe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeConfig {
    /// Pause after a win, loss or draw before the modal closes (ms).
    pub end_delay_ms: u64,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self { end_delay_ms: 800 }
    }
}

impl TicTacToeConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        let path = std::env::var("DAILYFLAME_TICTACTOE_CONFIG")
            .unwrap_or_else(|_| "config/tictactoe.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }
}
