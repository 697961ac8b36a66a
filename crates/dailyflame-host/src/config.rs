use serde::Deserialize;

use dailyflame_core::catalog::{Catalog, DEFAULT_MANDATORY_ID, GameDescriptor, GameId};

/// Top-level host configuration, loaded from `dailyflame.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// JSON file holding the selection and progress records.
    pub data_file: String,
    /// Id every daily selection leads with. Empty means no mandatory game.
    pub mandatory_game: String,
    /// Replaces the built-in catalog when non-empty.
    pub catalog: Vec<GameDescriptor>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            data_file: "dailyflame-data.json".to_string(),
            mandatory_game: DEFAULT_MANDATORY_ID.to_string(),
            catalog: Vec::new(),
        }
    }
}

impl HostConfig {
    /// Load config from `dailyflame.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("dailyflame.toml") {
            Ok(content) => match toml::from_str::<HostConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from dailyflame.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse dailyflame.toml: {e}, using defaults");
                    HostConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No dailyflame.toml found, using defaults");
                HostConfig::default()
            },
        };

        if let Ok(path) = std::env::var("DAILYFLAME_DATA_FILE")
            && !path.is_empty()
        {
            config.data_file = path;
        }
        if let Ok(id) = std::env::var("DAILYFLAME_MANDATORY_GAME") {
            config.mandatory_game = id;
        }

        config
    }

    /// Problems that make the configuration unusable. Empty when valid.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.data_file.trim().is_empty() {
            problems.push("data_file must not be empty".to_string());
        }

        let mut seen: Vec<&GameId> = Vec::new();
        for entry in &self.catalog {
            if entry.id.as_str().is_empty() {
                problems.push("catalog entry with an empty id".to_string());
            } else if seen.contains(&&entry.id) {
                problems.push(format!("catalog id {} appears more than once", entry.id));
            }
            seen.push(&entry.id);
        }

        if !self.catalog.is_empty()
            && !self.mandatory_game.is_empty()
            && !self.catalog.iter().any(|e| e.id.as_str() == self.mandatory_game)
        {
            problems.push(format!(
                "mandatory_game {} is not in the configured catalog",
                self.mandatory_game
            ));
        }
        problems
    }

    pub fn mandatory_id(&self) -> Option<GameId> {
        let id = self.mandatory_game.trim();
        (!id.is_empty()).then(|| GameId::new(id))
    }

    /// The catalog to draw from: configured entries, or the built-in four.
    pub fn build_catalog(&self) -> Catalog {
        if self.catalog.is_empty() {
            let builtin = Catalog::builtin();
            Catalog::new(builtin.entries().to_vec(), self.mandatory_id())
        } else {
            Catalog::new(self.catalog.clone(), self.mandatory_id())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dailyflame_core::catalog::BehaviorTag;

    #[test]
    fn default_config_values() {
        let cfg = HostConfig::default();
        assert_eq!(cfg.data_file, "dailyflame-data.json");
        assert_eq!(cfg.mandatory_id(), Some(GameId::new("tictac")));
        assert!(cfg.validate().is_empty());
        assert_eq!(cfg.build_catalog(), Catalog::builtin());
    }

    #[test]
    fn parse_catalog_toml() {
        let toml_str = r#"
data_file = "/tmp/daily.json"
mandatory_game = "grid"

[[catalog]]
id = "grid"
name = "Grid"
description = "Remember the lit cells"
instruction = "Click them all"
behavior = "visual_memory"

[[catalog]]
id = "digits"
name = "Digits"
description = "Remember the number"
instruction = "Type it back"
behavior = "number_memory"
"#;
        let cfg: HostConfig = toml::from_str(toml_str).unwrap();
        assert!(cfg.validate().is_empty());
        let catalog = cfg.build_catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.mandatory().map(|d| d.behavior),
            Some(BehaviorTag::VisualMemory)
        );
    }

    #[test]
    fn empty_mandatory_disables_rule() {
        let cfg = HostConfig {
            mandatory_game: " ".to_string(),
            ..HostConfig::default()
        };
        assert!(cfg.mandatory_id().is_none());
        assert!(cfg.build_catalog().mandatory().is_none());
    }

    #[test]
    fn validate_reports_problems() {
        let entry = |id: &str| GameDescriptor {
            id: GameId::new(id),
            name: id.to_string(),
            description: String::new(),
            instruction: String::new(),
            behavior: BehaviorTag::PairMatching,
        };
        let cfg = HostConfig {
            data_file: String::new(),
            mandatory_game: "tictac".to_string(),
            catalog: vec![entry("a"), entry("a"), entry("")],
        };
        let problems = cfg.validate();
        assert_eq!(problems.len(), 4, "{problems:?}");
    }
}
