use std::collections::HashMap;

use dailyflame_core::catalog::BehaviorTag;
use dailyflame_core::game_trait::DailyGame;

/// Factory function type for creating game sessions.
pub type GameFactory = fn() -> Box<dyn DailyGame>;

/// Registry mapping behavior tags to factory functions.
pub struct GameRegistry {
    factories: HashMap<BehaviorTag, GameFactory>,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRegistry {
    /// Every game compiled into this build, each reading its own config.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_defaults();
        registry
    }

    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    fn register_defaults(&mut self) {
        #[cfg(feature = "number-memory")]
        self.register(BehaviorTag::NumberMemory, || {
            Box::new(dailyflame_number_memory::NumberMemory::with_config(
                dailyflame_number_memory::config::NumberMemoryConfig::load(),
            ))
        });
        #[cfg(feature = "pairs")]
        self.register(BehaviorTag::PairMatching, || {
            Box::new(dailyflame_pairs::Pairs::with_config(
                dailyflame_pairs::config::PairsConfig::load(),
            ))
        });
        #[cfg(feature = "tictactoe")]
        self.register(BehaviorTag::TicTacToe, || {
            Box::new(dailyflame_tictactoe::TicTacToe::with_config(
                dailyflame_tictactoe::config::TicTacToeConfig::load(),
            ))
        });
        #[cfg(feature = "visual-memory")]
        self.register(BehaviorTag::VisualMemory, || {
            Box::new(dailyflame_visual_memory::VisualMemory::with_config(
                dailyflame_visual_memory::config::VisualMemoryConfig::load(),
            ))
        });
    }

    /// Add or replace the factory for `tag`.
    pub fn register(&mut self, tag: BehaviorTag, factory: GameFactory) {
        self.factories.insert(tag, factory);
    }

    pub fn create(&self, tag: BehaviorTag) -> Option<Box<dyn DailyGame>> {
        self.factories.get(&tag).map(|f| f())
    }

    /// Return the number of registered game types.
    pub fn available_games(&self) -> usize {
        self.factories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(all(
        feature = "number-memory",
        feature = "pairs",
        feature = "tictactoe",
        feature = "visual-memory"
    ))]
    fn default_build_covers_every_tag() {
        let registry = GameRegistry::new();
        assert_eq!(registry.available_games(), BehaviorTag::ALL.len());
        for tag in BehaviorTag::ALL {
            let game = registry.create(tag).unwrap();
            assert_eq!(game.behavior(), tag);
        }
    }

    #[test]
    fn empty_registry_creates_nothing() {
        let registry = GameRegistry::empty();
        assert!(registry.create(BehaviorTag::TicTacToe).is_none());
    }
}
