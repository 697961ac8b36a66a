use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Fruit and vegetable faces. Each appears on exactly two cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Chili,
    Grapes,
    Lemon,
    Orange,
    Pineapple,
    Strawberry,
    Tomato,
    Watermelon,
    Cherries,
}

impl Symbol {
    pub const ALL: [Symbol; 9] = [
        Symbol::Chili,
        Symbol::Grapes,
        Symbol::Lemon,
        Symbol::Orange,
        Symbol::Pineapple,
        Symbol::Strawberry,
        Symbol::Tomato,
        Symbol::Watermelon,
        Symbol::Cherries,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Chili => "chili",
            Symbol::Grapes => "grapes",
            Symbol::Lemon => "lemon",
            Symbol::Orange => "orange",
            Symbol::Pineapple => "pineapple",
            Symbol::Strawberry => "strawberry",
            Symbol::Tomato => "tomato",
            Symbol::Watermelon => "watermelon",
            Symbol::Cherries => "cherries",
        }
    }
}

pub const PAIR_COUNT: usize = Symbol::ALL.len();
pub const CARD_COUNT: usize = PAIR_COUNT * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub symbol: Symbol,
    pub face_up: bool,
    pub matched: bool,
}

impl Card {
    fn hidden(symbol: Symbol) -> Self {
        Self {
            symbol,
            face_up: false,
            matched: false,
        }
    }
}

/// Two face-down cards per symbol, shuffled.
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut cards: Vec<Card> = Symbol::ALL
        .iter()
        .flat_map(|&symbol| [Card::hidden(symbol), Card::hidden(symbol)])
        .collect();
    cards.shuffle(rng);
    cards
}
