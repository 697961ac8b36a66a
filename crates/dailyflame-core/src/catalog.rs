use serde::{Deserialize, Serialize};

/// Unique identifier for a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which state machine drives a descriptor. The host resolves this through
/// its factory table when a slot is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorTag {
    NumberMemory,
    PairMatching,
    TicTacToe,
    VisualMemory,
}

impl BehaviorTag {
    pub const ALL: [BehaviorTag; 4] = [
        BehaviorTag::NumberMemory,
        BehaviorTag::PairMatching,
        BehaviorTag::TicTacToe,
        BehaviorTag::VisualMemory,
    ];
}

/// Static metadata for one game type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDescriptor {
    pub id: GameId,
    pub name: String,
    pub description: String,
    pub instruction: String,
    pub behavior: BehaviorTag,
}

/// Id of the entry every daily selection includes when present.
pub const DEFAULT_MANDATORY_ID: &str = "tictac";

/// The set of games a day can be drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<GameDescriptor>,
    mandatory: Option<GameId>,
}

impl Catalog {
    /// Build a catalog. Later duplicates of an id are dropped.
    pub fn new(entries: Vec<GameDescriptor>, mandatory: Option<GameId>) -> Self {
        let mut unique: Vec<GameDescriptor> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|e| e.id == entry.id) {
                tracing::warn!(id = %entry.id, "Duplicate catalog id ignored");
                continue;
            }
            unique.push(entry);
        }
        Self {
            entries: unique,
            mandatory,
        }
    }

    /// The four shipped games, with tic-tac-toe as the mandatory entry.
    pub fn builtin() -> Self {
        Self::new(
            vec![
                GameDescriptor {
                    id: GameId::new("number"),
                    name: "Huske spil".to_string(),
                    description: "Husk tallet og skriv det!".to_string(),
                    instruction:
                        "Se tallet i 4 sekunder. Skriv det derefter. Nå 5 runder for at vinde!"
                            .to_string(),
                    behavior: BehaviorTag::NumberMemory,
                },
                GameDescriptor {
                    id: GameId::new("vendes"),
                    name: "Vendespil".to_string(),
                    description: "Find alle de matchende par!".to_string(),
                    instruction: "Vend to kort ad gangen og find alle par. Når du har fundet \
                                  alle par, er spillet klaret!"
                        .to_string(),
                    behavior: BehaviorTag::PairMatching,
                },
                GameDescriptor {
                    id: GameId::new(DEFAULT_MANDATORY_ID),
                    name: "Kryds og bolle".to_string(),
                    description: "Spil Kryds og bolle mod computeren!".to_string(),
                    instruction: "Du er O, computeren er X".to_string(),
                    behavior: BehaviorTag::TicTacToe,
                },
                GameDescriptor {
                    id: GameId::new("visualmemory"),
                    name: "Visuel hukommelse".to_string(),
                    description: "Husk de oplyste felter!".to_string(),
                    instruction: "Se hvilke felter der lyser op, og klik derefter på dem alle. \
                                  Du har 3 liv."
                        .to_string(),
                    behavior: BehaviorTag::VisualMemory,
                },
            ],
            Some(GameId::new(DEFAULT_MANDATORY_ID)),
        )
    }

    pub fn entries(&self) -> &[GameDescriptor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: &GameId) -> Option<&GameDescriptor> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// The mandatory descriptor, if configured and still present.
    pub fn mandatory(&self) -> Option<&GameDescriptor> {
        self.mandatory.as_ref().and_then(|id| self.find(id))
    }

    pub fn mandatory_id(&self) -> Option<&GameId> {
        self.mandatory.as_ref()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
