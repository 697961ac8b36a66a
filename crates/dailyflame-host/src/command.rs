use dailyflame_core::catalog::BehaviorTag;

/// One line typed at the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Start(u8),
    Close(u8),
    /// Click outside the modal of a slot.
    Backdrop(u8),
    /// Game-specific words for the game in a slot, e.g. `2 flip 7`.
    Game { slot: u8, words: Vec<String> },
    AdminReset,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  show                 redraw today's games
  start N / close N    open or close slot N
  backdrop N           click outside slot N's window
  N <action>           play in slot N:
                         number memory: submit DIGITS | restart | again | stop
                         pairs:         flip I | restart
                         tic-tac-toe:   place CELL | reset
                         visual memory: start | click CELL
  reset                pick new games for today and clear progress
  quit";

/// Parse a terminal line. `None` for blank or unrecognised input.
pub fn parse(line: &str) -> Option<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let (&first, rest) = words.split_first()?;
    let slot_arg = || rest.first().and_then(|w| w.parse::<u8>().ok());
    match first.to_ascii_lowercase().as_str() {
        "show" | "ls" => Some(Command::Show),
        "start" | "play" => slot_arg().map(Command::Start),
        "close" => slot_arg().map(Command::Close),
        "backdrop" => slot_arg().map(Command::Backdrop),
        "reset" => Some(Command::AdminReset),
        "help" | "?" => Some(Command::Help),
        "quit" | "exit" | "q" => Some(Command::Quit),
        other => {
            let slot = other.parse::<u8>().ok()?;
            if rest.is_empty() {
                return None;
            }
            Some(Command::Game {
                slot,
                words: rest.iter().map(|w| w.to_string()).collect(),
            })
        },
    }
}

/// Encode game words as the MessagePack input for `behavior`.
pub fn encode_game_input(behavior: BehaviorTag, words: &[String]) -> Option<Vec<u8>> {
    let (action, args) = words.split_first()?;
    let action = action.to_ascii_lowercase();
    let number = || args.first().and_then(|w| w.parse::<u32>().ok());
    match behavior {
        #[cfg(feature = "number-memory")]
        BehaviorTag::NumberMemory => {
            use dailyflame_number_memory::NumberMemoryInput;
            let input = match action.as_str() {
                "submit" | "answer" => NumberMemoryInput::Submit {
                    answer: args.join(" "),
                },
                "restart" => NumberMemoryInput::Restart,
                "again" => NumberMemoryInput::PlayAgain,
                "stop" => NumberMemoryInput::Stop,
                _ => return None,
            };
            rmp_serde::to_vec(&input).ok()
        },
        #[cfg(feature = "pairs")]
        BehaviorTag::PairMatching => {
            use dailyflame_pairs::PairsInput;
            let input = match action.as_str() {
                "flip" => PairsInput::Flip {
                    index: u8::try_from(number()?).ok()?,
                },
                "restart" => PairsInput::Restart,
                _ => return None,
            };
            rmp_serde::to_vec(&input).ok()
        },
        #[cfg(feature = "tictactoe")]
        BehaviorTag::TicTacToe => {
            use dailyflame_tictactoe::TicTacToeInput;
            let input = match action.as_str() {
                "place" => TicTacToeInput::Place {
                    cell: u8::try_from(number()?).ok()?,
                },
                "reset" | "restart" => TicTacToeInput::Reset,
                _ => return None,
            };
            rmp_serde::to_vec(&input).ok()
        },
        #[cfg(feature = "visual-memory")]
        BehaviorTag::VisualMemory => {
            use dailyflame_visual_memory::VisualMemoryInput;
            let input = match action.as_str() {
                "start" => VisualMemoryInput::Start,
                "click" => VisualMemoryInput::Click { cell: number()? },
                _ => return None,
            };
            rmp_serde::to_vec(&input).ok()
        },
        #[allow(unreachable_patterns)]
        _ => None,
    }
}
