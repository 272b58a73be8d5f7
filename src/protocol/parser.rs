//! KAI command parser.
//!
//! Parses incoming KAI (Kalah Action Interface) protocol commands from raw
//! text into structured `Command` variants that the main loop can dispatch on.

/// A parsed driver-to-engine KAI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the KAI protocol handshake.
    Kai,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game from the current options.
    NewGame,

    /// Set the board position from a KFEN string.
    Position { kfen: String },

    /// List the legal moves of the player to move.
    Moves,

    /// Play a pocket for the player to move.
    Play { pocket: usize },

    /// Suggest a move for the player to move without playing it.
    Go,

    /// Print the current position as KFEN.
    Show,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "kai" => Some(Command::Kai),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "moves" => Some(Command::Moves),
        "go" => Some(Command::Go),
        "show" => Some(Command::Show),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "play" => parse_play(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <kfen>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed position: expected 'position <kfen>'");
        return None;
    }
    // KFEN is a single token (no spaces)
    Some(Command::Position {
        kfen: tokens[1].to_string(),
    })
}

/// Parses `play <pocket>`.
fn parse_play(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed play: expected 'play <pocket>'");
        return None;
    }
    match tokens[1].parse::<usize>() {
        Ok(pocket) => Some(Command::Play { pocket }),
        Err(_) => {
            eprintln!("invalid pocket: '{}'", tokens[1]);
            None
        }
    }
}
