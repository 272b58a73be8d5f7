//! Engine state management.
//!
//! Holds the current game, engine options and the computer's move policy,
//! and writes the KAI responses for each command.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::board::{
    BoardError, DEFAULT_POCKETS, DEFAULT_STONES, MAX_POCKETS, MAX_STONES, MIN_POCKETS, MIN_STONES,
};
use crate::game::{Game, GameConfig, GameMode, TurnReport};
use crate::policy::{MovePolicy, RandomPolicy};
use crate::protocol::kfen::{encode_kfen, parse_kfen, KfenError};
use crate::resolve::MoveOutcome;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Option<Game>,
    pub options: HashMap<String, String>,
    policy: RandomPolicy,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a new engine with no game in progress.
    pub fn new() -> Self {
        Engine {
            game: None,
            options: HashMap::new(),
            policy: RandomPolicy::new(0),
        }
    }

    /// Starts a new game from the current options.
    pub fn new_game(&mut self) -> Result<(), BoardError> {
        let config = GameConfig {
            pockets: self.pockets(),
            stones: self.stones(),
            mode: self.mode(),
        };
        let game = Game::new(config)?;
        self.game = Some(game);
        self.policy = RandomPolicy::new(self.seed());
        Ok(())
    }

    /// Sets the current position from a KFEN string.
    pub fn set_position(&mut self, kfen: &str) -> Result<(), KfenError> {
        let (board, to_move) = parse_kfen(kfen)?;
        self.game = Some(Game::from_board(board, to_move, self.mode()));
        Ok(())
    }

    /// Sets an engine option. A new seed takes effect immediately.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        let is_seed = name == "Seed";
        self.options.insert(name, value.unwrap_or_default());
        if is_seed {
            self.policy = RandomPolicy::new(self.seed());
        }
    }

    fn option<T: std::str::FromStr>(&self, name: &str, default: T) -> T {
        self.options
            .get(name)
            .and_then(|v| v.parse::<T>().ok())
            .unwrap_or(default)
    }

    fn pockets(&self) -> usize {
        self.option("Pockets", DEFAULT_POCKETS)
    }

    fn stones(&self) -> u32 {
        self.option("Stones", DEFAULT_STONES)
    }

    /// Returns the configured mode (default multiplayer).
    fn mode(&self) -> GameMode {
        self.options
            .get("Mode")
            .and_then(|v| GameMode::from_name(v))
            .unwrap_or_default()
    }

    /// Returns the configured seed; 0 draws one from entropy.
    fn seed(&self) -> u64 {
        self.option("Seed", 0)
    }

    /// Handles the KAI handshake: writes id, options, protocol_version, and kaiok.
    pub fn handle_kai<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name kalah")?;
        writeln!(out, "id author kalah")?;
        writeln!(
            out,
            "option name Pockets type spin default {} min {} max {}",
            DEFAULT_POCKETS, MIN_POCKETS, MAX_POCKETS
        )?;
        writeln!(
            out,
            "option name Stones type spin default {} min {} max {}",
            DEFAULT_STONES, MIN_STONES, MAX_STONES
        )?;
        writeln!(
            out,
            "option name Mode type combo default multiplayer var multiplayer var singleplayer"
        )?;
        writeln!(out, "option name Seed type spin default 0 min 0 max {}", u64::MAX)?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "kaiok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `moves` command.
    pub fn handle_moves<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            eprintln!("moves: no game in progress");
            return Ok(());
        };
        let legal = game.legal_moves();
        if legal.is_empty() {
            writeln!(out, "moves none")?;
        } else {
            let list: Vec<String> = legal.iter().map(|p| p.to_string()).collect();
            writeln!(out, "moves {}", list.join(" "))?;
        }
        out.flush()
    }

    /// Handles `play <pocket>`. In single-player mode the computer's reply
    /// turns are played and reported straight after.
    ///
    /// If the computer is already to move (a loaded position can hand it the
    /// turn) its turns are played instead and the requested pocket is dropped.
    pub fn handle_play<W: Write>(&mut self, pocket: usize, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            eprintln!("play: no game in progress");
            return Ok(());
        };
        if game.is_computer_turn() {
            eprintln!("play: player {} is moved by the computer", game.to_move());
            write_computer_turns(game, &mut self.policy, out)?;
            return out.flush();
        }
        match game.play(pocket) {
            Ok(report) => write_report(out, &report)?,
            Err(e) => {
                eprintln!("play: {}", e);
                return Ok(());
            }
        }
        write_computer_turns(game, &mut self.policy, out)?;
        out.flush()
    }

    /// Handles the `go` command: suggests a move without playing it.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            eprintln!("go: no game in progress");
            return Ok(());
        };
        let legal = game.legal_moves();
        match self.policy.choose(game.board(), game.to_move(), &legal) {
            Some(pocket) => {
                writeln!(out, "bestmove {}", pocket)?;
                out.flush()
            }
            None => {
                eprintln!("go: no legal moves");
                Ok(())
            }
        }
    }

    /// Handles the `show` command.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            eprintln!("show: no game in progress");
            return Ok(());
        };
        writeln!(out, "position {}", encode_kfen(game.board(), game.to_move()))?;
        out.flush()
    }
}

/// Plays and reports every pending computer turn.
fn write_computer_turns<W: Write>(
    game: &mut Game,
    policy: &mut RandomPolicy,
    out: &mut W,
) -> io::Result<()> {
    match game.play_computer_turns(policy) {
        Ok(reports) => {
            for report in &reports {
                write_report(out, report)?;
            }
        }
        Err(e) => eprintln!("computer move failed: {}", e),
    }
    Ok(())
}

/// Writes the `played` line for a turn, followed by `tomove` or `gameover`.
fn write_report<W: Write>(out: &mut W, report: &TurnReport) -> io::Result<()> {
    let outcome = match report.outcome {
        MoveOutcome::ExtraTurn => "extraturn".to_string(),
        MoveOutcome::TurnEnds => "turnends".to_string(),
        MoveOutcome::Capture(index) => format!("capture {} {}", index, report.captured),
    };
    writeln!(out, "played {} {} {}", report.player, report.pocket, outcome)?;

    if let Some(result) = report.result {
        let winner = match result.winner {
            Some(player) => player.to_string(),
            None => "draw".to_string(),
        };
        writeln!(
            out,
            "gameover {} {} {}",
            result.houses[0], result.houses[1], winner
        )?;
    } else if let Some(next) = report.next {
        writeln!(out, "tomove {}", next)?;
    }
    Ok(())
}
