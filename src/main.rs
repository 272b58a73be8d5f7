//! kalah -- a Kalah (Mancala) engine implementing the KAI protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! following the KAI (Kalah Action Interface) convention. Diagnostics go to
//! stderr.

use std::io::{self, BufRead};

use kalah::engine::Engine;
use kalah::protocol::parser::{parse_command, Command};

/// Runs the main KAI protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let written = match cmd {
            Command::Kai => engine.handle_kai(&mut out),
            Command::IsReady => engine.handle_isready(&mut out),
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
                Ok(())
            }
            Command::NewGame => {
                if let Err(e) = engine.new_game() {
                    eprintln!("newgame: {}", e);
                }
                Ok(())
            }
            Command::Position { kfen } => {
                if let Err(e) = engine.set_position(&kfen) {
                    eprintln!("failed to parse KFEN: {}", e);
                }
                Ok(())
            }
            Command::Moves => engine.handle_moves(&mut out),
            Command::Play { pocket } => engine.handle_play(pocket, &mut out),
            Command::Go => engine.handle_go(&mut out),
            Command::Show => engine.handle_show(&mut out),
            Command::Quit => break,
        };

        // The driver has gone away.
        if written.is_err() {
            break;
        }
    }
}
