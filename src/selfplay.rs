//! Self-play game generation.
//!
//! Plays random-vs-random games to completion and records every move along
//! with the position it was played from. Records are written as JSONL and
//! can be used to sanity-check the rules on large samples or as data for
//! evaluating stronger policies.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::board::{BoardError, Player, DEFAULT_POCKETS, DEFAULT_STONES};
use crate::game::{Game, GameConfig, GameError, GameMode};
use crate::policy::{MovePolicy, RandomPolicy};
use crate::protocol::kfen::encode_kfen;
use crate::resolve::MoveOutcome;

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    pub pockets: usize,
    pub stones: u32,
    /// Moves after which an unfinished game is abandoned.
    pub max_moves: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy). Game `i` is seeded with `seed + i`.
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            pockets: DEFAULT_POCKETS,
            stones: DEFAULT_STONES,
            max_moves: 1000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            pockets: self.pockets,
            stones: self.stones,
            mode: GameMode::Multiplayer,
        }
    }
}

/// Errors that abort a self-play run.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Config(#[from] BoardError),

    #[error("game {game_id} failed: {source}")]
    Game { game_id: usize, source: GameError },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("self-play worker thread panicked")]
    WorkerPanicked,
}

/// A single recorded move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// KFEN of the position the move was played from.
    pub kfen: String,
    pub player: u8,
    pub pocket: usize,
    pub outcome: MoveOutcome,
    pub captured: u32,
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub pockets: usize,
    pub stones: u32,
    pub moves: Vec<MoveRecord>,
    pub final_houses: [u32; 2],
    /// Winning player number; `None` for a draw or an abandoned game.
    pub winner: Option<u8>,
    /// False if the game hit `max_moves` before ending.
    pub completed: bool,
}

/// Plays a single game with `policy` moving for both players.
pub fn play_game<P: MovePolicy + ?Sized>(
    config: &SelfPlayConfig,
    game_id: usize,
    policy: &mut P,
) -> Result<GameRecord, SelfPlayError> {
    let mut game = Game::new(config.game_config())?;
    let mut moves = Vec::new();

    while !game.is_over() && moves.len() < config.max_moves {
        let kfen = encode_kfen(game.board(), game.to_move());
        let report = game
            .play_policy(policy)
            .map_err(|source| SelfPlayError::Game { game_id, source })?;
        moves.push(MoveRecord {
            kfen,
            player: report.player.number(),
            pocket: report.pocket,
            outcome: report.outcome,
            captured: report.captured,
        });
    }

    let board = game.board();
    let result = game.result();
    Ok(GameRecord {
        game_id,
        pockets: board.pockets(),
        stones: board.start_stones(),
        moves,
        final_houses: [board.house(Player::One), board.house(Player::Two)],
        winner: result.and_then(|r| r.winner).map(Player::number),
        completed: result.is_some(),
    })
}

fn game_seed(config: &SelfPlayConfig, game_id: usize) -> u64 {
    if config.seed == 0 {
        0
    } else {
        config.seed.wrapping_add(game_id as u64)
    }
}

fn outcome_label(game: &GameRecord) -> String {
    if !game.completed {
        return "abandoned".to_string();
    }
    match game.winner {
        Some(w) => format!("player {} wins", w),
        None => "draw".to_string(),
    }
}

/// Runs self-play generation, returning all game records ordered by game ID.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game))?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// This allows the caller to process games incrementally rather than waiting
/// for all games to finish. Games may arrive out of order when running in
/// parallel.
pub fn run_self_play_with_callback<F>(
    config: &SelfPlayConfig,
    on_game: F,
) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    config.game_config().validate()?;
    if config.threads > 1 {
        run_self_play_parallel(config, on_game)
    } else {
        run_self_play_sequential(config, on_game)
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(
    config: &SelfPlayConfig,
    mut on_game: F,
) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let game_start = Instant::now();
        let mut policy = RandomPolicy::new(game_seed(config, i));
        let game = play_game(config, i, &mut policy)?;
        if !config.quiet {
            eprintln!(
                "Game {}/{}: {} after {} moves, houses {}-{} ({:.3}s)",
                i + 1,
                config.num_games,
                outcome_label(&game),
                game.moves.len(),
                game.final_houses[0],
                game.final_houses[1],
                game_start.elapsed().as_secs_f64(),
            );
        }
        on_game(game);
    }
    Ok(())
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(
    config: &SelfPlayConfig,
    mut on_game: F,
) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel::<Result<GameRecord, SelfPlayError>>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let game_start = Instant::now();
                    let mut policy = RandomPolicy::new(game_seed(&config_clone, i));
                    let game = play_game(&config_clone, i, &mut policy);
                    match &game {
                        Ok(record) if !config_clone.quiet => {
                            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                            eprintln!(
                                "Game {}/{}: {} after {} moves, houses {}-{} ({:.3}s)",
                                n,
                                config_clone.num_games,
                                outcome_label(record),
                                record.moves.len(),
                                record.final_houses[0],
                                record.final_houses[1],
                                game_start.elapsed().as_secs_f64(),
                            );
                        }
                        _ => {}
                    }
                    let _ = tx.send(game);
                });
        });
    });

    // Only the first error is reported; the remaining games are still drained.
    let mut first_error = None;
    for game in rx {
        match game {
            Ok(game) => on_game(game),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    handle.join().map_err(|_| SelfPlayError::WorkerPanicked)?;
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let mut wins = [0usize; 2];
    let mut draws = 0usize;
    let mut abandoned = 0usize;
    let mut total_moves = 0usize;
    let mut total_captures = 0usize;

    for game in games {
        total_moves += game.moves.len();
        total_captures += game
            .moves
            .iter()
            .filter(|m| matches!(m.outcome, MoveOutcome::Capture(_)) && m.captured > 0)
            .count();

        if !game.completed {
            abandoned += 1;
            continue;
        }
        match game.winner {
            Some(w) => wins[usize::from(w) - 1] += 1,
            None => draws += 1,
        }
    }

    let pct = |n: usize| 100.0 * n as f64 / total.max(1) as f64;
    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!(
        "Avg moves/game: {:.1}",
        total_moves as f64 / total.max(1) as f64
    );
    eprintln!(
        "Avg captures/game: {:.1}",
        total_captures as f64 / total.max(1) as f64
    );
    eprintln!("Player 1 wins: {} ({:.1}%)", wins[0], pct(wins[0]));
    eprintln!("Player 2 wins: {} ({:.1}%)", wins[1], pct(wins[1]));
    eprintln!("Draws: {} ({:.1}%)", draws, pct(draws));
    if abandoned > 0 {
        eprintln!("Abandoned at move limit: {}", abandoned);
    }
}
