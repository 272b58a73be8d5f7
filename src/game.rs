//! Game controller.
//!
//! Owns one [`Board`], tracks whose turn it is, and runs the turn cycle:
//! sow, then capture or pass or repeat, checking for the end of the game after
//! every step. The board itself never decides whose turn it is.

use serde::{Deserialize, Serialize};

use crate::board::{check_config, Board, BoardError, Player, DEFAULT_POCKETS, DEFAULT_STONES};
use crate::movegen::legal_moves;
use crate::policy::MovePolicy;
use crate::resolve::{finalize, is_over, resolve_move, MoveOutcome};

/// Who controls player two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans share the board.
    #[default]
    Multiplayer,
    /// Player two is played by the computer.
    Singleplayer,
}

impl GameMode {
    pub const fn name(self) -> &'static str {
        match self {
            GameMode::Multiplayer => "multiplayer",
            GameMode::Singleplayer => "singleplayer",
        }
    }

    pub fn from_name(s: &str) -> Option<GameMode> {
        match s.to_ascii_lowercase().as_str() {
            "multiplayer" => Some(GameMode::Multiplayer),
            "singleplayer" => Some(GameMode::Singleplayer),
            _ => None,
        }
    }

    /// Returns true if `player` is moved by the computer in this mode.
    pub fn is_computer(self, player: Player) -> bool {
        self == GameMode::Singleplayer && player == Player::Two
    }
}

/// Settings for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub pockets: usize,
    pub stones: u32,
    pub mode: GameMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            pockets: DEFAULT_POCKETS,
            stones: DEFAULT_STONES,
            mode: GameMode::Multiplayer,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), BoardError> {
        check_config(self.pockets, self.stones)
    }
}

/// Errors from driving a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the game is already over")]
    GameOver,

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("policy chose illegal pocket {pocket} (legal: {legal:?})")]
    IllegalChoice { pocket: usize, legal: Vec<usize> },

    #[error("policy declined to move for player {0}")]
    PolicyDeclined(Player),
}

/// Final score of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub houses: [u32; 2],
    /// `None` on a tie.
    pub winner: Option<Player>,
    /// The player whose side ran empty.
    pub ended_by: Player,
}

impl GameResult {
    fn from_board(board: &Board, ended_by: Player) -> Self {
        let houses = [board.house(Player::One), board.house(Player::Two)];
        let winner = match houses[0].cmp(&houses[1]) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        };
        GameResult {
            houses,
            winner,
            ended_by,
        }
    }
}

/// Everything that happened during one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub player: Player,
    pub pocket: usize,
    pub outcome: MoveOutcome,
    /// Stones taken from the opposite pocket by a capture.
    pub captured: u32,
    /// Stones swept into a house by the end of the game.
    pub swept: u32,
    /// Who moves next; `None` once the game is over.
    pub next: Option<Player>,
    pub result: Option<GameResult>,
}

/// A single game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Player,
    mode: GameMode,
    result: Option<GameResult>,
}

impl Game {
    /// Starts a fresh game; player one moves first.
    pub fn new(config: GameConfig) -> Result<Game, BoardError> {
        let board = Board::new(config.pockets, config.stones)?;
        Ok(Game {
            board,
            to_move: Player::One,
            mode: config.mode,
            result: None,
        })
    }

    /// Resumes play from an arbitrary position.
    ///
    /// If either side has no stones the game ends right away.
    pub fn from_board(board: Board, to_move: Player, mode: GameMode) -> Game {
        let mut game = Game {
            board,
            to_move,
            mode,
            result: None,
        };
        game.settle();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player to move. After the game is over this is the last mover.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Legal pockets for the player to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        legal_moves(&self.board, self.to_move)
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.is_over() && self.mode.is_computer(self.to_move)
    }

    /// Plays `pocket` for the player to move and runs the rest of the turn.
    ///
    /// See [`resolve_move`] for how a capture landing is weighed against the
    /// end of the game.
    pub fn play(&mut self, pocket: usize) -> Result<TurnReport, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let player = self.to_move;
        let resolution = resolve_move(&mut self.board, player, pocket)?;

        let mut swept = 0;
        let next = if resolution.ended_by.is_some() {
            swept = self.settle();
            None
        } else {
            let next = match resolution.outcome {
                MoveOutcome::ExtraTurn => player,
                MoveOutcome::Capture(_) | MoveOutcome::TurnEnds => player.other(),
            };
            self.to_move = next;
            Some(next)
        };

        Ok(TurnReport {
            player,
            pocket,
            outcome: resolution.outcome,
            captured: resolution.captured,
            swept,
            next,
            result: self.result,
        })
    }

    /// Asks `policy` for a move and plays it.
    pub fn play_policy<P: MovePolicy + ?Sized>(
        &mut self,
        policy: &mut P,
    ) -> Result<TurnReport, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let legal = self.legal_moves();
        let pocket = policy
            .choose(&self.board, self.to_move, &legal)
            .ok_or(GameError::PolicyDeclined(self.to_move))?;
        if !legal.contains(&pocket) {
            return Err(GameError::IllegalChoice { pocket, legal });
        }
        self.play(pocket)
    }

    /// Plays computer turns with `policy` until a human is to move or the
    /// game ends. Extra turns are played out in full.
    pub fn play_computer_turns<P: MovePolicy + ?Sized>(
        &mut self,
        policy: &mut P,
    ) -> Result<Vec<TurnReport>, GameError> {
        let mut reports = Vec::new();
        while self.is_computer_turn() {
            reports.push(self.play_policy(policy)?);
        }
        Ok(reports)
    }

    /// Sweeps the board and records the result. Returns the stones swept.
    fn settle(&mut self) -> u32 {
        let Some(empty) = is_over(&self.board) else {
            return 0;
        };
        let swept = finalize(&mut self.board);
        self.result = Some(GameResult::from_board(&self.board, empty));
        swept
    }
}
