//! The two players of a Kalah game.

use serde::{Deserialize, Serialize};

use super::state::BoardError;

/// One of the two sides of the board.
///
/// Player one owns `side[0]` and `house[0]`, player two owns `side[1]` and
/// `house[1]`. Player one moves first in a fresh game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

/// Both players in turn order.
pub const ALL_PLAYERS: [Player; 2] = [Player::One, Player::Two];

impl Player {
    /// Converts the external 1-based player number.
    pub fn from_number(n: u8) -> Result<Player, BoardError> {
        match n {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(BoardError::InvalidPlayer(other)),
        }
    }

    /// Returns the 1-based player number used in the protocol and in records.
    pub const fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Index into per-player arrays (`side`, `house`).
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub const fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}
