//! Board state representation.
//!
//! Holds the complete snapshot of a Kalah game at a point in time: the stones
//! in every pocket on both sides and the contents of both houses.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// Fewest pockets per side a board may be built with.
pub const MIN_POCKETS: usize = 4;
/// Most pockets per side a board may be built with.
pub const MAX_POCKETS: usize = 10;
/// Fewest starting stones per pocket.
pub const MIN_STONES: u32 = 4;
/// Most starting stones per pocket.
pub const MAX_STONES: u32 = 10;

pub const DEFAULT_POCKETS: usize = 6;
pub const DEFAULT_STONES: u32 = 6;

/// Precondition violations reported by board operations.
///
/// None of these are transient. An operation that returns one of them has
/// not mutated the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid player {0}: expected 1 or 2")]
    InvalidPlayer(u8),

    #[error("pocket index {index} out of range for a board with {pockets} pockets")]
    IndexOutOfRange { index: usize, pockets: usize },

    #[error("cannot sow from empty pocket {0}")]
    EmptyPocketMove(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Checks pocket and stone counts against the allowed bounds.
pub fn check_config(pockets: usize, stones: u32) -> Result<(), BoardError> {
    if !(MIN_POCKETS..=MAX_POCKETS).contains(&pockets) {
        return Err(BoardError::InvalidConfiguration(format!(
            "pocket count {} outside {}..={}",
            pockets, MIN_POCKETS, MAX_POCKETS
        )));
    }
    if !(MIN_STONES..=MAX_STONES).contains(&stones) {
        return Err(BoardError::InvalidConfiguration(format!(
            "stone count {} outside {}..={}",
            stones, MIN_STONES, MAX_STONES
        )));
    }
    Ok(())
}

/// Complete board state.
///
/// Pockets are stored in fixed-size arrays indexed by pocket number, only the
/// first `pockets` entries of each side are in use. This keeps the board free
/// of heap allocation and trivially copyable.
///
/// For player one, pocket 0 sits next to player one's house; for player two,
/// pocket `pockets - 1` sits next to player two's house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    pub(crate) pockets: usize,
    pub(crate) start_stones: u32,
    pub(crate) sides: [[u32; MAX_POCKETS]; 2],
    pub(crate) houses: [u32; 2],
}

impl Board {
    /// Creates the starting position with `stones` in each of the
    /// `pockets` pockets on both sides.
    pub fn new(pockets: usize, stones: u32) -> Result<Board, BoardError> {
        check_config(pockets, stones)?;
        let mut sides = [[0u32; MAX_POCKETS]; 2];
        for side in sides.iter_mut() {
            side[..pockets].fill(stones);
        }
        Ok(Board {
            pockets,
            start_stones: stones,
            sides,
            houses: [0, 0],
        })
    }

    /// Builds an arbitrary position.
    ///
    /// The stones on the board must add up to what a fresh
    /// `pockets` x `stones` board holds, otherwise conservation has no anchor.
    pub fn from_position(
        pockets: usize,
        stones: u32,
        sides: [&[u32]; 2],
        houses: [u32; 2],
    ) -> Result<Board, BoardError> {
        check_config(pockets, stones)?;

        let mut board = Board {
            pockets,
            start_stones: stones,
            sides: [[0u32; MAX_POCKETS]; 2],
            houses,
        };
        for (i, side) in sides.iter().enumerate() {
            if side.len() != pockets {
                return Err(BoardError::InvalidConfiguration(format!(
                    "side {} has {} pockets, expected {}",
                    i + 1,
                    side.len(),
                    pockets
                )));
            }
            board.sides[i][..pockets].copy_from_slice(side);
        }

        // No single pocket or house can hold more than the whole board, which
        // also keeps the recount below well inside u32.
        let total = board.total_stones();
        let mut cells = sides.iter().flat_map(|side| side.iter()).chain(houses.iter());
        if let Some(&count) = cells.find(|&&count| count > total) {
            return Err(BoardError::InvalidConfiguration(format!(
                "cell holds {} stones, a {}x{} board holds {}",
                count, pockets, stones, total
            )));
        }

        if board.stone_count() != total {
            return Err(BoardError::InvalidConfiguration(format!(
                "position holds {} stones, a {}x{} board holds {}",
                board.stone_count(),
                pockets,
                stones,
                board.total_stones()
            )));
        }
        Ok(board)
    }

    /// Number of pockets per side.
    pub fn pockets(&self) -> usize {
        self.pockets
    }

    /// Stones per pocket at the start of the game.
    pub fn start_stones(&self) -> u32 {
        self.start_stones
    }

    /// The in-use pockets of a player's side, in index order.
    pub fn side(&self, player: Player) -> &[u32] {
        &self.sides[player.index()][..self.pockets]
    }

    /// Stones in a player's house.
    pub fn house(&self, player: Player) -> u32 {
        self.houses[player.index()]
    }

    /// Stones in a single pocket.
    pub fn pocket(&self, player: Player, index: usize) -> Result<u32, BoardError> {
        self.check_index(index)?;
        Ok(self.sides[player.index()][index])
    }

    /// Sum of a player's pockets, excluding the house.
    pub fn side_total(&self, player: Player) -> u32 {
        self.side(player).iter().sum()
    }

    pub fn is_side_empty(&self, player: Player) -> bool {
        self.side(player).iter().all(|&s| s == 0)
    }

    /// The conserved stone total fixed at construction.
    pub fn total_stones(&self) -> u32 {
        2 * self.pockets as u32 * self.start_stones
    }

    /// Recounts every stone currently on the board.
    pub fn stone_count(&self) -> u32 {
        self.side_total(Player::One)
            + self.side_total(Player::Two)
            + self.houses[0]
            + self.houses[1]
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), BoardError> {
        if index >= self.pockets {
            return Err(BoardError::IndexOutOfRange {
                index,
                pockets: self.pockets,
            });
        }
        Ok(())
    }

    /// Read-only copy of the board for rendering or serialization.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            sides: [
                self.side(Player::One).to_vec(),
                self.side(Player::Two).to_vec(),
            ],
            houses: self.houses,
        }
    }
}

/// Detached view of the board a presentation layer may hold on to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sides: [Vec<u32>; 2],
    pub houses: [u32; 2],
}
