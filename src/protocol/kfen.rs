//! KFEN (Kalah FEN) encoding and decoding.
//!
//! KFEN is a one-line notation for a full Kalah position, in the spirit of
//! chess FEN. It records the board geometry, every pocket, both houses and the
//! player to move.
//!
//! Format: `<pockets>x<stones>/<side 1>/<side 2>/<house 1>,<house 2>/<to move>`
//!
//! Sides are comma-separated pocket counts in index order, so the fresh
//! 6-pocket, 4-stone board is `6x4/4,4,4,4,4,4/4,4,4,4,4,4/0,0/1`.

use crate::board::{Board, BoardError, Player};

/// Errors that can occur during KFEN parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KfenError {
    #[error("expected 5 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("invalid header '{0}': expected <pockets>x<stones>")]
    InvalidHeader(String),

    #[error("invalid stone count: '{0}'")]
    InvalidNumber(String),

    #[error("side {side} lists {got} pockets, header says {expected}")]
    WrongPocketCount {
        side: u8,
        expected: usize,
        got: usize,
    },

    #[error("invalid houses section '{0}': expected <house 1>,<house 2>")]
    InvalidHouses(String),

    #[error("invalid side to move: '{0}'")]
    InvalidToMove(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

fn parse_number(s: &str) -> Result<u32, KfenError> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| KfenError::InvalidNumber(s.to_string()))
}

/// Parses the `<pockets>x<stones>` header.
fn parse_header(s: &str) -> Result<(usize, u32), KfenError> {
    let invalid = || KfenError::InvalidHeader(s.to_string());
    let (pockets, stones) = s.split_once('x').ok_or_else(invalid)?;
    let pockets = pockets.parse::<usize>().map_err(|_| invalid())?;
    let stones = stones.parse::<u32>().map_err(|_| invalid())?;
    Ok((pockets, stones))
}

fn parse_side(s: &str, side: u8, expected: usize) -> Result<Vec<u32>, KfenError> {
    let counts = s
        .split(',')
        .map(parse_number)
        .collect::<Result<Vec<u32>, KfenError>>()?;
    if counts.len() != expected {
        return Err(KfenError::WrongPocketCount {
            side,
            expected,
            got: counts.len(),
        });
    }
    Ok(counts)
}

fn parse_houses(s: &str) -> Result<[u32; 2], KfenError> {
    let (one, two) = s
        .split_once(',')
        .ok_or_else(|| KfenError::InvalidHouses(s.to_string()))?;
    Ok([parse_number(one)?, parse_number(two)?])
}

fn parse_to_move(s: &str) -> Result<Player, KfenError> {
    s.parse::<u8>()
        .ok()
        .and_then(|n| Player::from_number(n).ok())
        .ok_or_else(|| KfenError::InvalidToMove(s.to_string()))
}

/// Parses a KFEN string into a board and the player to move.
pub fn parse_kfen(s: &str) -> Result<(Board, Player), KfenError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    if sections.len() != 5 {
        return Err(KfenError::WrongSectionCount(sections.len()));
    }

    let (pockets, stones) = parse_header(sections[0])?;
    let side_one = parse_side(sections[1], 1, pockets)?;
    let side_two = parse_side(sections[2], 2, pockets)?;
    let houses = parse_houses(sections[3])?;
    let to_move = parse_to_move(sections[4])?;

    let sides = [side_one.as_slice(), side_two.as_slice()];
    let board = Board::from_position(pockets, stones, sides, houses)?;
    Ok((board, to_move))
}

fn encode_side(side: &[u32]) -> String {
    side.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Encodes a position into its canonical KFEN string.
pub fn encode_kfen(board: &Board, to_move: Player) -> String {
    format!(
        "{}x{}/{}/{}/{},{}/{}",
        board.pockets(),
        board.start_stones(),
        encode_side(board.side(Player::One)),
        encode_side(board.side(Player::Two)),
        board.house(Player::One),
        board.house(Player::Two),
        to_move
    )
}
