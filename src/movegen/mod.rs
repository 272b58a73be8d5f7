//! Legal move generation.
//!
//! A move is the index of a non-empty pocket on the mover's own side.

use crate::board::{Board, Player};

/// Returns every pocket index the player may sow from, in ascending order.
///
/// An empty result means the player's side is empty and the game is over.
pub fn legal_moves(board: &Board, player: Player) -> Vec<usize> {
    board
        .side(player)
        .iter()
        .enumerate()
        .filter(|(_, stones)| **stones > 0)
        .map(|(i, _)| i)
        .collect()
}

/// Returns true if the pocket is a legal move for the player.
pub fn is_legal(board: &Board, player: Player, pocket: usize) -> bool {
    board.pocket(player, pocket).map_or(false, |s| s > 0)
}
