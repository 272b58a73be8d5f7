//! End-of-game detection and the final sweep.

use crate::board::{Board, Player, ALL_PLAYERS};

/// Returns the player whose side is completely empty, if any.
///
/// Player one is checked first, so if both sides are empty at once player
/// one is reported and player two's (empty) side is the one swept.
pub fn is_over(board: &Board) -> Option<Player> {
    ALL_PLAYERS.into_iter().find(|&p| board.is_side_empty(p))
}

/// Sweeps the remaining stones into their owner's house once a side is empty.
///
/// The player who ran out does not collect the opponent's leftovers; the
/// opponent collects their own. Returns the number of stones swept, or zero
/// if the game is not over.
pub fn finalize(board: &mut Board) -> u32 {
    let Some(empty) = is_over(board) else {
        return 0;
    };
    let owner = empty.other();
    let pockets = board.pockets;
    let side = &mut board.sides[owner.index()][..pockets];
    let swept: u32 = side.iter().sum();
    side.fill(0);
    board.houses[owner.index()] += swept;
    swept
}
