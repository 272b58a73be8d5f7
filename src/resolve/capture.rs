//! Capture of the pocket opposite a landing pocket.

use crate::board::{Board, BoardError, Player};

/// Moves the opponent's pocket at `index` into `player`'s house.
///
/// The same index on the other side is the physically opposite pocket. The
/// mover's own pocket (holding the landing stone) is left as it is. Returns
/// the number of stones moved, which may be zero.
pub fn capture(board: &mut Board, player: Player, index: usize) -> Result<u32, BoardError> {
    board.check_index(index)?;
    let opponent = player.other().index();
    let taken = board.sides[opponent][index];
    board.sides[opponent][index] = 0;
    board.houses[player.index()] += taken;
    Ok(taken)
}
