//! One move resolved up to the end-of-game check.

use crate::board::{Board, BoardError, Player};

use super::capture::capture;
use super::endgame::is_over;
use super::sow::{make_move, MoveOutcome};

/// The board-level effect of one move, before any final sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: MoveOutcome,
    /// Stones taken by the capture; zero when the capture did not run.
    pub captured: u32,
    /// The player whose side is empty once the move has settled.
    pub ended_by: Option<Player>,
}

/// Sows `pocket` for `player`, then captures if the landing calls for it.
///
/// On a capture landing the end of the game is checked first. If a side is
/// already empty the capture is skipped and the caller sweeps instead.
/// Otherwise the capture runs and the end of the game is checked again. The
/// final sweep itself is left to [`super::finalize`].
pub fn resolve_move(
    board: &mut Board,
    player: Player,
    pocket: usize,
) -> Result<Resolution, BoardError> {
    let outcome = make_move(board, player, pocket)?;

    let mut captured = 0;
    if let MoveOutcome::Capture(index) = outcome {
        if is_over(board).is_none() {
            captured = capture(board, player, index)?;
        }
    }

    Ok(Resolution {
        outcome,
        captured,
        ended_by: is_over(board),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::finalize;

    #[test]
    fn plain_move_leaves_game_running() {
        let mut board = Board::new(6, 4).unwrap();
        let resolution = resolve_move(&mut board, Player::One, 2).unwrap();
        assert_eq!(resolution.outcome, MoveOutcome::TurnEnds);
        assert_eq!(resolution.captured, 0);
        assert_eq!(resolution.ended_by, None);
    }

    #[test]
    fn capture_runs_when_both_sides_hold_stones() {
        let mut board =
            Board::from_position(4, 4, [&[0, 0, 1, 5], &[4, 7, 4, 1]], [6, 4]).unwrap();
        let resolution = resolve_move(&mut board, Player::One, 2).unwrap();
        assert_eq!(resolution.outcome, MoveOutcome::Capture(1));
        assert_eq!(resolution.captured, 7);
        assert_eq!(resolution.ended_by, None);
        assert_eq!(board.house(Player::One), 13);
    }

    #[test]
    fn empty_side_takes_precedence_over_capture() {
        // Player two's side is already empty when player one lands in an
        // empty pocket: nothing is captured and the game is over.
        let mut board =
            Board::from_position(4, 4, [&[0, 0, 1, 5], &[0, 0, 0, 0]], [14, 12]).unwrap();
        let resolution = resolve_move(&mut board, Player::One, 2).unwrap();
        assert_eq!(resolution.outcome, MoveOutcome::Capture(1));
        assert_eq!(resolution.captured, 0);
        assert_eq!(resolution.ended_by, Some(Player::Two));
        assert_eq!(board.side(Player::One), &[0, 1, 0, 5]);
        assert_eq!(board.house(Player::One), 14);

        assert_eq!(finalize(&mut board), 6);
        assert_eq!(board.house(Player::One), 20);
        assert_eq!(board.house(Player::Two), 12);
    }

    #[test]
    fn capture_that_empties_opponent_ends_game() {
        let mut board =
            Board::from_position(4, 4, [&[0, 0, 1, 5], &[0, 3, 0, 0]], [12, 11]).unwrap();
        let resolution = resolve_move(&mut board, Player::One, 2).unwrap();
        assert_eq!(resolution.captured, 3);
        assert_eq!(resolution.ended_by, Some(Player::Two));
        assert_eq!(board.house(Player::One), 15);
    }

    #[test]
    fn rejected_move_leaves_board_untouched() {
        let mut board = Board::new(4, 4).unwrap();
        let before = board;
        assert_eq!(
            resolve_move(&mut board, Player::Two, 4),
            Err(BoardError::IndexOutOfRange { index: 4, pockets: 4 })
        );
        assert_eq!(board, before);
    }
}
