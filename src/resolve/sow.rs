//! Sowing: applying a single move to the board.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError, Cell, Player, Track};

/// What the last sown stone means for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The last stone landed in the mover's house; the mover goes again.
    ExtraTurn,
    /// The last stone landed in an empty pocket on the mover's side. The
    /// stone has been placed, the sweep of the opposite pocket is a separate
    /// step (see [`super::capture`]).
    Capture(usize),
    /// Anything else; the turn passes.
    TurnEnds,
}

/// Sows the stones of `pocket` for `player`.
///
/// Stones are dropped one per cell along the track starting after the
/// chosen pocket, skipping the opponent's house. Whole laps are added in one
/// pass, so the cost does not grow with the number of laps.
pub fn make_move(
    board: &mut Board,
    player: Player,
    pocket: usize,
) -> Result<MoveOutcome, BoardError> {
    board.check_index(pocket)?;
    let stones = board.sides[player.index()][pocket];
    if stones == 0 {
        return Err(BoardError::EmptyPocketMove(pocket));
    }
    board.sides[player.index()][pocket] = 0;

    let track = Track::new(board.pockets);
    let lap = track.lap_len() as u32;
    let laps = stones / lap;
    let rest = stones % lap;

    let mut pos = track.position_of(Cell::Pocket(player, pocket));
    if laps > 0 {
        // A full lap ends back on the starting pocket.
        for _ in 0..lap {
            pos = track.next(pos, player);
            deposit(board, track.cell_at(pos), laps);
        }
    }
    for _ in 0..rest {
        pos = track.next(pos, player);
        deposit(board, track.cell_at(pos), 1);
    }

    let outcome = match track.cell_at(pos) {
        Cell::House(owner) if owner == player => MoveOutcome::ExtraTurn,
        Cell::Pocket(owner, i) if owner == player && board.sides[owner.index()][i] == 1 => {
            MoveOutcome::Capture(i)
        }
        _ => MoveOutcome::TurnEnds,
    };
    Ok(outcome)
}

fn deposit(board: &mut Board, cell: Cell, stones: u32) {
    match cell {
        Cell::Pocket(owner, i) => board.sides[owner.index()][i] += stones,
        Cell::House(owner) => board.houses[owner.index()] += stones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_one_pocket_two_on_fresh_board() {
        let mut board = Board::new(6, 4).unwrap();
        let outcome = make_move(&mut board, Player::One, 2).unwrap();

        // Pockets 1 and 0, the house, then the opponent's pocket 0.
        assert_eq!(outcome, MoveOutcome::TurnEnds);
        assert_eq!(board.side(Player::One), &[5, 5, 0, 4, 4, 4]);
        assert_eq!(board.house(Player::One), 1);
        assert_eq!(board.side(Player::Two), &[5, 4, 4, 4, 4, 4]);
        assert_eq!(board.house(Player::Two), 0);
        assert_eq!(board.stone_count(), 48);
    }

    #[test]
    fn player_one_last_stone_in_house() {
        let mut board = Board::new(6, 4).unwrap();
        let outcome = make_move(&mut board, Player::One, 3).unwrap();
        assert_eq!(outcome, MoveOutcome::ExtraTurn);
        assert_eq!(board.side(Player::One), &[5, 5, 5, 0, 4, 4]);
        assert_eq!(board.house(Player::One), 1);
        assert_eq!(board.side(Player::Two), &[4, 4, 4, 4, 4, 4]);
    }

    #[test]
    fn player_two_last_stone_in_house() {
        let mut board = Board::new(6, 4).unwrap();
        let outcome = make_move(&mut board, Player::Two, 2).unwrap();
        assert_eq!(outcome, MoveOutcome::ExtraTurn);
        assert_eq!(board.side(Player::Two), &[4, 4, 0, 5, 5, 5]);
        assert_eq!(board.house(Player::Two), 1);
        assert_eq!(board.side(Player::One), &[4, 4, 4, 4, 4, 4]);
    }

    #[test]
    fn single_stone_next_to_house() {
        let mut board =
            Board::from_position(4, 4, [&[1, 3, 4, 4], &[4, 4, 4, 4]], [4, 0]).unwrap();
        let outcome = make_move(&mut board, Player::One, 0).unwrap();
        assert_eq!(outcome, MoveOutcome::ExtraTurn);
        assert_eq!(board.side(Player::One), &[0, 3, 4, 4]);
        assert_eq!(board.house(Player::One), 5);
    }

    #[test]
    fn player_one_lands_in_empty_own_pocket() {
        let mut board =
            Board::from_position(4, 4, [&[0, 0, 1, 5], &[4, 4, 4, 4]], [6, 4]).unwrap();
        let outcome = make_move(&mut board, Player::One, 2).unwrap();
        assert_eq!(outcome, MoveOutcome::Capture(1));
        assert_eq!(board.side(Player::One), &[0, 1, 0, 5]);
        // The sweep is not part of sowing.
        assert_eq!(board.side(Player::Two), &[4, 4, 4, 4]);
        assert_eq!(board.house(Player::One), 6);
    }

    #[test]
    fn player_two_lands_in_empty_own_pocket() {
        let mut board =
            Board::from_position(4, 4, [&[2, 2, 2, 2], &[0, 1, 0, 3]], [10, 10]).unwrap();
        let outcome = make_move(&mut board, Player::Two, 1).unwrap();
        assert_eq!(outcome, MoveOutcome::Capture(2));
        assert_eq!(board.side(Player::Two), &[0, 0, 1, 3]);
    }

    #[test]
    fn landing_on_opponent_empty_pocket_is_not_capture() {
        let mut board =
            Board::from_position(4, 4, [&[2, 3, 4, 4], &[0, 4, 4, 4]], [3, 4]).unwrap();
        // House, then the opponent's empty pocket 0.
        assert_eq!(make_move(&mut board, Player::One, 0).unwrap(), MoveOutcome::TurnEnds);
        assert_eq!(board.side(Player::Two), &[1, 4, 4, 4]);
        assert_eq!(board.house(Player::One), 4);
    }

    #[test]
    fn multiple_laps_skip_opponent_house_every_time() {
        let mut board =
            Board::from_position(4, 4, [&[0, 0, 0, 20], &[1, 1, 1, 1]], [4, 4]).unwrap();
        let outcome = make_move(&mut board, Player::One, 3).unwrap();

        // 20 stones over a 9-cell lap: two full laps, then two more cells.
        assert_eq!(outcome, MoveOutcome::TurnEnds);
        assert_eq!(board.side(Player::One), &[2, 3, 3, 2]);
        assert_eq!(board.house(Player::One), 6);
        assert_eq!(board.side(Player::Two), &[3, 3, 3, 3]);
        assert_eq!(board.house(Player::Two), 4);
        assert_eq!(board.stone_count(), 32);
    }

    #[test]
    fn exact_lap_lands_on_emptied_origin() {
        let mut board =
            Board::from_position(4, 4, [&[1, 0, 9, 0], &[2, 2, 2, 2]], [7, 7]).unwrap();
        let outcome = make_move(&mut board, Player::One, 2).unwrap();
        assert_eq!(outcome, MoveOutcome::Capture(2));
        assert_eq!(board.side(Player::One), &[2, 1, 1, 1]);
        assert_eq!(board.house(Player::One), 8);
        assert_eq!(board.side(Player::Two), &[3, 3, 3, 3]);
        assert_eq!(board.house(Player::Two), 7);
    }

    #[test]
    fn two_exact_laps_end_on_origin_without_capture() {
        let mut board =
            Board::from_position(4, 4, [&[0, 0, 18, 0], &[1, 1, 1, 1]], [5, 5]).unwrap();
        let outcome = make_move(&mut board, Player::One, 2).unwrap();
        assert_eq!(outcome, MoveOutcome::TurnEnds);
        assert_eq!(board.side(Player::One), &[2, 2, 2, 2]);
        assert_eq!(board.house(Player::One), 7);
        assert_eq!(board.side(Player::Two), &[3, 3, 3, 3]);
        assert_eq!(board.house(Player::Two), 5);
    }

    #[test]
    fn player_two_laps_skip_player_one_house() {
        let mut board =
            Board::from_position(4, 4, [&[1, 1, 1, 1], &[19, 0, 0, 0]], [4, 5]).unwrap();
        let outcome = make_move(&mut board, Player::Two, 0).unwrap();
        // Two laps of 9, then one more stone into pocket 1.
        assert_eq!(outcome, MoveOutcome::TurnEnds);
        assert_eq!(board.house(Player::One), 4);
        assert_eq!(board.house(Player::Two), 7);
        assert_eq!(board.side(Player::Two), &[2, 3, 2, 2]);
        assert_eq!(board.side(Player::One), &[3, 3, 3, 3]);
        assert_eq!(board.stone_count(), 32);
    }

    #[test]
    fn out_of_range_pocket_rejected_without_mutation() {
        let mut board = Board::new(6, 4).unwrap();
        let before = board;
        assert_eq!(
            make_move(&mut board, Player::One, 6),
            Err(BoardError::IndexOutOfRange { index: 6, pockets: 6 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn empty_pocket_rejected_without_mutation() {
        let mut board =
            Board::from_position(4, 4, [&[0, 4, 4, 4], &[4, 4, 4, 4]], [4, 0]).unwrap();
        let before = board;
        assert_eq!(
            make_move(&mut board, Player::One, 0),
            Err(BoardError::EmptyPocketMove(0))
        );
        assert_eq!(board, before);
    }
}
