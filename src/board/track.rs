//! Geometry of the sowing track.
//!
//! Both players sow along the same circle of `2 * pockets + 2` cells. Track
//! positions are plain integers:
//!
//! ```text
//! 0 .. n-1      player one's pockets n-1 down to 0
//! n             player one's house
//! n+1 .. 2n     player two's pockets 0 up to n-1
//! 2n+1          player two's house
//! ```
//!
//! Sowing always advances to the next position modulo the track length; the
//! mover skips the opponent's house.

use super::player::Player;

/// A single cell on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Pocket(Player, usize),
    House(Player),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pockets: usize,
}

impl Track {
    pub const fn new(pockets: usize) -> Self {
        Track { pockets }
    }

    /// Number of cells on the full circle, both houses included.
    pub const fn len(&self) -> usize {
        2 * self.pockets + 2
    }

    /// Number of cells a mover sows into per lap (the opponent's house is
    /// never visited).
    pub const fn lap_len(&self) -> usize {
        2 * self.pockets + 1
    }

    pub fn cell_at(&self, pos: usize) -> Cell {
        let n = self.pockets;
        let p = pos % self.len();
        if p < n {
            Cell::Pocket(Player::One, n - 1 - p)
        } else if p == n {
            Cell::House(Player::One)
        } else if p <= 2 * n {
            Cell::Pocket(Player::Two, p - n - 1)
        } else {
            Cell::House(Player::Two)
        }
    }

    pub fn position_of(&self, cell: Cell) -> usize {
        let n = self.pockets;
        match cell {
            Cell::Pocket(Player::One, i) => n - 1 - i,
            Cell::House(Player::One) => n,
            Cell::Pocket(Player::Two, i) => n + 1 + i,
            Cell::House(Player::Two) => 2 * n + 1,
        }
    }

    /// The position after `pos` when `mover` is sowing.
    pub fn next(&self, pos: usize, mover: Player) -> usize {
        let skip = self.position_of(Cell::House(mover.other()));
        let next = (pos + 1) % self.len();
        if next == skip {
            (next + 1) % self.len()
        } else {
            next
        }
    }
}
