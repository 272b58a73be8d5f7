//! Move resolution.
//!
//! Applies a move to the board (sowing), performs captures, and detects and
//! settles the end of the game. Each step is a separate call so a controller
//! can order them; see [`crate::game`] for the turn cycle.

pub mod capture;
pub mod endgame;
pub mod sow;
pub mod turn;

pub use capture::capture;
pub use endgame::{finalize, is_over};
pub use sow::{make_move, MoveOutcome};
pub use turn::{resolve_move, Resolution};
