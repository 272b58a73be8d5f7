//! Board representation and game-state types.
//!
//! Contains the players, the pocket/house state, and the track geometry
//! stones are sown along.

pub mod player;
pub mod state;
pub mod track;

pub use player::{Player, ALL_PLAYERS};
pub use state::{
    check_config, Board, BoardError, Snapshot, DEFAULT_POCKETS, DEFAULT_STONES, MAX_POCKETS,
    MAX_STONES, MIN_POCKETS, MIN_STONES,
};
pub use track::{Cell, Track};
