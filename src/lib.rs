//! Kalah engine library.
//!
//! Exposes the board representation, move generation, move resolution, game
//! controller and protocol modules for use by integration tests and the
//! binary entry points.

pub mod board;
pub mod engine;
pub mod game;
pub mod movegen;
pub mod policy;
pub mod protocol;
pub mod resolve;
pub mod selfplay;
