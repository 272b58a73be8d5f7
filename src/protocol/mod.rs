//! KAI protocol handling.
//!
//! This module implements the KFEN position notation and the command parser
//! for the main loop of the `kalah` binary.

pub mod kfen;
pub mod parser;

pub use kfen::{encode_kfen, parse_kfen, KfenError};
pub use parser::{parse_command, Command};
