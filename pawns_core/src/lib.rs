//! Rules engine and full-width minimax search for pawns chess, a chess
//! variant played on an N×N grid with nothing but pawns.

pub mod engine;
pub mod logic;
