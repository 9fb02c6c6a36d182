pub mod board;
pub mod game;
pub mod generator;
pub mod pawn;
pub mod rules;
