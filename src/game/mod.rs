//! Poisoned chocolate game engine

pub mod board;
pub mod player;
pub mod session;

pub use board::{GameBoard, FIRST_MOVER};
pub use player::{MatchResult, Player};
pub use session::GameSession;
