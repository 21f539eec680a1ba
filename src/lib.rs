//! Chomp - a networked client for the poisoned chocolate game
//!
//! Two players are paired by a matchmaking relay and take turns eating
//! squares off a chocolate bar; whoever eats the poisoned corner loses.
//! The crate provides:
//! - A board engine with move legality and win detection
//! - A line-delimited JSON codec for the relay protocol
//! - A background listener that turns relay traffic into events
//! - A turn coordinator that owns the match and drives the interactive loop

pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod protocol;

// Re-export commonly used types for convenience
pub use error::{ChompError, ChompResult, DecodeError};

// Re-export the game engine
pub use game::{GameBoard, GameSession, MatchResult, Player};

// Re-export protocol types
pub use protocol::{Message, MessageCodec, RoomId};

// Re-export client interfaces
pub use client::{Event, Listener, Outcome, TurnCoordinator};

// Re-export configuration interfaces
pub use config::{ChompConfig, GameConfig, NetworkConfig};
pub use logging::{init_logging, LoggingConfig};
