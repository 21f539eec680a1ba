//! Network client: background listener and foreground turn coordinator

pub mod connection;
pub mod coordinator;
pub mod event;
pub mod input;
pub mod listener;

pub use connection::{connect, run_match};
pub use coordinator::{Outcome, TurnCoordinator};
pub use event::Event;
pub use input::{parse_board_size, parse_pair, spawn_line_reader, spawn_stdin_reader};
pub use listener::{Listener, Translator};
