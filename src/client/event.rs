//! Local events passed from the listener to the turn coordinator

use crate::game::Player;
use crate::protocol::RoomId;

/// Semantic event derived from inbound relay traffic.
///
/// Produced only by the listener and consumed only by the coordinator, in
/// the order the underlying messages arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Matched { room: RoomId, role: Player },
    OpponentBoardSize { rows: usize, cols: usize },
    OpponentMove { row: usize, col: usize },
    OpponentLeft,
    /// The local seat now holds the turn
    YourTurn,
    /// The opponent holds the turn
    WaitTurn,
    /// The relay stream ended
    End,
}
