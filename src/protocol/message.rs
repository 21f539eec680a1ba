//! Wire messages exchanged with the matchmaking relay
//!
//! Every message is a JSON array whose first element is an integer code.

use std::fmt;
use serde_json::{json, Value};
use crate::game::Player;

pub const CODE_JOIN: i64 = 100;
pub const CODE_LEAVE: i64 = 101;
pub const CODE_MATCHED: i64 = 110;
pub const CODE_OPPONENT_LEFT: i64 = 111;
pub const CODE_BOARD_SIZE: i64 = 210;
pub const CODE_MOVE: i64 = 220;

/// Tag sent as the first field of a board-size announcement
pub const BOARD_SIZE_TAG: &str = "size";
/// Tag sent as the first field of a move announcement
pub const MOVE_TAG: &str = "move";

/// Room identifier assigned by the relay; either numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomId {
    Number(u64),
    Name(String),
}

impl RoomId {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(RoomId::Name(name.clone())),
            Value::Number(number) => number.as_u64().map(RoomId::Number),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            RoomId::Number(number) => json!(number),
            RoomId::Name(name) => json!(name),
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomId::Number(number) => write!(f, "{}", number),
            RoomId::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A protocol message, symmetric for inbound and outbound traffic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Enter the matchmaking queue
    Join,
    /// Leave the queue or the current room
    Leave,
    /// Paired with an opponent in `room`, seated as `role`
    Matched { room: RoomId, role: Player },
    /// The peer disconnected
    OpponentLeft,
    /// Board dimensions chosen by seat 0, relayed to the peer
    BoardSize { rows: usize, cols: usize },
    /// A square eaten by the sender
    Move { row: usize, col: usize },
}

impl Message {
    pub fn code(&self) -> i64 {
        match self {
            Message::Join => CODE_JOIN,
            Message::Leave => CODE_LEAVE,
            Message::Matched { .. } => CODE_MATCHED,
            Message::OpponentLeft => CODE_OPPONENT_LEFT,
            Message::BoardSize { .. } => CODE_BOARD_SIZE,
            Message::Move { .. } => CODE_MOVE,
        }
    }

    /// Array form of the message as it appears on the wire
    pub fn to_value(&self) -> Value {
        match self {
            Message::Join | Message::Leave | Message::OpponentLeft => json!([self.code()]),
            Message::Matched { room, role } => json!([self.code(), room.to_value(), role.index()]),
            Message::BoardSize { rows, cols } => json!([self.code(), BOARD_SIZE_TAG, rows, cols]),
            Message::Move { row, col } => json!([self.code(), MOVE_TAG, row, col]),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}
