//! Relay wire protocol: message model and line codec

pub mod codec;
pub mod message;

pub use codec::{decode, encode, MessageCodec};
pub use message::{
    Message, RoomId, BOARD_SIZE_TAG, CODE_BOARD_SIZE, CODE_JOIN, CODE_LEAVE, CODE_MATCHED,
    CODE_MOVE, CODE_OPPONENT_LEFT, MOVE_TAG,
};
