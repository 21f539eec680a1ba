//! Line-delimited JSON codec for protocol messages

use serde_json::Value;
use tokio_util::bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};
use crate::error::DecodeError;
use crate::game::Player;
use super::message::{
    Message, RoomId, CODE_BOARD_SIZE, CODE_JOIN, CODE_LEAVE, CODE_MATCHED, CODE_MOVE,
    CODE_OPPONENT_LEFT,
};

/// Serialize a message as one newline-terminated line
pub fn encode(message: &Message) -> String {
    let mut line = message.to_value().to_string();
    line.push('\n');
    line
}

/// Parse one line (with or without its terminator) into a message
pub fn decode(line: &str) -> Result<Message, DecodeError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(DecodeError::Empty);
    }

    let value: Value = serde_json::from_str(line)?;
    let items = value.as_array().ok_or(DecodeError::NotAnArray)?;
    let code = items
        .first()
        .and_then(Value::as_i64)
        .ok_or(DecodeError::MissingCode)?;
    let fields = &items[1..];

    match code {
        CODE_JOIN => expect_arity(code, fields, 0).map(|_| Message::Join),
        CODE_LEAVE => expect_arity(code, fields, 0).map(|_| Message::Leave),
        CODE_OPPONENT_LEFT => expect_arity(code, fields, 0).map(|_| Message::OpponentLeft),
        CODE_MATCHED => {
            expect_arity(code, fields, 2)?;
            let room = RoomId::from_value(&fields[0])
                .ok_or(DecodeError::InvalidField { code, field: "room_id" })?;
            let role = fields[1]
                .as_u64()
                .and_then(Player::from_index)
                .ok_or(DecodeError::InvalidField { code, field: "role" })?;
            Ok(Message::Matched { room, role })
        }
        CODE_BOARD_SIZE => {
            expect_arity(code, fields, 3)?;
            expect_tag(code, &fields[0])?;
            Ok(Message::BoardSize {
                rows: field_usize(code, &fields[1], "rows")?,
                cols: field_usize(code, &fields[2], "cols")?,
            })
        }
        CODE_MOVE => {
            expect_arity(code, fields, 3)?;
            expect_tag(code, &fields[0])?;
            Ok(Message::Move {
                row: field_usize(code, &fields[1], "row")?,
                col: field_usize(code, &fields[2], "col")?,
            })
        }
        other => Err(DecodeError::UnknownCode(other)),
    }
}

fn expect_arity(code: i64, fields: &[Value], expected: usize) -> Result<(), DecodeError> {
    if fields.len() != expected {
        return Err(DecodeError::Arity {
            code,
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

// The tag text is informational; any string is accepted.
fn expect_tag(code: i64, value: &Value) -> Result<(), DecodeError> {
    if value.is_string() {
        Ok(())
    } else {
        Err(DecodeError::InvalidField { code, field: "tag" })
    }
}

fn field_usize(code: i64, value: &Value, field: &'static str) -> Result<usize, DecodeError> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(DecodeError::InvalidField { code, field })
}

/// Framing codec for a connected relay stream.
///
/// Decoded frames carry their own `Result` so a single bad line never ends
/// the stream; only I/O failures surface as the codec error.
#[derive(Debug, Clone)]
pub struct MessageCodec {
    lines: LinesCodec,
}

impl MessageCodec {
    pub fn new(max_line_length: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max_line_length),
        }
    }

    fn frame(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<Result<Message, DecodeError>>, std::io::Error> {
        match result {
            Ok(Some(line)) => Ok(Some(decode(&line))),
            Ok(None) => Ok(None),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Err(DecodeError::LineTooLong))),
            Err(LinesCodecError::Io(err)) if err.kind() == std::io::ErrorKind::InvalidData => {
                Ok(Some(Err(DecodeError::InvalidUtf8)))
            }
            Err(LinesCodecError::Io(err)) => Err(err),
        }
    }
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self {
            lines: LinesCodec::new(),
        }
    }
}

impl Decoder for MessageCodec {
    type Item = Result<Message, DecodeError>;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::frame(self.lines.decode(src))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::frame(self.lines.decode_eof(src))
    }
}

impl Encoder<Message> for MessageCodec {
    type Error = std::io::Error;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let line = encode(&item);
        dst.reserve(line.len());
        dst.extend_from_slice(line.as_bytes());
        Ok(())
    }
}
