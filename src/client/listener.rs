//! Background reader for the relay stream
//!
//! The listener owns the read half of the connection. It decodes each line,
//! translates it into zero or more [`Event`]s and queues them for the turn
//! coordinator. It never touches the game session.

use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::codec::FramedRead;
use tracing::{debug, info, warn};
use crate::game::Player;
use crate::protocol::{Message, MessageCodec};
use super::event::Event;

/// Pure message-to-event translation.
///
/// The only state kept here is the seat assigned by the relay, which decides
/// who is granted the first turn once the board size is known.
#[derive(Debug, Default)]
pub struct Translator {
    role: Option<Player>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat assigned by the last `MATCHED` message, if any
    pub fn role(&self) -> Option<Player> {
        self.role
    }

    pub fn translate(&mut self, message: Message) -> Vec<Event> {
        match message {
            Message::Matched { room, role } => {
                info!(%room, role = role.index(), "matched with opponent");
                self.role = Some(role);
                let mut events = vec![Event::Matched { room, role }];
                if role.chooses_board() {
                    events.push(Event::WaitTurn);
                }
                events
            }
            Message::BoardSize { rows, cols } => {
                let mut events = vec![Event::OpponentBoardSize { rows, cols }];
                if self.role.is_some_and(|role| !role.chooses_board()) {
                    events.push(Event::YourTurn);
                }
                events
            }
            Message::Move { row, col } => vec![Event::OpponentMove { row, col }],
            Message::OpponentLeft => {
                if self.role.take().is_some() {
                    vec![Event::OpponentLeft]
                } else {
                    debug!("opponent left before a match was made");
                    Vec::new()
                }
            }
            Message::Join | Message::Leave => {
                debug!(code = message.code(), "ignoring client-bound code from relay");
                Vec::new()
            }
        }
    }
}

/// Reads framed messages until the stream ends, then emits [`Event::End`]
pub struct Listener<R> {
    frames: FramedRead<R, MessageCodec>,
    events: UnboundedSender<Event>,
    translator: Translator,
}

impl<R> Listener<R>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    pub fn new(reader: R, events: UnboundedSender<Event>, max_line_length: usize) -> Self {
        Self {
            frames: FramedRead::new(reader, MessageCodec::new(max_line_length)),
            events,
            translator: Translator::new(),
        }
    }

    /// Run the listener on its own task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        while let Some(frame) = self.frames.next().await {
            match frame {
                Ok(Ok(message)) => {
                    debug!(code = message.code(), "<< {}", message);
                    for event in self.translator.translate(message) {
                        if self.events.send(event).is_err() {
                            debug!("coordinator has gone away, listener stopping");
                            return;
                        }
                    }
                }
                Ok(Err(err)) => debug!(error = %err, "dropping malformed line"),
                Err(err) => {
                    warn!(error = %err, "relay read failed");
                    break;
                }
            }
        }

        info!("relay stream closed");
        let _ = self.events.send(Event::End);
    }
}
