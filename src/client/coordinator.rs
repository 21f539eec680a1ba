//! Foreground turn loop
//!
//! The coordinator is the sole owner of the [`GameSession`]. It folds events
//! from the listener into the session, asks the local player for a board size
//! or a move when appropriate, and sends the resulting messages to the relay.
//! Every wait is a `select!` over inbound events, interactive input and the
//! shutdown token, so a departing opponent or a closed connection always
//! interrupts a pending prompt.

use std::collections::VecDeque;
use std::fmt::Display;
use std::io::Write;
use futures::SinkExt;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::codec::FramedWrite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use crate::config::{ChompConfig, GameConfig};
use crate::game::{GameSession, MatchResult, Player};
use crate::protocol::{Message, MessageCodec, RoomId};
use super::event::Event;
use super::input::{parse_board_size, parse_pair};

/// Where the coordinator is in the match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    AwaitingMatch,
    AwaitingBoardSetup,
    MyTurn,
    OpponentTurn,
    /// Terminal; nothing leaves this phase
    Concluded,
}

/// How a run of the coordinator ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The match was decided on the board
    Finished { winner: Player, local_role: Player },
    OpponentLeft,
    /// The relay closed the connection
    Disconnected,
    /// The local player asked to quit
    Interrupted,
    /// Interactive input reached end of file
    InputClosed,
}

impl Outcome {
    pub fn local_won(&self) -> bool {
        matches!(self, Outcome::Finished { winner, local_role } if winner == local_role)
    }
}

pub struct TurnCoordinator<W> {
    events: UnboundedReceiver<Event>,
    backlog: VecDeque<Event>,
    input: UnboundedReceiver<String>,
    outbound: FramedWrite<W, MessageCodec>,
    console: Box<dyn Write + Send>,
    shutdown: CancellationToken,
    limits: GameConfig,
    phase: Phase,
    role: Option<Player>,
    session: Option<GameSession>,
    outcome: Option<Outcome>,
    prompted: bool,
}

impl<W> TurnCoordinator<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(
        events: UnboundedReceiver<Event>,
        input: UnboundedReceiver<String>,
        writer: W,
        config: &ChompConfig,
    ) -> Self {
        Self {
            events,
            backlog: VecDeque::new(),
            input,
            outbound: FramedWrite::new(writer, MessageCodec::new(config.network.max_line_length)),
            console: Box::new(std::io::stdout()),
            shutdown: CancellationToken::new(),
            limits: config.game.clone(),
            phase: Phase::AwaitingMatch,
            role: None,
            session: None,
            outcome: None,
            prompted: false,
        }
    }

    /// Send user-facing text somewhere other than stdout
    pub fn with_console(mut self, console: impl Write + Send + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Join the matchmaking queue and play until the match ends
    pub async fn run(mut self) -> Outcome {
        self.send(Message::Join).await;
        self.say(">> Queued for matchmaking");

        loop {
            while let Some(event) = self.next_pending() {
                self.fold(event).await;
                if self.phase == Phase::Concluded {
                    break;
                }
            }

            if let Some(outcome) = self.finished() {
                return outcome;
            }

            if self.phase == Phase::MyTurn && !self.prompted {
                self.prompt("Enter move (row col): ");
                self.prompted = true;
            }

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    self.leave().await;
                    self.conclude(Outcome::Interrupted);
                }
                event = self.events.recv() => {
                    self.fold(event.unwrap_or(Event::End)).await;
                }
                line = self.input.recv() => match line {
                    Some(line) => self.handle_line(&line).await,
                    None => {
                        self.leave().await;
                        self.conclude(Outcome::InputClosed);
                    }
                },
            }
        }
    }

    fn next_pending(&mut self) -> Option<Event> {
        self.backlog
            .pop_front()
            .or_else(|| self.events.try_recv().ok())
    }

    fn finished(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Concluded => Some(self.outcome.unwrap_or(Outcome::Disconnected)),
            _ => None,
        }
    }

    async fn fold(&mut self, event: Event) {
        if self.phase == Phase::Concluded {
            return;
        }
        debug!(?event, phase = ?self.phase, "folding event");

        match event {
            Event::Matched { room, role } => self.on_matched(room, role).await,
            Event::OpponentBoardSize { rows, cols } => self.on_board_size(rows, cols),
            Event::OpponentMove { row, col } => self.on_opponent_move(row, col),
            Event::YourTurn => {
                if self.session.as_ref().is_some_and(GameSession::is_local_turn) {
                    self.set_phase(Phase::MyTurn);
                } else {
                    debug!("turn grant does not match the board, ignoring");
                }
            }
            Event::WaitTurn => {
                if self.session.as_ref().is_some_and(GameSession::is_active) {
                    self.set_phase(Phase::OpponentTurn);
                }
            }
            Event::OpponentLeft => {
                self.say("Opponent disconnected.");
                self.conclude(Outcome::OpponentLeft);
            }
            Event::End => self.conclude(Outcome::Disconnected),
        }
    }

    async fn on_matched(&mut self, room: RoomId, role: Player) {
        if self.phase != Phase::AwaitingMatch {
            warn!(%room, "unexpected second match announcement");
            return;
        }

        self.role = Some(role);
        self.phase = Phase::AwaitingBoardSetup;
        self.say(format!("Matched! Room: {}, Role: {}", room, role.index()));

        if role.chooses_board() {
            self.choose_board_size(role).await;
        }
    }

    /// Ask seat 0 for the board dimensions, then announce them.
    ///
    /// Events that arrive meanwhile are kept in order for the main loop,
    /// except those that end the match.
    async fn choose_board_size(&mut self, role: Player) {
        let mut prompted = false;

        loop {
            if !prompted {
                self.prompt("Enter board size (rows cols): ");
                prompted = true;
            }

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    self.leave().await;
                    self.conclude(Outcome::Interrupted);
                    return;
                }
                event = self.events.recv() => match event.unwrap_or(Event::End) {
                    Event::End => {
                        self.conclude(Outcome::Disconnected);
                        return;
                    }
                    Event::OpponentLeft => {
                        self.say("Opponent disconnected.");
                        self.conclude(Outcome::OpponentLeft);
                        return;
                    }
                    other => self.backlog.push_back(other),
                },
                line = self.input.recv() => {
                    let Some(line) = line else {
                        self.leave().await;
                        self.conclude(Outcome::InputClosed);
                        return;
                    };

                    match parse_board_size(&line, &self.limits) {
                        Ok((rows, cols)) => {
                            self.send(Message::BoardSize { rows, cols }).await;
                            self.say(format!(">> Sent board size {}x{}", rows, cols));
                            self.start_session(rows, cols, role);
                            return;
                        }
                        Err(err) => {
                            self.say(err);
                            prompted = false;
                        }
                    }
                }
            }
        }
    }

    fn on_board_size(&mut self, rows: usize, cols: usize) {
        let Some(role) = self.role else {
            warn!(rows, cols, "board size announced before a match, ignoring");
            return;
        };
        if self.session.is_some() || role.chooses_board() {
            debug!(rows, cols, "board already set up, ignoring announcement");
            return;
        }
        if let Err(err) = self.limits.check_board_size(rows, cols) {
            warn!(rows, cols, error = %err, "opponent announced an unplayable board, ignoring");
            return;
        }
        self.start_session(rows, cols, role);
    }

    fn start_session(&mut self, rows: usize, cols: usize, role: Player) {
        let session = GameSession::new(rows, cols, role);
        self.say(format!("Game started: {}x{}", rows, cols));
        self.say(session.board().render());
        info!(rows, cols, role = role.index(), "session created");

        self.session = Some(session);
        // The turn itself is granted by a later YourTurn event.
        self.set_phase(Phase::OpponentTurn);
    }

    fn on_opponent_move(&mut self, row: usize, col: usize) {
        let Some(session) = self.session.as_mut() else {
            warn!(row, col, "opponent move before the board exists, ignoring");
            return;
        };

        if let Err(err) = session.apply_remote(row, col) {
            warn!(row, col, error = %err, "dropping opponent move");
            return;
        }
        let result = session.result();
        let rendered = session.board().render();

        self.say(format!("Opponent moved at ({},{})", row, col));
        self.say(rendered);

        match result {
            MatchResult::Won(winner) => self.finish(winner),
            MatchResult::Active => self.set_phase(Phase::MyTurn),
        }
    }

    async fn handle_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            self.prompted = false;
            return;
        }
        if self.phase != Phase::MyTurn {
            self.say("Not your turn yet, waiting for the opponent.");
            return;
        }

        let (row, col) = match parse_pair(line) {
            Ok(pair) => pair,
            Err(err) => {
                self.say(format!("Bad input, try again. ({})", err));
                self.prompted = false;
                return;
            }
        };

        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.board().is_legal(row, col) {
            self.say("Invalid move, try again.");
            self.prompted = false;
            return;
        }
        if let Err(err) = session.apply_local(row, col) {
            self.say(format!("Invalid move, try again. ({})", err));
            self.prompted = false;
            return;
        }
        let result = session.result();
        let rendered = session.board().render();

        self.send(Message::Move { row, col }).await;
        self.say(">> Sent move");
        self.say(rendered);

        match result {
            MatchResult::Won(winner) => self.finish(winner),
            MatchResult::Active => self.set_phase(Phase::OpponentTurn),
        }
    }

    fn finish(&mut self, winner: Player) {
        let local_role = self.role.unwrap_or(winner);
        if winner == local_role {
            self.say(format!("Game over! Winner: Player {}. You win!", winner.index()));
        } else {
            self.say(format!("Game over! Winner: Player {}. You ate the poison.", winner.index()));
        }
        self.conclude(Outcome::Finished { winner, local_role });
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase == Phase::Concluded {
            return;
        }
        if phase == Phase::MyTurn && self.phase != Phase::MyTurn {
            self.prompted = false;
        }
        self.phase = phase;
    }

    fn conclude(&mut self, outcome: Outcome) {
        if self.phase == Phase::Concluded {
            return;
        }
        info!(?outcome, "match concluded");
        self.outcome = Some(outcome);
        self.phase = Phase::Concluded;
    }

    /// Best-effort LEAVE followed by closing our half of the connection
    async fn leave(&mut self) {
        self.send(Message::Leave).await;
        if let Err(err) = self.outbound.close().await {
            debug!(error = %err, "closing relay stream failed");
        }
        self.say(">> Sent LEAVE");
    }

    async fn send(&mut self, message: Message) {
        debug!(code = message.code(), ">> {}", message);
        if let Err(err) = self.outbound.send(message).await {
            warn!(error = %err, "send to relay failed");
        }
    }

    fn say(&mut self, text: impl Display) {
        let _ = writeln!(self.console, "{}", text);
        let _ = self.console.flush();
    }

    fn prompt(&mut self, text: &str) {
        let _ = write!(self.console, "{}", text);
        let _ = self.console.flush();
    }
}
