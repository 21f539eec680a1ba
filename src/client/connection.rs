//! Relay connection setup and match wiring

use std::io::Write;
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use crate::config::{ChompConfig, NetworkConfig};
use crate::error::{ChompError, ChompResult};
use super::coordinator::{Outcome, TurnCoordinator};
use super::listener::Listener;

/// Open a TCP connection to the relay within the configured timeout
pub async fn connect(host: &str, port: u16, network: &NetworkConfig) -> ChompResult<TcpStream> {
    match timeout(network.connect_timeout(), TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => {
            info!(host, port, "connected to relay");
            Ok(stream)
        }
        Ok(Err(err)) => Err(ChompError::Connection {
            message: format!("failed to connect to {}:{}: {}", host, port, err),
        }),
        Err(_) => Err(ChompError::Connection {
            message: format!(
                "timed out connecting to {}:{} after {}s",
                host, port, network.connect_timeout_secs
            ),
        }),
    }
}

/// Play one match over an established connection.
///
/// Spawns the listener on the read half, runs the coordinator on the write
/// half, and gives the listener a short grace period to observe the end of
/// the stream once the coordinator is done.
pub async fn run_match<C>(
    stream: TcpStream,
    config: &ChompConfig,
    input: UnboundedReceiver<String>,
    shutdown: CancellationToken,
    console: C,
) -> Outcome
where
    C: Write + Send + 'static,
{
    let (reader, writer) = stream.into_split();
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let mut listener = Listener::new(reader, events_tx, config.network.max_line_length).spawn();

    let outcome = TurnCoordinator::new(events_rx, input, writer, config)
        .with_console(console)
        .with_shutdown(shutdown)
        .run()
        .await;

    if timeout(config.network.shutdown_grace(), &mut listener).await.is_err() {
        debug!("listener still reading after grace period, aborting");
        listener.abort();
    }

    outcome
}
