//! Interactive input: a blocking line pump and the parsers for what it reads

use std::io::BufRead;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};
use crate::config::GameConfig;
use crate::error::{ChompError, ChompResult};

/// Read lines from `reader` on a dedicated OS thread and forward them.
///
/// Terminal reads cannot be cancelled, so they are kept off the async runtime;
/// the coordinator waits on the returned channel instead, which it can select
/// against inbound events. The channel closes when the reader hits EOF.
pub fn spawn_line_reader<R>(reader: R) -> ChompResult<UnboundedReceiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("chomp-input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "failed to read input");
                        break;
                    }
                }
            }
            debug!("input reader finished");
        })?;
    Ok(rx)
}

/// Forward standard input line by line
pub fn spawn_stdin_reader() -> ChompResult<UnboundedReceiver<String>> {
    spawn_line_reader(std::io::BufReader::new(std::io::stdin()))
}

/// Parse two whitespace-separated non-negative integers
pub fn parse_pair(line: &str) -> ChompResult<(usize, usize)> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        [first, second] => {
            let first = first
                .parse()
                .map_err(|_| ChompError::InvalidInput(format!("'{}' is not a number", first)))?;
            let second = second
                .parse()
                .map_err(|_| ChompError::InvalidInput(format!("'{}' is not a number", second)))?;
            Ok((first, second))
        }
        _ => Err(ChompError::InvalidInput(format!(
            "expected two numbers, got '{}'",
            line.trim()
        ))),
    }
}

/// Parse a `rows cols` answer and check it against the board limits
pub fn parse_board_size(line: &str, limits: &GameConfig) -> ChompResult<(usize, usize)> {
    let (rows, cols) = parse_pair(line)?;
    limits.check_board_size(rows, cols)?;
    Ok((rows, cols))
}
