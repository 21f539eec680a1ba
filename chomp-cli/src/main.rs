use anyhow::Result;
use clap::Parser;
use colored::*;
use tokio_util::sync::CancellationToken;

use chomp::client::{self, Outcome};
use chomp::{init_logging, ChompConfig};

#[derive(Parser)]
#[command(name = "chomp-client")]
#[command(about = "Play poisoned chocolate against an opponent through a matchmaking relay")]
struct Cli {
    /// Relay host name or address
    host: String,

    /// Relay TCP port
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments; bad usage exits here without connecting
    let cli = Cli::parse();

    let config = ChompConfig::default();
    init_logging(&config.logging)?;

    // Ctrl-C leaves the match instead of killing the process
    let shutdown = CancellationToken::new();
    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received");
            interrupt.cancel();
        }
    });

    let stream = tokio::select! {
        stream = client::connect(&cli.host, cli.port, &config.network) => stream?,
        _ = shutdown.cancelled() => {
            println!("Interrupted before connecting.");
            return Ok(());
        }
    };
    println!("{}", format!("Connected to {}:{}", cli.host, cli.port).cyan());

    let input = client::spawn_stdin_reader()?;
    let outcome = client::run_match(stream, &config, input, shutdown, std::io::stdout()).await;

    report(outcome);
    println!("{}", "Connection closed.".dimmed());

    Ok(())
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Finished { .. } if outcome.local_won() => {
            println!("{}", "You won the match.".green().bold());
        }
        Outcome::Finished { .. } => println!("{}", "You lost the match.".red().bold()),
        Outcome::OpponentLeft => println!("{}", "Your opponent left the match.".yellow()),
        Outcome::Disconnected => println!("{}", "Disconnected from server.".yellow()),
        Outcome::Interrupted => println!("Left the match."),
        Outcome::InputClosed => println!("Input closed, left the match."),
    }
}
