mod game;
mod network;
mod roster;

use clap::Parser;
use log::info;
use network::Server;
use shared::{FIELD_HEIGHT, FIELD_WIDTH, PLAYER_LIMIT, TICK_RATE};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "9000")]
    port: u16,

    /// Tick rate (updates per second)
    #[arg(short, long, default_value_t = TICK_RATE)]
    tick_rate: u32,

    /// Number of players to wait for before starting
    #[arg(long, default_value_t = PLAYER_LIMIT)]
    players: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let address = format!("{}:{}", args.host, args.port);

    info!(
        "Starting match server on {} at {} ticks/s for {} players",
        address, args.tick_rate, args.players
    );

    let mut server = Server::bind(
        &address,
        (FIELD_WIDTH as u32, FIELD_HEIGHT as u32),
        args.tick_rate,
        args.players,
    )
    .await?;

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
