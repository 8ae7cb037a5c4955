mod game;
mod input;
mod network;

use clap::Parser;
use input::BallChaser;
use log::info;
use network::Client;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short, long, default_value = "127.0.0.1:9000")]
    server: String,

    /// Number of frames to play before disconnecting (0 = unlimited)
    #[arg(short, long, default_value = "0")]
    frames: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let budget = if args.frames == 0 {
        None
    } else {
        Some(args.frames)
    };

    let mut client = Client::connect(&args.server).await?;
    info!(
        "Joined a {}x{} match at {} ticks/s",
        client.state.resolution.0, client.state.resolution.1, client.state.tick_rate
    );

    let mut controller = BallChaser::new();
    client.run(&mut controller, budget).await?;

    Ok(())
}
