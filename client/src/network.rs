//! Connection handling and the per-tick exchange.

use crate::game::ClientGameState;
use crate::input::InputSource;
use log::{debug, info};
use shared::protocol::{encode_direction, read_frame, Handshake, StateFrame};
use shared::Paddle;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// A connected peer. Construction performs the full handshake, so a
/// `Client` always holds a complete [`ClientGameState`].
pub struct Client {
    stream: TcpStream,
    pub state: ClientGameState,
}

impl Client {
    /// Connects and reads the two handshake frames: the match
    /// parameters with this peer's own paddle, then the other peers'
    /// paddles in roster order.
    pub async fn connect(addr: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut stream = TcpStream::connect(addr).await?;
        info!("Connected to server at {}", addr);

        let handshake: Handshake = bincode::deserialize(&read_frame(&mut stream).await?)?;
        let others: Vec<Paddle> = bincode::deserialize(&read_frame(&mut stream).await?)?;

        debug!(
            "Handshake complete: {}x{} field, {} ticks/s, {} other peers",
            handshake.resolution.0,
            handshake.resolution.1,
            handshake.tick_rate,
            others.len()
        );

        Ok(Client {
            stream,
            state: ClientGameState::new(handshake, others),
        })
    }

    /// One tick from this side: receive the state broadcast, apply it,
    /// and answer with a single direction byte.
    pub async fn exchange_tick(
        &mut self,
        input: &mut dyn InputSource,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let payload = read_frame(&mut self.stream).await?;
        let frame: StateFrame = serde_json::from_slice(&payload)?;
        self.state.apply_frame(&frame);

        let direction = input.direction(&self.state);
        self.stream
            .write_all(&[encode_direction(direction)])
            .await?;
        Ok(())
    }

    /// Runs the exchange until the server closes the connection or the
    /// frame budget runs out. The server closing between ticks is a
    /// normal end of match, not an error.
    pub async fn run(
        &mut self,
        input: &mut dyn InputSource,
        frame_budget: Option<u64>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut frames: u64 = 0;
        loop {
            if let Some(budget) = frame_budget {
                if frames >= budget {
                    info!("Frame budget of {} reached, disconnecting", budget);
                    return Ok(());
                }
            }

            if let Err(e) = self.exchange_tick(input).await {
                if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
                    if io_err.kind() == std::io::ErrorKind::UnexpectedEof {
                        info!("Server closed the connection after {} frames", frames);
                        return Ok(());
                    }
                }
                return Err(e);
            }
            frames += 1;
        }
    }
}

/// Writes one framed message to an arbitrary stream; used by tests to
/// impersonate a server.
#[cfg(test)]
async fn send_framed(stream: &mut TcpStream, payload: &[u8]) -> std::io::Result<()> {
    shared::protocol::write_frame(stream, payload).await
}
