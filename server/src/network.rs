//! Listener setup, handshake, and the fixed-tick match loop.

use crate::game::MatchState;
use crate::roster::{Peer, Roster};
use log::{debug, error, info, warn};
use shared::protocol::{write_frame, Handshake, StateFrame};
use shared::PlayField;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::{interval, Instant, MissedTickBehavior};

/// The authoritative match server: owns the listener, the peer roster,
/// and the simulation, and drives them from a single task.
pub struct Server {
    listener: TcpListener,
    game: MatchState,
    roster: Roster,
    resolution: (u32, u32),
    tick_rate: u32,
    player_limit: usize,
}

impl Server {
    /// Binds the listener and prepares an empty match on a field of the
    /// given resolution.
    pub async fn bind(
        addr: &str,
        resolution: (u32, u32),
        tick_rate: u32,
        player_limit: usize,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        let field = PlayField::from_resolution(resolution.0 as f32, resolution.1 as f32);

        Ok(Server {
            listener,
            game: MatchState::new(field),
            roster: Roster::new(),
            resolution,
            tick_rate,
            player_limit,
        })
    }

    /// The bound address, useful when binding to port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the roster is full, performs the
    /// handshake, then runs the match loop until every peer is gone.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.accept_roster().await?;
        self.send_handshakes().await?;
        self.run_match().await;
        Ok(())
    }

    /// Fills the roster in acceptance order; the slot index decides the
    /// paddle's side of the field.
    async fn accept_roster(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        while self.roster.len() < self.player_limit {
            let (stream, addr) = self.listener.accept().await?;
            let slot = self.game.add_paddle();
            self.roster.add(Peer::new(slot, addr, stream));
        }
        info!("Roster full with {} peers, starting match", self.roster.len());
        Ok(())
    }

    /// Two bincode frames per peer: the match parameters with that
    /// peer's own paddle, then every other paddle in roster order
    /// excluding the recipient. A failure here aborts startup; a match
    /// cannot begin with a peer that never saw its own paddle.
    async fn send_handshakes(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        for slot in 0..self.roster.len() {
            let handshake = Handshake {
                resolution: self.resolution,
                tick_rate: self.tick_rate,
                ball: self.game.ball,
                paddle: self
                    .game
                    .paddle(slot)
                    .ok_or("roster slot without a paddle")?
                    .clone(),
            };
            let own = bincode::serialize(&handshake)?;

            let others: Vec<_> = (0..self.game.paddle_count())
                .filter(|&other| other != slot)
                .filter_map(|other| self.game.paddle(other).cloned())
                .collect();
            let roster_msg = bincode::serialize(&others)?;

            if let Some(peer) = self.roster.get_mut(slot) {
                peer.send_frame(&own).await?;
                peer.send_frame(&roster_msg).await?;
            }
        }
        Ok(())
    }

    /// The fixed-tick loop. Each tick, in order: broadcast the current
    /// state to every peer, advance the ball by the measured elapsed
    /// time, read one input byte per peer (sequential, blocking), apply
    /// the inputs, and resolve paddle collisions. Any peer I/O failure
    /// evicts that slot; the match ends when no peers remain.
    async fn run_match(&mut self) {
        let mut tick_interval = interval(Duration::from_secs_f32(1.0 / self.tick_rate as f32));
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // The first tick fires immediately; skip it so dt starts sane.
        tick_interval.tick().await;
        let mut last_tick = Instant::now();
        let mut tick: u64 = 0;

        loop {
            tick_interval.tick().await;
            let now = Instant::now();
            let dt = now.duration_since(last_tick).as_secs_f32();
            last_tick = now;

            self.broadcast_state().await;
            self.game.advance_ball(dt);
            self.collect_inputs(dt).await;
            self.game.resolve_collisions();

            tick += 1;
            if tick % (self.tick_rate as u64).max(1) == 0 {
                debug!(
                    "Tick {}: {} peers, score {:?}, dead-zone {}",
                    tick,
                    self.roster.active(),
                    self.game.scores(),
                    self.game.collision_disabled()
                );
            }

            if self.roster.active() == 0 {
                info!("All peers disconnected, ending match");
                break;
            }
        }
    }

    /// Sends each peer its view of the state: ball position, its own
    /// paddle coordinate, and the others' coordinates in roster order
    /// excluding itself.
    async fn broadcast_state(&mut self) {
        let ball = self.game.ball.position;
        let coordinates = self.game.coordinates();

        for slot in 0..self.roster.len() {
            let others: Vec<f32> = coordinates
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != slot)
                .map(|(_, &coordinate)| coordinate)
                .collect();
            let frame = StateFrame((ball.x, ball.y), coordinates[slot], others);

            let payload = match serde_json::to_vec(&frame) {
                Ok(payload) => payload,
                Err(e) => {
                    error!("Failed to encode state frame: {}", e);
                    continue;
                }
            };

            if let Some(peer) = self.roster.get_mut(slot) {
                if let Err(e) = peer.send_frame(&payload).await {
                    warn!("Failed to send state to peer {}: {}", slot, e);
                    self.roster.evict(slot);
                }
            }
        }
    }

    /// One blocking read per connected peer, in roster order. A slow
    /// peer stalls the tick; a failed read evicts the peer and its
    /// paddle simply stops moving.
    async fn collect_inputs(&mut self, dt: f32) {
        for slot in 0..self.roster.len() {
            let direction = match self.roster.get_mut(slot) {
                Some(peer) => match peer.read_input().await {
                    Ok(direction) => direction,
                    Err(e) => {
                        warn!("Failed to read input from peer {}: {}", slot, e);
                        self.roster.evict(slot);
                        continue;
                    }
                },
                None => continue,
            };
            self.game.apply_input(slot, direction, dt);
        }
    }
}
