//! Peer bookkeeping: one connected controller per roster slot.

use log::info;
use shared::protocol::{decode_direction, write_frame};
use shared::Direction;
use std::io;
use std::net::SocketAddr;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

/// One accepted connection, pinned to the roster slot it was assigned
/// in acceptance order.
#[derive(Debug)]
pub struct Peer {
    pub slot: usize,
    pub addr: SocketAddr,
    stream: TcpStream,
}

impl Peer {
    pub fn new(slot: usize, addr: SocketAddr, stream: TcpStream) -> Self {
        Self { slot, addr, stream }
    }

    /// Sends one framed message to this peer.
    pub async fn send_frame(&mut self, payload: &[u8]) -> io::Result<()> {
        write_frame(&mut self.stream, payload).await
    }

    /// Blocking read of this tick's single input byte. The returned
    /// direction is already clamped to {-1, 0, 1}.
    pub async fn read_input(&mut self) -> io::Result<Direction> {
        let mut byte = [0u8; 1];
        self.stream.read_exact(&mut byte).await?;
        Ok(decode_direction(byte[0]))
    }
}

/// The fixed roster: insertion order is assignment order is broadcast
/// order. Slots stay in place when a peer is evicted so the remaining
/// peers keep their paddle indices.
#[derive(Debug, Default)]
pub struct Roster {
    slots: Vec<Option<Peer>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a peer in the next slot. The caller is responsible for
    /// having created the matching paddle under the same index.
    pub fn add(&mut self, peer: Peer) {
        info!("Peer {} connected from {}", peer.slot, peer.addr);
        self.slots.push(Some(peer));
    }

    /// Drops a peer's connection but keeps the slot occupied, so the
    /// remaining roster indices still line up with the paddles.
    pub fn evict(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            if let Some(peer) = entry.take() {
                info!("Peer {} at {} evicted", peer.slot, peer.addr);
            }
        }
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Peer> {
        self.slots.get_mut(slot).and_then(|entry| entry.as_mut())
    }

    /// Total slots, connected or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of peers still connected.
    pub fn active(&self) -> usize {
        self.slots.iter().filter(|entry| entry.is_some()).count()
    }
}
