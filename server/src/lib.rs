//! # Match Server Library
//!
//! Authoritative server for the networked ball-and-paddle game. The
//! server owns the only mutable copy of the simulation: the ball, every
//! paddle, and the match-level scoring state. Connected peers receive a
//! state snapshot each tick and answer with one direction byte.
//!
//! ## Architecture
//!
//! The crate is split so the physics can be tested without sockets:
//!
//! - [`game`] holds [`game::MatchState`], the authoritative simulation.
//!   It has no I/O awareness at all: the tick loop feeds it elapsed time
//!   and per-slot directions, and reads outcomes back.
//! - [`roster`] tracks accepted peers in assignment order and owns the
//!   per-peer framed sends, input reads, and eviction bookkeeping.
//! - [`network`] binds the listener, fills the roster, performs the
//!   handshake, and drives the fixed-tick loop in strict order:
//!   broadcast, advance ball, collect input, resolve collisions.
//!
//! ## Tick model
//!
//! A single task drives the whole match; nothing else mutates the
//! simulation, so no locks are needed. Tick pacing is a blocking
//! interval wait, and each peer's input is one awaited read executed
//! sequentially inside the tick: a silent peer stalls the match until
//! its read fails and the slot is evicted. State broadcast happens
//! before input collection, so the snapshot sent in tick `n` reflects
//! the collisions of tick `n - 1`.

pub mod game;
pub mod network;
pub mod roster;
