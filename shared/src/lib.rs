//! Simulation core and wire protocol shared by the match server and clients.
//!
//! The server owns the authoritative state; clients only ever receive
//! snapshots of it and send back one direction byte per tick. Everything
//! in this crate is I/O-policy free: the geometry and physics types know
//! nothing about sockets, and the protocol module only speaks in terms of
//! generic async readers and writers.

pub mod ball;
pub mod geometry;
pub mod paddle;
pub mod protocol;

pub use ball::Ball;
pub use geometry::{PlayField, Vec2, AXIS_X, AXIS_Y};
pub use paddle::{CollisionOutcome, Paddle};

/// Playfield width in pixels.
pub const FIELD_WIDTH: f32 = 400.0;
/// Playfield height in pixels.
pub const FIELD_HEIGHT: f32 = 400.0;
/// Ball radius in pixels.
pub const BALL_RADIUS: f32 = 3.0;
/// Ball speed as a fraction of the field extent per second; scaling by
/// the extent keeps the effective pace independent of field size.
pub const NORMALIZED_BALL_SPEED: f32 = 0.3;
/// Fraction of a paddle's track that is solid.
pub const PADDLE_WIDTH_FRACTION: f32 = 0.1;
/// Paddle travel speed in coordinate units (not pixels) per second.
pub const PADDLE_SPEED: f32 = 1.0;
/// Distance of each paddle track from its goal wall, as a fraction of
/// the field width.
pub const TRACK_OFFSET_FRACTION: f32 = 0.1;
/// Ball speed gain applied on every paddle interception.
pub const SPEED_MULTIPLIER: f32 = 1.05;
/// Default server tick rate in ticks per second.
pub const TICK_RATE: u32 = 60;
/// Fixed roster size for a standard match.
pub const PLAYER_LIMIT: usize = 2;

/// A peer's directional input for one tick: -1 toward the track start,
/// 0 hold, 1 toward the track end.
pub type Direction = i32;
