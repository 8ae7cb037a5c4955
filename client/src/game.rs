//! Local mirror of the server's observable state.

use shared::protocol::{Handshake, StateFrame};
use shared::{Ball, Paddle, Vec2};

/// What this peer knows about the match: the handshake parameters plus
/// the latest broadcast snapshot. Paddle coordinates go through the
/// clamping setter, so the derived geometry a renderer would draw is
/// always consistent.
#[derive(Debug, Clone)]
pub struct ClientGameState {
    pub resolution: (u32, u32),
    pub tick_rate: u32,
    pub ball: Ball,
    pub own_paddle: Paddle,
    pub other_paddles: Vec<Paddle>,
}

impl ClientGameState {
    pub fn new(handshake: Handshake, other_paddles: Vec<Paddle>) -> Self {
        Self {
            resolution: handshake.resolution,
            tick_rate: handshake.tick_rate,
            ball: handshake.ball,
            own_paddle: handshake.paddle,
            other_paddles,
        }
    }

    /// Applies one per-tick snapshot: ball position, own coordinate,
    /// and the other paddles' coordinates in roster order.
    pub fn apply_frame(&mut self, frame: &StateFrame) {
        let (x, y) = frame.ball_position();
        self.ball.position = Vec2::new(x, y);
        self.own_paddle.set_coordinate(frame.own_coordinate());
        for (paddle, &coordinate) in self
            .other_paddles
            .iter_mut()
            .zip(frame.other_coordinates())
        {
            paddle.set_coordinate(coordinate);
        }
    }
}
