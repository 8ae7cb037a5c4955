//! Input sources: where a key poller would plug in.

use crate::game::ClientGameState;
use shared::Direction;

/// Produces one direction per received snapshot. Implementations see
/// the freshly applied state, so they can react to the current tick.
pub trait InputSource: Send {
    fn direction(&mut self, state: &ClientGameState) -> Direction;
}

/// Never moves. Useful as a placeholder and for protocol tests.
#[derive(Debug, Default)]
pub struct Hold;

impl InputSource for Hold {
    fn direction(&mut self, _state: &ClientGameState) -> Direction {
        0
    }
}

/// Headless controller that chases the ball: steers the paddle center
/// toward the ball's projection on its track, with a small deadband so
/// it does not oscillate around the target.
#[derive(Debug)]
pub struct BallChaser {
    deadband: f32,
}

impl BallChaser {
    pub fn new() -> Self {
        Self { deadband: 0.02 }
    }
}

impl Default for BallChaser {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for BallChaser {
    fn direction(&mut self, state: &ClientGameState) -> Direction {
        let target = state.own_paddle.track_coordinate_of(state.ball.position);
        let delta = target - state.own_paddle.coordinate();
        if delta > self.deadband {
            1
        } else if delta < -self.deadband {
            -1
        } else {
            0
        }
    }
}
