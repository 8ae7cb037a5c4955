//! Authoritative match simulation, free of any I/O.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{
    Ball, Direction, PlayField, Paddle, Vec2, AXIS_X, AXIS_Y, BALL_RADIUS, NORMALIZED_BALL_SPEED,
    PADDLE_SPEED, PADDLE_WIDTH_FRACTION, SPEED_MULTIPLIER, TRACK_OFFSET_FRACTION,
};

/// The authoritative simulation: one ball, a roster of paddles, and the
/// match-level dead-zone flag.
///
/// While the flag is clear, paddles intercept the ball and the goal
/// walls are inert. The instant a paddle reports the ball escaped past
/// it, the flag is set: paddles stop intercepting (so the ball is not
/// deflected again on its way out) and only the goal-wall check is
/// live. Reaching a goal wall scores the rally, respawns the ball at
/// the field center with a freshly sampled velocity, and clears the
/// flag.
pub struct MatchState {
    pub field: PlayField,
    pub ball: Ball,
    paddles: Vec<Paddle>,
    scores: Vec<u32>,
    collision_disabled: bool,
    speed_multiplier: f32,
    rng: StdRng,
}

impl MatchState {
    pub fn new(field: PlayField) -> Self {
        Self::with_rng(field, StdRng::from_entropy())
    }

    /// Deterministic construction for tests.
    pub fn with_seed(field: PlayField, seed: u64) -> Self {
        Self::with_rng(field, StdRng::seed_from_u64(seed))
    }

    fn with_rng(field: PlayField, mut rng: StdRng) -> Self {
        let velocity = sample_spawn_velocity(&mut rng, &field);
        let ball = Ball::new(field.center(), velocity, BALL_RADIUS);
        Self {
            field,
            ball,
            paddles: Vec::new(),
            scores: Vec::new(),
            collision_disabled: false,
            speed_multiplier: SPEED_MULTIPLIER,
            rng,
        }
    }

    /// Adds a paddle on the track for the next roster slot and returns
    /// the slot index. The first slot gets the near-side track; every
    /// later slot gets the far side, which is only meaningful for the
    /// standard two-player roster.
    pub fn add_paddle(&mut self) -> usize {
        let slot = self.paddles.len();
        let track = track_for_slot(&self.field, slot);
        let paddle = Paddle::new(
            track,
            PADDLE_WIDTH_FRACTION,
            PADDLE_SPEED,
            self.field.center(),
        );

        info!(
            "Assigned slot {} the track from ({}, {}) to ({}, {})",
            slot, track.0.x, track.0.y, track.1.x, track.1.y
        );
        self.paddles.push(paddle);
        self.scores.push(0);
        slot
    }

    /// Advances the ball by the elapsed time: integrate, bounce off the
    /// vertical walls, and, while the dead-zone is active, let the goal
    /// walls catch the ball and reset the rally.
    pub fn advance_ball(&mut self, dt: f32) {
        self.ball.integrate(dt);
        self.ball.reflect_axis(&self.field, AXIS_Y);
        if self.collision_disabled && self.ball.reflect_axis(&self.field, AXIS_X) {
            self.respawn_ball();
            self.collision_disabled = false;
        }
    }

    /// Applies one peer's directional input to its paddle.
    pub fn apply_input(&mut self, slot: usize, direction: Direction, dt: f32) {
        if let Some(paddle) = self.paddles.get_mut(slot) {
            paddle.apply_input(direction, dt);
        }
    }

    /// Runs every paddle's collision test in roster order and updates
    /// the dead-zone flag from the outcomes: any escape sets it, any
    /// interception clears it, last writer wins. Skipped entirely while
    /// the dead-zone is active, so an exiting ball cannot be deflected;
    /// the flag then clears only through the goal-wall respawn.
    pub fn resolve_collisions(&mut self) {
        if self.collision_disabled {
            return;
        }

        for slot in 0..self.paddles.len() {
            let outcome = self.paddles[slot].test_collision(&mut self.ball, self.speed_multiplier);
            if !outcome.ball_in_front {
                self.collision_disabled = true;
                self.award_point_against(slot);
            }
            if outcome.hit {
                self.collision_disabled = false;
                debug!("Slot {} intercepted the ball", slot);
            }
        }
    }

    /// Re-centers the ball and resamples its velocity.
    pub fn respawn_ball(&mut self) {
        self.ball.position = self.field.center();
        self.ball.velocity = sample_spawn_velocity(&mut self.rng, &self.field);
        info!("Ball respawned, score {:?}", self.scores);
    }

    fn award_point_against(&mut self, loser: usize) {
        for (slot, score) in self.scores.iter_mut().enumerate() {
            if slot != loser {
                *score += 1;
            }
        }
        info!("Ball escaped past slot {}", loser);
    }

    pub fn paddle(&self, slot: usize) -> Option<&Paddle> {
        self.paddles.get(slot)
    }

    pub fn paddle_count(&self) -> usize {
        self.paddles.len()
    }

    /// Current paddle coordinates in roster order.
    pub fn coordinates(&self) -> Vec<f32> {
        self.paddles.iter().map(|p| p.coordinate()).collect()
    }

    pub fn collision_disabled(&self) -> bool {
        self.collision_disabled
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }
}

/// Track for a roster slot: a vertical segment inset from the slot's
/// goal wall by a tenth of the field width. Slot 0 defends the low-x
/// wall, all later slots the high-x wall.
pub fn track_for_slot(field: &PlayField, slot: usize) -> (Vec2, Vec2) {
    let offset = field.extent().x * TRACK_OFFSET_FRACTION;
    let x = if slot == 0 {
        field.min.x + offset
    } else {
        field.max.x - offset
    };
    (Vec2::new(x, field.min.y), Vec2::new(x, field.max.y))
}

/// Spawn velocity: a uniformly drawn angle in [0, pi) with an
/// independent sign flip, scaled by the normalized speed and by the
/// field extent on each axis so the pace is field-size-independent.
fn sample_spawn_velocity(rng: &mut StdRng, field: &PlayField) -> Vec2 {
    let mut angle = std::f32::consts::PI * rng.gen::<f32>();
    if rng.gen_bool(0.5) {
        angle = -angle;
    }

    let extent = field.extent();
    Vec2::new(
        angle.cos() * NORMALIZED_BALL_SPEED * extent.x,
        angle.sin() * NORMALIZED_BALL_SPEED * extent.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn two_player_match(seed: u64) -> MatchState {
        let mut state = MatchState::with_seed(PlayField::from_resolution(400.0, 400.0), seed);
        state.add_paddle();
        state.add_paddle();
        state
    }

    #[test]
    fn test_track_assignment_first_slot_near_rest_far() {
        let field = PlayField::from_resolution(400.0, 400.0);

        let (start, end) = track_for_slot(&field, 0);
        assert_eq!(start, Vec2::new(40.0, 0.0));
        assert_eq!(end, Vec2::new(40.0, 400.0));

        for slot in 1..4 {
            let (start, end) = track_for_slot(&field, slot);
            assert_eq!(start, Vec2::new(360.0, 0.0));
            assert_eq!(end, Vec2::new(360.0, 400.0));
        }
    }

    #[test]
    fn test_spawn_velocity_scales_with_field_extent() {
        let field = PlayField::from_resolution(400.0, 400.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let velocity = sample_spawn_velocity(&mut rng, &field);
            // cos/sin of one angle, both axes scaled by 0.3 * 400.
            assert_approx_eq!(velocity.magnitude(), 120.0, 1e-3);
        }
    }

    #[test]
    fn test_spawn_velocity_covers_both_vertical_directions() {
        let field = PlayField::from_resolution(400.0, 400.0);
        let mut rng = StdRng::seed_from_u64(7);

        let mut up = false;
        let mut down = false;
        for _ in 0..200 {
            let velocity = sample_spawn_velocity(&mut rng, &field);
            up |= velocity.y > 0.0;
            down |= velocity.y < 0.0;
        }
        assert!(up && down);
    }

    #[test]
    fn test_new_match_spawns_ball_at_center() {
        let state = two_player_match(1);
        assert_eq!(state.ball.position, Vec2::new(200.0, 200.0));
        assert!(!state.collision_disabled());
        assert_eq!(state.scores(), &[0, 0]);
    }

    #[test]
    fn test_apply_input_moves_and_clamps() {
        let mut state = two_player_match(1);

        state.apply_input(0, 1, 0.25);
        assert_approx_eq!(state.paddle(0).unwrap().coordinate(), 0.75);

        for _ in 0..10 {
            state.apply_input(0, 1, 0.25);
        }
        assert_approx_eq!(state.paddle(0).unwrap().coordinate(), 1.0);

        // Out-of-roster slots are ignored.
        state.apply_input(9, 1, 0.25);
    }

    #[test]
    fn test_interception_keeps_dead_zone_clear() {
        let mut state = two_player_match(1);
        // Straight at the center of slot 0's paddle.
        state.ball.position = Vec2::new(100.0, 200.0);
        state.ball.velocity = Vec2::new(-80.0, 0.0);

        for _ in 0..10 {
            state.advance_ball(0.25);
            state.resolve_collisions();
            assert!(!state.collision_disabled());
        }

        // The ball bounced off the paddle and is heading back in.
        assert!(state.ball.velocity.x > 0.0);
        assert_eq!(state.scores(), &[0, 0]);
    }

    #[test]
    fn test_dead_zone_lifecycle() {
        let mut state = two_player_match(1);
        // Heading at the low-x goal, above slot 0's solid segment
        // (which spans y in [180, 220] at coordinate 0.5).
        state.ball.position = Vec2::new(100.0, 300.0);
        state.ball.velocity = Vec2::new(-80.0, 0.0);

        // Tick 1: ball at x = 60, still in front of the track line.
        state.advance_ball(0.5);
        state.resolve_collisions();
        assert!(!state.collision_disabled());

        // Tick 2: ball crossed the line beside the paddle; the escape
        // sets the dead-zone and scores against slot 0.
        state.advance_ball(0.5);
        state.resolve_collisions();
        assert!(state.collision_disabled());
        assert_eq!(state.scores(), &[0, 1]);
        let velocity_during_exit = state.ball.velocity;

        // Tick 3: paddles no longer intercept while the ball exits.
        state.advance_ball(0.1);
        state.resolve_collisions();
        assert!(state.collision_disabled());
        assert_eq!(state.ball.velocity, velocity_during_exit);

        // Tick 4: the goal wall catches the ball: respawn at center,
        // dead-zone cleared.
        state.advance_ball(0.5);
        assert_eq!(state.ball.position, Vec2::new(200.0, 200.0));
        assert!(!state.collision_disabled());
        assert_approx_eq!(state.ball.speed(), 120.0, 1e-3);
    }

    #[test]
    fn test_goal_walls_inert_while_dead_zone_clear() {
        let mut state = two_player_match(1);
        state.ball.position = Vec2::new(10.0, 300.0);
        state.ball.velocity = Vec2::new(-80.0, 0.0);

        // Without the dead-zone, the low-x wall does not reflect; the
        // ball keeps traveling out.
        state.advance_ball(0.5);
        assert!(state.ball.position.x < 0.0);
        assert_eq!(state.ball.velocity, Vec2::new(-80.0, 0.0));
    }

    #[test]
    fn test_vertical_walls_always_reflect() {
        let mut state = two_player_match(1);
        state.ball.position = Vec2::new(200.0, 390.0);
        state.ball.velocity = Vec2::new(0.0, 80.0);

        state.advance_ball(0.5);
        assert_approx_eq!(state.ball.position.y, 397.0);
        assert!(state.ball.velocity.y < 0.0);
    }
}
