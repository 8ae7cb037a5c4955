use crate::geometry::{PlayField, Vec2};
use serde::{Deserialize, Serialize};

/// The ball: a point mass with a radius, owned exclusively by the match
/// loop. Integration may push it out of bounds; wall reflection corrects
/// that afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Ball {
        Ball {
            position,
            velocity,
            radius,
        }
    }

    /// Advances the ball by the elapsed time. No bounds guard.
    pub fn integrate(&mut self, dt: f32) {
        self.position = self.position.add(&self.velocity.scale(dt));
    }

    /// Reflects the ball off the field walls on the given axis
    /// (0 = horizontal bounds, 1 = vertical bounds). Clamps the position
    /// back inside and negates the velocity component. Returns whether a
    /// reflection occurred.
    pub fn reflect_axis(&mut self, field: &PlayField, axis: usize) -> bool {
        if self.position.axis(axis) + self.radius > field.max_axis(axis) {
            self.position
                .set_axis(axis, field.max_axis(axis) - self.radius);
        } else if self.position.axis(axis) - self.radius < field.min_axis(axis) {
            self.position
                .set_axis(axis, field.min_axis(axis) + self.radius);
        } else {
            return false;
        }
        self.velocity.set_axis(axis, -self.velocity.axis(axis));
        true
    }

    /// Current speed, preserved across paddle bounces before the rally
    /// multiplier is applied.
    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{AXIS_X, AXIS_Y};
    use assert_approx_eq::assert_approx_eq;

    fn test_field() -> PlayField {
        PlayField::from_resolution(400.0, 400.0)
    }

    #[test]
    fn test_integrate_moves_by_velocity() {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), Vec2::new(30.0, -60.0), 3.0);
        ball.integrate(0.5);
        assert_eq!(ball.position, Vec2::new(115.0, 70.0));
    }

    #[test]
    fn test_reflect_at_max_bound() {
        let field = test_field();
        let mut ball = Ball::new(Vec2::new(200.0, 399.0), Vec2::new(0.0, 50.0), 3.0);

        assert!(ball.reflect_axis(&field, AXIS_Y));
        assert_approx_eq!(ball.position.y, 397.0);
        assert_approx_eq!(ball.velocity.y, -50.0);
    }

    #[test]
    fn test_reflect_at_min_bound() {
        let field = test_field();
        let mut ball = Ball::new(Vec2::new(1.0, 200.0), Vec2::new(-50.0, 0.0), 3.0);

        assert!(ball.reflect_axis(&field, AXIS_X));
        assert_approx_eq!(ball.position.x, 3.0);
        assert_approx_eq!(ball.velocity.x, 50.0);
    }

    #[test]
    fn test_no_reflection_inside_bounds() {
        let field = test_field();
        let mut ball = Ball::new(Vec2::new(200.0, 200.0), Vec2::new(50.0, 50.0), 3.0);

        assert!(!ball.reflect_axis(&field, AXIS_X));
        assert!(!ball.reflect_axis(&field, AXIS_Y));
        assert_eq!(ball.position, Vec2::new(200.0, 200.0));
        assert_eq!(ball.velocity, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_reflection_is_idempotent_once_in_bounds() {
        let field = test_field();
        let mut ball = Ball::new(Vec2::new(200.0, 405.0), Vec2::new(0.0, 80.0), 3.0);

        assert!(ball.reflect_axis(&field, AXIS_Y));
        let after_first = ball;

        // A second pass with no intervening integration changes nothing.
        assert!(!ball.reflect_axis(&field, AXIS_Y));
        assert_eq!(ball, after_first);
    }

    #[test]
    fn test_speed() {
        let ball = Ball::new(Vec2::default(), Vec2::new(3.0, 4.0), 3.0);
        assert_approx_eq!(ball.speed(), 5.0);
    }
}
