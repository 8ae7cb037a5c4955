use crate::ball::Ball;
use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Result of running one paddle's collision test against the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// False means the ball has escaped past this paddle uninterrupted:
    /// the authoritative miss signal.
    pub ball_in_front: bool,
    /// True means the ball was intercepted and redirected this tick.
    pub hit: bool,
}

impl CollisionOutcome {
    const NO_ACTION: CollisionOutcome = CollisionOutcome {
        ball_in_front: true,
        hit: false,
    };
    const MISS: CollisionOutcome = CollisionOutcome {
        ball_in_front: false,
        hit: false,
    };
    const HIT: CollisionOutcome = CollisionOutcome {
        ball_in_front: true,
        hit: true,
    };
}

/// One player's controllable segment.
///
/// The paddle's midpoint travels along a fixed track; only a fraction of
/// the track's length is solid. All geometry derived from `coordinate`
/// is recomputed synchronously on every change, so `mid` and
/// `paddle_points` are never stale. `dir_cosine` and `normal` are unit
/// vectors fixed at construction, `normal` oriented toward the field
/// interior using the ball spawn point as reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    track_start: Vec2,
    track_end: Vec2,
    width_fraction: f32,
    speed: f32,
    coordinate: f32,

    // Fixed for the paddle's lifetime.
    solid_span: Vec2,
    paddle_width: f32,
    dir_cosine: Vec2,
    normal: Vec2,
    mid_min: Vec2,
    mid_span: Vec2,

    // Derived from `coordinate`.
    mid: Vec2,
    paddle_points: (Vec2, Vec2),
}

impl Paddle {
    /// Builds a paddle on the given track. `width_fraction` in (0, 1)
    /// scales the track length down to the solid sub-segment; `speed` is
    /// in coordinate units per second; `spawn_point` is only used to
    /// orient the normal toward the playable interior.
    pub fn new(track: (Vec2, Vec2), width_fraction: f32, speed: f32, spawn_point: Vec2) -> Paddle {
        let track_vec = track.1.sub(&track.0);
        let solid_span = track_vec.scale(width_fraction);
        let paddle_width = solid_span.magnitude();
        let dir_cosine = solid_span.normalize();

        // The midpoint travel range is the track inset by half a solid
        // width on each end, so the solid segment never leaves the track.
        let mid_min = track.0.add(&solid_span.scale(0.5));
        let mid_max = track.1.sub(&solid_span.scale(0.5));
        let mid_span = mid_max.sub(&mid_min);

        // Rotate the track direction 90 degrees, then flip if needed so
        // the normal faces the spawn point (the field interior).
        let mut normal = Vec2::new(-dir_cosine.y, dir_cosine.x);
        let track_mid = mid_min.add(&mid_span.scale(0.5));
        if spawn_point.sub(&track_mid).dot(&normal) < 0.0 {
            normal = normal.scale(-1.0);
        }

        let mut paddle = Paddle {
            track_start: track.0,
            track_end: track.1,
            width_fraction,
            speed,
            coordinate: 0.5,
            solid_span,
            paddle_width,
            dir_cosine,
            normal,
            mid_min,
            mid_span,
            mid: track_mid,
            paddle_points: (track_mid, track_mid),
        };
        paddle.recompute_geometry();
        paddle
    }

    /// Moves the paddle center along its track: -1 toward the track
    /// start, 1 toward the track end, 0 hold. The coordinate is clamped
    /// to [0, 1] after every update.
    pub fn apply_input(&mut self, direction: i32, dt: f32) {
        self.set_coordinate(self.coordinate + self.speed * direction as f32 * dt);
    }

    /// Sets the normalized track position and recomputes the dependent
    /// geometry in the same step. This is the only way `coordinate`
    /// changes, so `mid` and `paddle_points` can never be read stale.
    pub fn set_coordinate(&mut self, value: f32) {
        self.coordinate = value.clamp(0.0, 1.0);
        self.recompute_geometry();
    }

    fn recompute_geometry(&mut self) {
        self.mid = self.mid_min.add(&self.mid_span.scale(self.coordinate));
        let half_span = self.solid_span.scale(0.5);
        self.paddle_points = (self.mid.sub(&half_span), self.mid.add(&half_span));
    }

    pub fn coordinate(&self) -> f32 {
        self.coordinate
    }

    pub fn mid(&self) -> Vec2 {
        self.mid
    }

    /// Endpoints of the solid sub-segment at the current coordinate.
    pub fn paddle_points(&self) -> (Vec2, Vec2) {
        self.paddle_points
    }

    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    pub fn dir_cosine(&self) -> Vec2 {
        self.dir_cosine
    }

    pub fn paddle_width(&self) -> f32 {
        self.paddle_width
    }

    /// Projects a point onto the midpoint travel range, clamped to
    /// [0, 1]. This is the coordinate at which the paddle center would
    /// be closest to the point.
    pub fn track_coordinate_of(&self, point: Vec2) -> f32 {
        let len_sq = self.mid_span.dot(&self.mid_span);
        if len_sq == 0.0 {
            return self.coordinate;
        }
        (point.sub(&self.mid_min).dot(&self.mid_span) / len_sq).clamp(0.0, 1.0)
    }

    /// Continuous collision test against the ball.
    ///
    /// The test is retroactive: nothing happens while the ball is
    /// cleanly on the playable side of the track line. Once the ball's
    /// center has crossed the line (or come within one radius of it),
    /// the crossing point is solved from the velocity line, and either
    /// committed as an interception or reported as the miss signal.
    ///
    /// On an interception the ball is moved back to the touch point and
    /// its velocity is redirected: a perpendicular bounce blended with a
    /// tangential deflection proportional to how off-center the hit
    /// was, at `speed * speed_multiplier`.
    pub fn test_collision(&self, ball: &mut Ball, speed_multiplier: f32) -> CollisionOutcome {
        // Side test. While the center is on the playable side and more
        // than one radius away from the track line there is nothing to
        // do this tick. A center at or past the line always falls
        // through, even when the perpendicular distance exceeds the
        // radius: that is the crossing being resolved after the fact.
        let side = ball.position.sub(&self.mid).dot(&self.normal);
        if side > 0.0 && self.sqr_perp_dist(ball.position) > ball.radius * ball.radius {
            return CollisionOutcome::NO_ACTION;
        }

        // Where the velocity line crosses the infinite track line. A
        // velocity parallel to the track has no finite intersection and
        // resolves to a miss, never a NaN commit.
        let intersection = match self.line_intersection(ball.position, ball.velocity) {
            Some(point) => point,
            None => return CollisionOutcome::MISS,
        };

        // The crossing lands on the solid sub-segment iff the endpoints
        // straddle it. An intersection exactly on an endpoint is out:
        // the boundary is exclusive.
        let to_start = intersection.sub(&self.paddle_points.0);
        let to_end = intersection.sub(&self.paddle_points.1);
        if to_start.dot(&to_end) >= 0.0 {
            return CollisionOutcome::MISS;
        }

        // Back the center off along the incoming velocity to where the
        // ball's edge first touched the line: radius / cos(theta) with
        // theta the angle between velocity and normal.
        let approach = ball.velocity.dot(&self.normal);
        let touch_point = intersection.add(&ball.velocity.scale(ball.radius / approach));

        // Signed hit position in [-1, 1]: 0 at the segment center.
        let offset = 2.0 * (touch_point.distance(&self.paddle_points.0) / self.paddle_width - 0.5);
        let outgoing = self.normal.add(&self.dir_cosine.scale(offset));

        ball.velocity = outgoing
            .normalize()
            .scale(ball.speed() * speed_multiplier);
        ball.position = touch_point;
        CollisionOutcome::HIT
    }

    /// Squared perpendicular distance from a point to the infinite line
    /// containing the track.
    fn sqr_perp_dist(&self, point: Vec2) -> f32 {
        let to_line = self.mid.sub(&point);
        let along = self.dir_cosine.scale(to_line.dot(&self.dir_cosine));
        let perp = to_line.sub(&along);
        perp.dot(&perp)
    }

    /// Intersection of the line through `origin` with direction `dir`
    /// and the infinite line containing the track, via the 2x2 solve.
    /// Returns None when the lines are parallel or the division blows
    /// up to a non-finite point.
    fn line_intersection(&self, origin: Vec2, dir: Vec2) -> Option<Vec2> {
        let track_dir = self.dir_cosine;
        let anchor = self.paddle_points.0;

        let denom = dir.x * track_dir.y - dir.y * track_dir.x;
        let s = ((anchor.x - origin.x) * track_dir.y - (anchor.y - origin.y) * track_dir.x) / denom;
        let point = origin.add(&dir.scale(s));

        if point.x.is_finite() && point.y.is_finite() {
            Some(point)
        } else {
            None
        }
    }
}
