use serde::{Deserialize, Serialize};

/// Index of the horizontal axis, the one holding the goal walls.
pub const AXIS_X: usize = 0;
/// Index of the vertical axis, the one holding the bounce walls.
pub const AXIS_Y: usize = 1;

/// Represents a point or direction in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    /// Returns the magnitude of the vector.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Returns the normalized vector, or zero if the vector is zero.
    pub fn normalize(&self) -> Vec2 {
        let mag = self.magnitude();
        if mag == 0.0 {
            Vec2::default()
        } else {
            Vec2 {
                x: self.x / mag,
                y: self.y / mag,
            }
        }
    }

    /// Returns the scaled vector.
    pub fn scale(&self, scalar: f32) -> Vec2 {
        Vec2 {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }

    /// Returns the sum of two vectors.
    pub fn add(&self, other: &Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Returns the difference of two vectors.
    pub fn sub(&self, other: &Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Returns the dot product of two vectors.
    pub fn dot(&self, other: &Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Returns the euclidean distance to another point.
    pub fn distance(&self, other: &Vec2) -> f32 {
        self.sub(other).magnitude()
    }

    /// Returns the component along the given axis (0 = x, 1 = y).
    pub fn axis(&self, axis: usize) -> f32 {
        match axis {
            AXIS_X => self.x,
            _ => self.y,
        }
    }

    /// Sets the component along the given axis (0 = x, 1 = y).
    pub fn set_axis(&mut self, axis: usize, value: f32) {
        match axis {
            AXIS_X => self.x = value,
            _ => self.y = value,
        }
    }
}

/// Immutable simulation bounds, created once at match setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub min: Vec2,
    pub max: Vec2,
}

impl PlayField {
    /// Builds a field spanning `[0, width] x [0, height]`.
    pub fn from_resolution(width: f32, height: f32) -> PlayField {
        PlayField {
            min: Vec2::default(),
            max: Vec2::new(width, height),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Width and height of the field as a vector.
    pub fn extent(&self) -> Vec2 {
        self.max.sub(&self.min)
    }

    pub fn min_axis(&self, axis: usize) -> f32 {
        self.min.axis(axis)
    }

    pub fn max_axis(&self, axis: usize) -> f32 {
        self.max.axis(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_magnitude() {
        let v = Vec2::new(3.0, 4.0);
        assert_approx_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_normalize() {
        let v = Vec2::new(0.0, -8.0).normalize();
        assert_approx_eq!(v.x, 0.0);
        assert_approx_eq!(v.y, -1.0);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let v = Vec2::default().normalize();
        assert_eq!(v, Vec2::default());
    }

    #[test]
    fn test_dot_and_distance() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        assert_approx_eq!(a.dot(&b), 16.0);
        assert_approx_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_axis_access() {
        let mut v = Vec2::new(1.0, 2.0);
        assert_eq!(v.axis(AXIS_X), 1.0);
        assert_eq!(v.axis(AXIS_Y), 2.0);

        v.set_axis(AXIS_X, -3.0);
        v.set_axis(AXIS_Y, 7.0);
        assert_eq!(v, Vec2::new(-3.0, 7.0));
    }

    #[test]
    fn test_playfield_center_and_extent() {
        let field = PlayField::from_resolution(400.0, 300.0);
        assert_eq!(field.center(), Vec2::new(200.0, 150.0));
        assert_eq!(field.extent(), Vec2::new(400.0, 300.0));
        assert_eq!(field.min_axis(AXIS_X), 0.0);
        assert_eq!(field.max_axis(AXIS_Y), 300.0);
    }
}
