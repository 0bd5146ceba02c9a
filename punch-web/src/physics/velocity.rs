//! One-step finite-difference velocity
//!
//! No history window and no dead zone: the raw difference to the previous
//! frame keeps detection latency at a single frame. Jitter is handled by the
//! velocity threshold and the forward-motion vote instead.

use nalgebra::{Point2, Vector2};

/// Displacement of a landmark between two consecutive frames (pixels/frame)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity {
    pub vector: Vector2<f32>,
    pub magnitude: f32,
}

impl Velocity {
    pub fn zero() -> Self {
        Self {
            vector: Vector2::zeros(),
            magnitude: 0.0,
        }
    }

    /// Zero if either position is unknown (first frame, missing landmark)
    pub fn between(current: Option<&Point2<f32>>, previous: Option<&Point2<f32>>) -> Self {
        match (current, previous) {
            (Some(current), Some(previous)) => {
                let vector = current - previous;
                Self {
                    vector,
                    magnitude: vector.norm(),
                }
            }
            _ => Self::zero(),
        }
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_difference() {
        let v = Velocity::between(Some(&Point2::new(240.0, 260.0)), Some(&Point2::new(200.0, 300.0)));
        assert_eq!(v.vector, Vector2::new(40.0, -40.0));
        assert!((v.magnitude - 56.568).abs() < 0.01);
    }

    #[test]
    fn test_missing_input_is_zero() {
        let p = Point2::new(1.0, 2.0);
        assert_eq!(Velocity::between(Some(&p), None), Velocity::zero());
        assert_eq!(Velocity::between(None, Some(&p)).magnitude, 0.0);
    }
}
