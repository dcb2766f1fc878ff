//! Autonomous focal-point trajectory.
//!
//! Integrated time is wrapped into a repeating phase, eased through a cubic
//! curve, and mapped onto a circle inscribed in the canvas. The easing makes
//! the focal point linger near the cycle boundaries and sweep quickly through
//! the middle instead of orbiting at constant angular velocity.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::Vec2;

/// Cubic easing parameterised by two control values in `[0, 1]`.
///
/// Sampled in Bernstein form `3(1-t)²t·c1 + 3(1-t)t²·c2 + t³`, which pins the
/// endpoints at 0 and 1 and stays monotone for in-range control values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicEase {
    c1: f32,
    c2: f32,
}

impl CubicEase {
    pub fn new(c1: f32, c2: f32) -> Self {
        Self {
            c1: c1.clamp(0.0, 1.0),
            c2: c2.clamp(0.0, 1.0),
        }
    }

    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        3.0 * u * u * t * self.c1 + 3.0 * u * t * t * self.c2 + t * t * t
    }
}

impl Default for CubicEase {
    fn default() -> Self {
        Self::new(0.2, 0.8)
    }
}

/// Maps integrated time to the autonomous focal position.
#[derive(Debug, Clone, Copy)]
pub struct Trajectory {
    cycle_rate: f64,
    ease: CubicEase,
}

impl Trajectory {
    /// `cycle_rate` is cycles per integrated-time unit and must be positive.
    pub fn new(cycle_rate: f64, ease: CubicEase) -> Self {
        Self { cycle_rate, ease }
    }

    /// One full cycle in integrated-time units.
    pub fn period(&self) -> f64 {
        1.0 / self.cycle_rate
    }

    /// Position at `time` on a circle of radius `min(w, h)/3 - radius`
    /// centered on the canvas, starting at the top of the circle.
    pub fn position(&self, time: f64, canvas: Vec2, radius: f32) -> Vec2 {
        let phase = (time * self.cycle_rate).rem_euclid(1.0) as f32;
        let eased = self.ease.sample(phase);
        let theta = eased * TAU - FRAC_PI_2;
        let orbit = (canvas.x.min(canvas.y) / 3.0 - radius).max(0.0);
        Vec2 {
            x: canvas.x * 0.5 + theta.cos() * orbit,
            y: canvas.y * 0.5 + theta.sin() * orbit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Vec2 = Vec2 { x: 300.0, y: 600.0 };

    #[test]
    fn ease_hits_endpoints_exactly() {
        let ease = CubicEase::default();
        assert!((ease.sample(0.0) - 0.0).abs() < 1e-6);
        assert!((ease.sample(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ease_increases_monotonically() {
        let ease = CubicEase::new(0.2, 0.8);
        let mut last = 0.0;
        for step in 0..=50 {
            let sample = ease.sample(step as f32 / 50.0);
            assert!(sample >= last - f32::EPSILON);
            last = sample;
        }
    }

    #[test]
    fn cycle_starts_at_the_top() {
        let trajectory = Trajectory::new(0.05, CubicEase::default());
        let start = trajectory.position(0.0, CANVAS, 15.0);
        let orbit = 300.0 / 3.0 - 15.0;
        assert!((start.x - 150.0).abs() < 1e-3);
        assert!((start.y - (300.0 - orbit)).abs() < 1e-3);
    }

    #[test]
    fn position_is_periodic() {
        let trajectory = Trajectory::new(0.05, CubicEase::new(0.3, 0.7));
        let period = trajectory.period();
        for i in 0..20 {
            let time = i as f64 * 1.37;
            let a = trajectory.position(time, CANVAS, 15.0);
            let b = trajectory.position(time + period, CANVAS, 15.0);
            assert!(a.distance(b) < 1e-3, "time {time}: {a:?} vs {b:?}");
        }
    }

    #[test]
    fn position_stays_on_the_orbit_circle() {
        let trajectory = Trajectory::new(0.05, CubicEase::default());
        let center = Vec2::new(150.0, 300.0);
        let orbit = 300.0 / 3.0 - 15.0;
        for i in 0..100 {
            let pos = trajectory.position(i as f64 * 0.33, CANVAS, 15.0);
            assert!((pos.distance(center) - orbit).abs() < 1e-3);
        }
    }

    #[test]
    fn oversized_radius_collapses_to_center() {
        let trajectory = Trajectory::new(0.05, CubicEase::default());
        let pos = trajectory.position(3.0, CANVAS, 500.0);
        assert!(pos.distance(Vec2::new(150.0, 300.0)) < 1e-3);
    }
}
