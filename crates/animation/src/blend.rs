//! First-order position smoothing.

use crate::Vec2;

/// Default fraction of the remaining distance covered per frame.
pub const DEFAULT_SMOOTHING: f32 = 0.1;

/// Moves `current` a fixed fraction of the remaining distance toward
/// `desired`.
///
/// This is a first-order low-pass filter on the desired position: the focal
/// point gains inertia, so switching the desired source (trajectory vs
/// pointer) never snaps. A zero remaining distance short-circuits to the
/// unchanged input — normalising a zero vector would inject NaN into state
/// that feeds back into itself next frame.
pub fn approach(current: Vec2, desired: Vec2, factor: f32) -> Vec2 {
    let dx = desired.x - current.x;
    let dy = desired.y - current.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance == 0.0 {
        return current;
    }
    let step = factor * distance;
    Vec2 {
        x: current.x + dx / distance * step,
        y: current.y + dy / distance * step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_is_exactly_stable() {
        let point = Vec2::new(150.0, 300.0);
        let next = approach(point, point, DEFAULT_SMOOTHING);
        assert_eq!(next, point);
        assert!(next.x.is_finite() && next.y.is_finite());
    }

    #[test]
    fn converges_monotonically_toward_a_fixed_target() {
        let desired = Vec2::new(60.0, 60.0);
        let mut current = Vec2::new(300.0, 120.0);
        let mut remaining = current.distance(desired);

        let mut iterations = 0;
        while remaining > 0.5 {
            current = approach(current, desired, DEFAULT_SMOOTHING);
            let next_remaining = current.distance(desired);
            assert!(next_remaining < remaining);
            remaining = next_remaining;
            iterations += 1;
            assert!(iterations < 200, "failed to converge within bound");
        }
    }

    #[test]
    fn each_step_covers_the_smoothing_fraction() {
        let desired = Vec2::new(100.0, 0.0);
        let current = Vec2::new(0.0, 0.0);
        let next = approach(current, desired, 0.25);
        assert!((next.x - 25.0).abs() < 1e-5);
        assert_eq!(next.y, 0.0);
    }

    #[test]
    fn step_direction_is_the_unit_vector_toward_desired() {
        let current = Vec2::new(10.0, 10.0);
        let desired = Vec2::new(13.0, 14.0);
        let next = approach(current, desired, 0.5);
        // Distance 5, step 2.5 along (0.6, 0.8).
        assert!((next.x - 11.5).abs() < 1e-5);
        assert!((next.y - 12.0).abs() < 1e-5);
    }
}
