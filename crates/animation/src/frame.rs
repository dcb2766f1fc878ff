//! Per-frame engine: explicit state, fixed update order.
//!
//! `FrameEngine` owns the clock, the trajectory, the pointer cell, and the
//! focal position, and advances them in one `tick` per display refresh:
//! integrate time, compute the autonomous target, read the pointer override,
//! blend the focal position, package the uniforms. The host's input path only
//! deposits pointer events; the tick is the single writer for everything
//! else.

use dotconfig::{MotionConfig, StyleConfig};

use crate::blend::approach;
use crate::clock::FlickerFreeClock;
use crate::pointer::{PointerEvent, PointerState};
use crate::trajectory::{CubicEase, Trajectory};
use crate::Vec2;

/// Substituted when the configured dot count is not positive, so the shader's
/// dot-pitch division can never hit zero.
pub const DEFAULT_NUM_DOTS: f32 = 24.0;

/// Immutable per-frame parameter snapshot consumed once by the renderer.
///
/// The field set is the wire contract with the shader program; the renderer
/// mirrors it into a std140 uniform block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub circle_pos: [f32; 2],
    pub circle_radius: f32,
    pub clock: f32,
    pub canvas_width: f32,
    pub num_dots: f32,
    pub max_brightness: f32,
    pub color: [f32; 4],
    pub bg_color: [f32; 4],
}

/// Owns the control-loop state and produces one uniform snapshot per tick.
#[derive(Debug, Clone)]
pub struct FrameEngine {
    clock: FlickerFreeClock,
    trajectory: Trajectory,
    pointer: PointerState,
    focal: Vec2,
    canvas: Vec2,
    speed: f64,
    paused: bool,
    smoothing: f32,
    style: StyleConfig,
}

impl FrameEngine {
    /// Builds an engine for the given canvas; the focal position starts at
    /// the canvas center.
    pub fn new(canvas_width: f32, canvas_height: f32, motion: &MotionConfig, style: &StyleConfig) -> Self {
        let canvas = Vec2::new(canvas_width, canvas_height);
        Self {
            clock: FlickerFreeClock::new(),
            trajectory: Trajectory::new(
                motion.cycle_rate,
                CubicEase::new(motion.ease[0], motion.ease[1]),
            ),
            pointer: PointerState::default(),
            focal: Vec2::new(canvas.x * 0.5, canvas.y * 0.5),
            canvas,
            speed: motion.speed,
            paused: motion.paused,
            smoothing: motion.smoothing,
            style: style.clone(),
        }
    }

    /// Deposits one pointer event; a plain write, safe to call from the
    /// host's input path between ticks.
    pub fn pointer_event(&mut self, event: PointerEvent) {
        self.pointer.apply(event);
    }

    /// Changes the clock rate; takes effect from the next tick's delta
    /// onward without rescaling accumulated time.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Updates the canvas extent after a resize. The focal position is left
    /// alone; the blender eases it toward the re-centered trajectory.
    pub fn set_canvas(&mut self, width: f32, height: f32) {
        self.canvas = Vec2::new(width, height);
    }

    pub fn focal_position(&self) -> Vec2 {
        self.focal
    }

    pub fn integrated_time(&self) -> f64 {
        self.clock.integrated_time()
    }

    /// The trajectory's output for the current integrated time.
    pub fn autonomous_target(&self) -> Vec2 {
        self.trajectory
            .position(self.clock.integrated_time(), self.canvas, self.style.radius)
    }

    /// Runs one frame: advance the clock, pick the desired position (pointer
    /// override wins), blend the focal position, and package the uniforms.
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameUniforms {
        self.clock.advance(timestamp_ms, self.speed, self.paused);
        let desired = match self.pointer.position() {
            Some(position) => position,
            None => self.autonomous_target(),
        };
        self.focal = approach(self.focal, desired, self.smoothing);
        self.package()
    }

    /// Assembles the frame's uniform snapshot from the just-blended state.
    fn package(&self) -> FrameUniforms {
        let num_dots = if self.style.num_dots > 0.0 {
            self.style.num_dots
        } else {
            DEFAULT_NUM_DOTS
        };
        FrameUniforms {
            circle_pos: [self.focal.x, self.focal.y],
            circle_radius: self.style.radius,
            clock: self.clock.integrated_time() as f32,
            canvas_width: self.canvas.x,
            num_dots,
            max_brightness: self.style.max_brightness,
            color: self.style.color,
            bg_color: self.style.bg_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_motion() -> MotionConfig {
        MotionConfig {
            speed: 0.0005,
            ..MotionConfig::default()
        }
    }

    fn test_style() -> StyleConfig {
        StyleConfig {
            radius: 15.0,
            ..StyleConfig::default()
        }
    }

    #[test]
    fn focal_position_starts_at_canvas_center() {
        let engine = FrameEngine::new(300.0, 600.0, &test_motion(), &test_style());
        assert_eq!(engine.focal_position(), Vec2::new(150.0, 300.0));
    }

    #[test]
    fn active_pointer_overrides_the_trajectory() {
        let motion = test_motion();
        let style = test_style();
        let mut engine = FrameEngine::new(300.0, 600.0, &motion, &style);
        engine.tick(16.0);

        let before = engine.focal_position();
        engine.pointer_event(PointerEvent::Began { x: 50.0, y: 50.0 });
        engine.tick(32.0);

        let expected = approach(before, Vec2::new(50.0, 50.0), motion.smoothing);
        assert_eq!(engine.focal_position(), expected);
    }

    #[test]
    fn inactive_pointer_yields_to_the_trajectory() {
        let motion = test_motion();
        let style = test_style();
        let mut engine = FrameEngine::new(300.0, 600.0, &motion, &style);
        engine.tick(16.0);

        let before = engine.focal_position();
        engine.tick(32.0);

        // Same blend, but against the trajectory output at the post-tick
        // integrated time.
        let expected = approach(before, engine.autonomous_target(), motion.smoothing);
        assert_eq!(engine.focal_position(), expected);
    }

    #[test]
    fn non_positive_dot_count_is_replaced_with_the_default() {
        for bad in [0.0, -8.0] {
            let style = StyleConfig {
                num_dots: bad,
                ..test_style()
            };
            let mut engine = FrameEngine::new(300.0, 600.0, &test_motion(), &style);
            let uniforms = engine.tick(16.0);
            assert_eq!(uniforms.num_dots, DEFAULT_NUM_DOTS);
        }
    }

    #[test]
    fn packaged_snapshot_reflects_the_same_frame() {
        let style = test_style();
        let mut engine = FrameEngine::new(300.0, 600.0, &test_motion(), &style);
        engine.tick(16.0);
        let uniforms = engine.tick(32.0);

        let focal = engine.focal_position();
        assert_eq!(uniforms.circle_pos, [focal.x, focal.y]);
        assert_eq!(uniforms.circle_radius, style.radius);
        assert_eq!(uniforms.canvas_width, 300.0);
        assert_eq!(uniforms.clock, engine.integrated_time() as f32);
        assert_eq!(uniforms.color, style.color);
        assert_eq!(uniforms.bg_color, style.bg_color);
    }

    #[test]
    fn pausing_freezes_the_clock_but_keeps_blending() {
        let mut engine = FrameEngine::new(300.0, 600.0, &test_motion(), &test_style());
        engine.tick(16.0);
        engine.tick(32.0);
        let frozen = engine.integrated_time();

        engine.set_paused(true);
        for frame in 1..=10 {
            engine.tick(32.0 + frame as f64 * 16.0);
        }
        assert_eq!(engine.integrated_time(), frozen);

        engine.set_paused(false);
        engine.tick(32.0 + 11.0 * 16.0);
        assert!((engine.integrated_time() - (frozen + 16.0 * 0.0005)).abs() < 1e-9);
    }

    #[test]
    fn autonomous_run_settles_into_the_orbit_band() {
        let motion = test_motion();
        let mut engine = FrameEngine::new(300.0, 600.0, &motion, &test_style());
        let center = Vec2::new(150.0, 300.0);
        let orbit = 300.0 / 3.0 - 15.0;

        let mut previous = engine.focal_position();
        let mut max_step = 0.0_f32;
        for frame in 1..=1000 {
            engine.tick(frame as f64 * 16.0);
            let focal = engine.focal_position();
            let step = previous.distance(focal);
            max_step = max_step.max(step);

            // Each step is bounded by the smoothing fraction of the worst-case
            // remaining distance (focal and target both inside the orbit disc).
            let bound = motion.smoothing * (previous.distance(center) + orbit);
            assert!(step <= bound + 1e-3, "frame {frame}: step {step} > {bound}");
            previous = focal;
        }

        let final_distance = engine.focal_position().distance(center);
        assert!(
            final_distance > orbit * 0.5 && final_distance < orbit + 1.0,
            "focal settled at distance {final_distance}, orbit {orbit}"
        );
        // Motion happened, and smoothly.
        assert!(max_step > 0.0 && max_step < orbit);
    }

    #[test]
    fn pointer_release_eases_back_without_a_jump() {
        let motion = test_motion();
        let mut engine = FrameEngine::new(300.0, 600.0, &motion, &test_style());
        engine.tick(16.0);

        engine.pointer_event(PointerEvent::Began { x: 50.0, y: 50.0 });
        engine.tick(32.0);
        engine.pointer_event(PointerEvent::Moved { x: 60.0, y: 60.0 });
        for frame in 3..=60 {
            engine.tick(frame as f64 * 16.0);
        }
        // Tracking has pulled the focal point close to the press.
        assert!(engine.focal_position().distance(Vec2::new(60.0, 60.0)) < 2.0);

        engine.pointer_event(PointerEvent::Ended);
        let mut previous = engine.focal_position();
        for frame in 61..=120 {
            engine.tick(frame as f64 * 16.0);
            let focal = engine.focal_position();
            let step = previous.distance(focal);
            // Post-release frames blend toward the trajectory output; the
            // displacement is exactly the smoothing fraction of the distance
            // to that target, so it can never jump.
            let bound = motion.smoothing * previous.distance(engine.autonomous_target());
            assert!(step <= bound + 1e-3, "frame {frame}: step {step} > {bound}");
            previous = focal;
        }
        // And it is actually heading back toward the autonomous path.
        let remaining = engine.focal_position().distance(engine.autonomous_target());
        assert!(remaining < 100.0);
    }
}
