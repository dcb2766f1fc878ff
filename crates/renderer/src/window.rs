//! Windowed host: winit event loop, pointer wiring, frame pacing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use animation::{FrameEngine, PointerEvent};

use crate::gpu::GpuState;
use crate::RendererConfig;

pub(crate) fn run(config: &RendererConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title("Dotfield")
        .with_inner_size(window_size)
        .build(&event_loop)
        .context("failed to create window")?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window.clone(), config)?;
    state.window().request_redraw();

    event_loop
        .run(move |event, elwt| {
            // Drive redraws via vblank by waiting between events.
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::WindowEvent { window_id, event } if window_id == state.window().id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            elwt.exit();
                        }
                        WindowEvent::KeyboardInput { event, .. } => {
                            if event.state == ElementState::Pressed && !event.repeat {
                                match event.logical_key {
                                    Key::Named(NamedKey::Space) => state.toggle_paused(),
                                    Key::Named(NamedKey::Escape) => elwt.exit(),
                                    _ => {}
                                }
                            }
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            state.handle_cursor_moved(position);
                        }
                        WindowEvent::CursorLeft { .. } => {
                            state.handle_cursor_left();
                        }
                        WindowEvent::MouseInput {
                            state: button_state,
                            button,
                            ..
                        } => {
                            if button == MouseButton::Left {
                                state.handle_button(button_state);
                            }
                        }
                        WindowEvent::Resized(new_size) => {
                            state.resize(new_size);
                        }
                        WindowEvent::ScaleFactorChanged {
                            mut inner_size_writer,
                            ..
                        } => {
                            // Keep the current logical size when the scale factor changes.
                            let _ = inner_size_writer.request_inner_size(state.size());
                        }
                        WindowEvent::RedrawRequested => match state.render_frame() {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                state.resize(state.size());
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                tracing::error!("surface out of memory; exiting");
                                elwt.exit();
                            }
                            Err(other) => {
                                tracing::warn!("surface error: {other:?}; retrying next frame");
                            }
                        },
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    // Schedule the next frame once winit is about to wait for
                    // events again. While the FPS cap is holding a frame back,
                    // sleep until the interval elapses instead of spinning on
                    // redraw requests.
                    match state.next_frame_deadline(Instant::now()) {
                        Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
                        None => state.window().request_redraw(),
                    }
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}

/// Optional FPS-cap pacing; accumulates frame callbacks until the target
/// interval has elapsed.
struct FramePacing {
    interval: Duration,
    accumulator: Duration,
    last_tick: Option<Instant>,
}

impl FramePacing {
    fn new(fps: f32) -> Self {
        Self {
            interval: Duration::from_secs_f32(1.0 / fps),
            accumulator: Duration::ZERO,
            last_tick: None,
        }
    }

    fn should_render(&mut self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) => {
                let delta = now.saturating_duration_since(last);
                self.last_tick = Some(now);
                self.accumulator = self.accumulator.saturating_add(delta);
                if self.accumulator + Duration::from_micros(250) < self.interval {
                    false
                } else {
                    // Subtract only one interval to avoid a burst after long gaps.
                    self.accumulator = self.accumulator.saturating_sub(self.interval);
                    true
                }
            }
            // The first frame renders unconditionally.
            None => {
                self.last_tick = Some(now);
                true
            }
        }
    }

    /// Time left until the cap admits the next frame.
    fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.accumulator)
    }
}

/// Aggregates the window, GPU state, and frame engine for the preview path.
struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
    engine: FrameEngine,
    cursor: Option<PhysicalPosition<f64>>,
    pressed: bool,
    started: Instant,
    pacing: Option<FramePacing>,
    last_log: Instant,
}

impl WindowState {
    fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self> {
        let size = window.inner_size();
        let gpu = GpuState::new(window.as_ref(), size)?;
        let engine = FrameEngine::new(
            size.width.max(1) as f32,
            size.height.max(1) as f32,
            &config.motion,
            &config.style,
        );

        let target_fps = config.target_fps.filter(|fps| *fps > 0.0);
        if let Some(fps) = target_fps {
            tracing::info!("fps cap set to {:.1}", fps);
        }
        let pacing = target_fps.map(FramePacing::new);

        Ok(Self {
            window,
            gpu,
            engine,
            cursor: None,
            pressed: false,
            started: Instant::now(),
            pacing,
            last_log: Instant::now(),
        })
    }

    fn window(&self) -> &Window {
        self.window.as_ref()
    }

    fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
        let effective = self.gpu.size();
        self.engine
            .set_canvas(effective.width.max(1) as f32, effective.height.max(1) as f32);
    }

    fn toggle_paused(&mut self) {
        let paused = !self.engine.paused();
        self.engine.set_paused(paused);
        tracing::info!(paused, "toggled animation clock");
    }

    /// Records the cursor and, mid-press, forwards it as a pointer move.
    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Some(position);
        if self.pressed {
            self.engine.pointer_event(PointerEvent::Moved {
                x: position.x as f32,
                y: position.y as f32,
            });
        }
    }

    /// A press that leaves the window is a cancel; the engine folds cancel
    /// into `Ended`.
    fn handle_cursor_left(&mut self) {
        self.cursor = None;
        if self.pressed {
            self.pressed = false;
            self.engine.pointer_event(PointerEvent::Ended);
        }
    }

    fn handle_button(&mut self, button_state: ElementState) {
        match button_state {
            ElementState::Pressed => {
                if let Some(position) = self.cursor {
                    self.pressed = true;
                    self.engine.pointer_event(PointerEvent::Began {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }
            ElementState::Released => {
                if self.pressed {
                    self.pressed = false;
                    self.engine.pointer_event(PointerEvent::Ended);
                }
            }
        }
    }

    /// Returns the wake-up deadline while the FPS cap is still holding the
    /// next frame back, or `None` when a redraw should be requested now.
    fn next_frame_deadline(&mut self, now: Instant) -> Option<Instant> {
        let pacing = self.pacing.as_mut()?;
        if pacing.should_render(now) {
            None
        } else {
            Some(now + pacing.remaining())
        }
    }

    /// Runs one engine tick and submits the frame.
    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let timestamp_ms = now.duration_since(self.started).as_secs_f64() * 1000.0;
        let frame = self.engine.tick(timestamp_ms);
        let result = self.gpu.render_frame(&frame);

        if now.duration_since(self.last_log) >= Duration::from_secs(5) {
            let focal = self.engine.focal_position();
            tracing::debug!(
                clock = self.engine.integrated_time(),
                focal_x = focal.x,
                focal_y = focal.y,
                paused = self.engine.paused(),
                "frame state"
            );
            self.last_log = now;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_renders_immediately() {
        let mut pacing = FramePacing::new(30.0);
        assert!(pacing.should_render(Instant::now()));
    }

    #[test]
    fn cap_skips_until_the_interval_elapses() {
        let mut pacing = FramePacing::new(10.0);
        let start = Instant::now();
        assert!(pacing.should_render(start));

        // Halfway through a 100 ms interval the next frame is still held back.
        assert!(!pacing.should_render(start + Duration::from_millis(50)));
        assert!(pacing.remaining() <= Duration::from_millis(50));

        // Once the interval has elapsed the frame is admitted again.
        assert!(pacing.should_render(start + Duration::from_millis(101)));
    }

    #[test]
    fn steady_cadence_alternates_skip_and_render() {
        let mut pacing = FramePacing::new(10.0);
        let start = Instant::now();
        assert!(pacing.should_render(start));

        // Vblank at twice the cap rate: every other callback is skipped.
        let mut rendered = 0;
        for frame in 1..=20 {
            if pacing.should_render(start + Duration::from_millis(50 * frame)) {
                rendered += 1;
            }
        }
        assert_eq!(rendered, 10);
    }
}
