//! Pointer override state.
//!
//! The host's gesture path deposits events here; the frame loop polls the
//! latest state once per tick. There is no queue — events between frames
//! coalesce, last write wins. Inactivity is a tagged variant rather than a
//! sentinel coordinate pair, so legitimate on-screen coordinates can never be
//! mistaken for "no pointer".

use crate::Vec2;

/// Latest pointer override, or `Inactive` when no press is down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Inactive,
    Active {
        x: f32,
        y: f32,
    },
}

impl PointerState {
    /// Press began at the given canvas-local coordinates.
    pub fn begin(&mut self, x: f32, y: f32) {
        *self = Self::Active { x, y };
    }

    /// Press moved; overwrites the previous coordinates. Idempotent with
    /// `begin` — both simply set the active position.
    pub fn update(&mut self, x: f32, y: f32) {
        *self = Self::Active { x, y };
    }

    /// Press ended or was cancelled; the last coordinates are discarded.
    pub fn end(&mut self) {
        *self = Self::Inactive;
    }

    /// The override position, if a press is active.
    pub fn position(&self) -> Option<Vec2> {
        match *self {
            Self::Inactive => None,
            Self::Active { x, y } => Some(Vec2::new(x, y)),
        }
    }

    /// Applies one discrete event from the host's input path.
    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Began { x, y } => self.begin(x, y),
            PointerEvent::Moved { x, y } => self.update(x, y),
            PointerEvent::Ended => self.end(),
        }
    }
}

/// Discrete pointer input delivered by the host (cancel folds into `Ended`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Began { x: f32, y: f32 },
    Moved { x: f32, y: f32 },
    Ended,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_and_update_both_activate() {
        let mut pointer = PointerState::default();
        assert_eq!(pointer.position(), None);

        pointer.begin(50.0, 50.0);
        assert_eq!(pointer.position(), Some(Vec2::new(50.0, 50.0)));

        pointer.update(60.0, 60.0);
        assert_eq!(pointer.position(), Some(Vec2::new(60.0, 60.0)));

        // A stray move without a begin still activates; the tracker does not
        // try to second-guess the gesture recogniser.
        let mut other = PointerState::default();
        other.update(10.0, 20.0);
        assert_eq!(other.position(), Some(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn end_discards_coordinates() {
        let mut pointer = PointerState::default();
        pointer.begin(5.0, 5.0);
        pointer.end();
        assert_eq!(pointer, PointerState::Inactive);
        pointer.end();
        assert_eq!(pointer, PointerState::Inactive);
    }

    #[test]
    fn events_between_frames_coalesce_last_write_wins() {
        let mut pointer = PointerState::default();
        for event in [
            PointerEvent::Began { x: 1.0, y: 1.0 },
            PointerEvent::Moved { x: 2.0, y: 2.0 },
            PointerEvent::Moved { x: 3.0, y: 4.0 },
        ] {
            pointer.apply(event);
        }
        assert_eq!(pointer.position(), Some(Vec2::new(3.0, 4.0)));

        pointer.apply(PointerEvent::Ended);
        assert_eq!(pointer.position(), None);
    }

    #[test]
    fn zero_coordinates_are_a_legitimate_active_position() {
        let mut pointer = PointerState::default();
        pointer.begin(0.0, 0.0);
        assert_eq!(pointer.position(), Some(Vec2::new(0.0, 0.0)));
    }
}
