//! Gesture events delivered by the host's recognizer.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Single-pointer gesture event, in canvas-pixel coordinates.
///
/// The host forwards its recognizer's begin / move / end callbacks as these
/// events. `Cancel` covers every abnormal finalization (pointer left the
/// surface, recognizer lost tracking, system interruption).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    Begin { position: Point },
    Move { position: Point },
    End,
    Cancel,
}

impl GestureEvent {
    pub fn begin(x: f64, y: f64) -> Self {
        Self::Begin { position: Point::new(x, y) }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        Self::Move { position: Point::new(x, y) }
    }

    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Begin { position } | Self::Move { position } => Some(*position),
            Self::End | Self::Cancel => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        assert_eq!(GestureEvent::begin(1.0, 2.0).position(), Some(Point::new(1.0, 2.0)));
        assert_eq!(GestureEvent::move_to(3.0, 4.0).position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(GestureEvent::End.position(), None);
        assert_eq!(GestureEvent::Cancel.position(), None);
    }
}
