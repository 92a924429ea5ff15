//! Pointer events delivered to a widget.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Press { position: Point },
    Release { position: Point },
    Move { position: Point },
}

impl PointerEvent {
    /// Pointer position carried by the event.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Press { position }
            | PointerEvent::Release { position }
            | PointerEvent::Move { position } => position,
        }
    }
}

/// Something that consumes pointer events, e.g. a widget.
pub trait PointerTarget {
    /// Handle an event. Returns true if the target changed and should be redrawn.
    fn handle_pointer_event(&mut self, event: PointerEvent) -> bool;
}

/// Tracks the last known pointer position, so a button event can be turned
/// into a [`PointerEvent`] when the platform reports buttons without a
/// position (winit does this).
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    position: Point,
    pressed: bool,
}

impl PointerTracker {
    /// Create a tracker at the origin with no button held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Whether the primary button is currently held.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Record a cursor move.
    pub fn moved(&mut self, position: Point) -> PointerEvent {
        self.position = position;
        PointerEvent::Move { position }
    }

    /// Record a primary-button press at the last known position.
    ///
    /// Returns `None` when the button was already held.
    pub fn pressed(&mut self) -> Option<PointerEvent> {
        if self.pressed {
            return None;
        }
        self.pressed = true;
        Some(PointerEvent::Press { position: self.position })
    }

    /// Record a primary-button release at the last known position.
    ///
    /// Returns `None` when the button was not held.
    pub fn released(&mut self) -> Option<PointerEvent> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;
        Some(PointerEvent::Release { position: self.position })
    }
}
