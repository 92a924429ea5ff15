//! Widget state and output events.

use kurbo::{Circle, Point};

use crate::direction::DirectionVector;

/// Geometry and drag flag of a joystick.
#[derive(Debug, Clone, Copy)]
pub struct WidgetState {
    /// Travel boundary. Fixed after construction.
    pub outer: Circle,
    /// Draggable handle. Only its center changes.
    pub inner: Circle,
    /// Whether a press landed on the handle and has not been released.
    pub dragging: bool,
}

impl WidgetState {
    /// State at rest: both circles share `anchor`.
    pub fn at_rest(anchor: Point, outer_radius: f64, inner_radius: f64) -> Self {
        Self {
            outer: Circle::new(anchor, outer_radius),
            inner: Circle::new(anchor, inner_radius),
            dragging: false,
        }
    }

    /// Whether `point` lies within or on the handle.
    pub fn hits_inner(&self, point: Point) -> bool {
        (point - self.inner.center).hypot2() <= self.inner.radius * self.inner.radius
    }

    /// Whether `point` lies within or on the travel boundary.
    pub fn within_outer(&self, point: Point) -> bool {
        (point - self.outer.center).hypot2() <= self.outer.radius * self.outer.radius
    }

    /// Distance of the handle from the anchor.
    pub fn displacement(&self) -> f64 {
        (self.inner.center - self.outer.center).hypot()
    }

    /// Handle displacement as a percentage of the outer radius.
    pub fn proportion(&self) -> f64 {
        self.displacement() * 100.0 / self.outer.radius
    }

    /// Drop the drag and put the handle back on the anchor.
    pub fn reset(&mut self) {
        self.dragging = false;
        self.inner.center = self.outer.center;
    }
}

/// Notification sent to a joystick observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JoystickEvent {
    /// The handle moved; carries the new direction.
    Moved(DirectionVector),
    /// The pointer was released and the handle snapped back.
    Released,
}

impl JoystickEvent {
    /// Direction implied by this event. A release means no deflection.
    pub fn direction(&self) -> DirectionVector {
        match self {
            JoystickEvent::Moved(direction) => *direction,
            JoystickEvent::Released => DirectionVector::ZERO,
        }
    }
}
