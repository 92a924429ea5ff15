//! A marker steered by joystick output.

use kurbo::{Point, Size};
use thumbstick_core::{DirectionVector, JoystickEvent};

/// Movement consumer: moves at `speed * direction` and stays inside its
/// bounds.
#[derive(Debug, Clone)]
pub struct Marker {
    position: Point,
    direction: DirectionVector,
    /// Logical pixels per second at full deflection.
    speed: f64,
}

impl Marker {
    pub fn new(position: Point, speed: f64) -> Self {
        Self {
            position,
            direction: DirectionVector::ZERO,
            speed,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn direction(&self) -> DirectionVector {
        self.direction
    }

    /// Whether the current direction would move the marker.
    pub fn is_moving(&self) -> bool {
        self.direction.is_finite() && self.direction.magnitude() > 0.0
    }

    /// Take the direction carried by a joystick event.
    pub fn apply(&mut self, event: JoystickEvent) {
        self.direction = event.direction();
    }

    /// Advance by `dt` seconds, clamped to `bounds`. Returns true if the
    /// position changed. Non-finite directions are ignored.
    pub fn step(&mut self, dt: f64, bounds: Size) -> bool {
        if !self.is_moving() {
            return false;
        }
        let next = self.position + self.direction.to_surface_vec2() * (self.speed * dt);
        let clamped = Point::new(
            next.x.clamp(0.0, bounds.width.max(0.0)),
            next.y.clamp(0.0, bounds.height.max(0.0)),
        );
        let moved = clamped != self.position;
        self.position = clamped;
        moved
    }
}
