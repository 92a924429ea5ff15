//! Pointer angle, boundary clamp and direction vector math.
//!
//! The angle is taken with `atan` rather than `atan2`, so it only ever lands
//! in (-π/2, π/2). Both the boundary clamp and the direction vector restore
//! the quadrant from the sign of the pointer offset.

use std::f64::consts::FRAC_PI_2;

use kurbo::{Circle, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Joystick deflection handed to a movement consumer.
///
/// Both components lie in [-1, 1]. `sin` is positive when the handle is
/// above the anchor, even though surface Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DirectionVector {
    pub cos: f64,
    pub sin: f64,
}

impl DirectionVector {
    /// Rest position: no deflection.
    pub const ZERO: Self = Self { cos: 0.0, sin: 0.0 };

    pub fn new(cos: f64, sin: f64) -> Self {
        Self { cos, sin }
    }

    /// Length of the vector (the displacement proportion as a fraction).
    pub fn magnitude(&self) -> f64 {
        self.cos.hypot(self.sin)
    }

    /// Whether either component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.cos.is_finite() && self.sin.is_finite()
    }

    /// As a vector in surface coordinates (Y down).
    pub fn to_surface_vec2(self) -> Vec2 {
        Vec2::new(self.cos, -self.sin)
    }
}

/// How the pointer angle is derived from a pointer offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    /// Plain `atan(dy / dx)`. A pointer exactly on the anchor yields NaN.
    #[default]
    Raw,
    /// Like `Raw`, but a pointer on the vertical through the anchor gets
    /// ±π/2 (or 0 on the anchor itself) without dividing by zero.
    Guarded,
}

impl AngleMode {
    /// Angle of `pointer` relative to `center`, in surface coordinates.
    pub fn pointer_angle(self, center: Point, pointer: Point) -> f64 {
        let dx = pointer.x - center.x;
        let dy = pointer.y - center.y;
        match self {
            AngleMode::Raw => (dy / dx).atan(),
            AngleMode::Guarded if dx == 0.0 => {
                if dy > 0.0 {
                    FRAC_PI_2
                } else if dy < 0.0 {
                    -FRAC_PI_2
                } else {
                    0.0
                }
            }
            AngleMode::Guarded => (dy / dx).atan(),
        }
    }
}

/// Position on the boundary of `outer` for a pointer outside it.
///
/// The X term flips on `pointer.x < center.x`. The Y term multiplies by the
/// sign of the angle and flips on `pointer.y < center.y`.
pub fn clamp_to_boundary(outer: Circle, pointer: Point, angle: f64) -> Point {
    let center = outer.center;
    let radius = outer.radius;

    let x = if pointer.x < center.x {
        center.x - radius * angle.cos()
    } else {
        center.x + radius * angle.cos()
    };

    let y_offset = radius * angle.sin() * angle.signum();
    let y = if pointer.y < center.y {
        center.y - y_offset
    } else {
        center.y + y_offset
    };

    Point::new(x, y)
}

/// Quadrant-corrected unit vector for `angle`, scaled by `proportion`
/// (percent of the outer radius).
///
/// `dx` is the pointer's horizontal offset and `dy` its vertical offset with
/// Y pointing up. A negative offset forces the matching component negative.
pub fn quadrant_vector(dx: f64, dy: f64, angle: f64, proportion: f64) -> DirectionVector {
    let cos = force_sign(angle.cos(), dx < 0.0);
    let sin = force_sign(angle.sin(), dy < 0.0);
    let scale = proportion / 100.0;
    DirectionVector::new(cos * scale, sin * scale)
}

fn force_sign(value: f64, negative: bool) -> f64 {
    if negative { -value.abs() } else { value.abs() }
}
