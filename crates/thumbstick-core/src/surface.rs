//! Drawing surface abstraction.
//!
//! A widget draws through [`DrawSurface`], which only needs to clear a
//! rectangle, stroke a circle and fill a circle with a two-stop radial
//! gradient. [`RecordingSurface`] keeps the calls as a display list.

use kurbo::{Circle, Point, Rect, Size};
use peniko::Color;

/// Two-stop radial gradient sharing one center for both stops.
#[derive(Debug, Clone, Copy)]
pub struct RadialGradient {
    /// Center of both gradient circles.
    pub center: Point,
    /// Radius at which `start_color` is fully applied.
    pub start_radius: f64,
    /// Radius at which `end_color` is fully applied.
    pub end_radius: f64,
    pub start_color: Color,
    pub end_color: Color,
}

impl RadialGradient {
    /// Create a new gradient.
    pub fn new(
        center: Point,
        start_radius: f64,
        end_radius: f64,
        start_color: Color,
        end_color: Color,
    ) -> Self {
        Self {
            center,
            start_radius,
            end_radius,
            start_color,
            end_color,
        }
    }

    /// Convert to a peniko brush gradient.
    pub fn to_peniko(&self) -> peniko::Gradient {
        peniko::Gradient::new_two_point_radial(
            self.center,
            self.start_radius as f32,
            self.center,
            self.end_radius as f32,
        )
        .with_stops([self.start_color, self.end_color])
    }
}

impl PartialEq for RadialGradient {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center
            && self.start_radius == other.start_radius
            && self.end_radius == other.end_radius
            && colors_match(self.start_color, other.start_color)
            && colors_match(self.end_color, other.end_color)
    }
}

/// Compare two colors at 8-bit precision.
pub fn colors_match(a: Color, b: Color) -> bool {
    let a = a.to_rgba8();
    let b = b.to_rgba8();
    (a.r, a.g, a.b, a.a) == (b.r, b.g, b.b, b.a)
}

/// Rendering backend contract.
pub trait DrawSurface {
    /// Drawable area, with the origin at the top-left corner.
    fn size(&self) -> Size;

    /// Erase everything inside `rect`.
    fn clear_rect(&mut self, rect: Rect);

    /// Stroke the outline of `circle`.
    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64);

    /// Fill `circle` with a radial gradient.
    fn fill_circle(&mut self, circle: Circle, gradient: &RadialGradient);

    /// The full drawable area as a rectangle.
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size())
    }
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn clear_rect(&mut self, rect: Rect) {
        (**self).clear_rect(rect);
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) {
        (**self).stroke_circle(circle, color, width);
    }

    fn fill_circle(&mut self, circle: Circle, gradient: &RadialGradient) {
        (**self).fill_circle(circle, gradient);
    }
}

/// A single recorded drawing call.
#[derive(Debug, Clone, Copy)]
pub enum DrawCommand {
    Clear(Rect),
    StrokeCircle {
        circle: Circle,
        color: Color,
        width: f64,
    },
    FillCircle {
        circle: Circle,
        gradient: RadialGradient,
    },
}

impl PartialEq for DrawCommand {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DrawCommand::Clear(a), DrawCommand::Clear(b)) => a == b,
            (
                DrawCommand::StrokeCircle { circle: c1, color: k1, width: w1 },
                DrawCommand::StrokeCircle { circle: c2, color: k2, width: w2 },
            ) => c1.center == c2.center && c1.radius == c2.radius && colors_match(*k1, *k2) && w1 == w2,
            (
                DrawCommand::FillCircle { circle: c1, gradient: g1 },
                DrawCommand::FillCircle { circle: c2, gradient: g2 },
            ) => c1.center == c2.center && c1.radius == c2.radius && g1 == g2,
            _ => false,
        }
    }
}

/// Surface that records drawing calls instead of rasterizing them.
///
/// A clear covering the whole surface drops everything recorded before it,
/// so [`commands`](Self::commands) always describes the visible frame.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl RecordingSurface {
    /// Create an empty recording surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
            clears: 0,
        }
    }

    /// Commands drawn since the last full clear, including that clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of `clear_rect` calls seen so far.
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.clears += 1;
        if covers(rect, self.bounds()) {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokeCircle { circle, color, width });
    }

    fn fill_circle(&mut self, circle: Circle, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::FillCircle {
            circle,
            gradient: *gradient,
        });
    }
}

/// Whether `outer` fully contains `inner`.
pub fn covers(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && outer.x1 >= inner.x1 && outer.y1 >= inner.y1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> RadialGradient {
        RadialGradient::new(Point::new(10.0, 10.0), 5.0, 200.0, Color::WHITE, Color::BLACK)
    }

    #[test]
    fn test_full_clear_discards_previous_commands() {
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        surface.stroke_circle(Circle::new((50.0, 50.0), 10.0), Color::BLACK, 1.0);
        surface.clear_rect(surface.bounds());

        assert_eq!(surface.commands(), &[DrawCommand::Clear(Rect::new(0.0, 0.0, 100.0, 100.0))]);
        assert_eq!(surface.clear_count(), 1);
    }

    #[test]
    fn test_partial_clear_keeps_previous_commands() {
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        surface.fill_circle(Circle::new((50.0, 50.0), 10.0), &gradient());
        surface.clear_rect(Rect::new(0.0, 0.0, 20.0, 20.0));

        assert_eq!(surface.commands().len(), 2);
    }

    #[test]
    fn test_gradient_equality_by_rgba8() {
        let a = gradient();
        let mut b = gradient();
        b.end_color = Color::from_rgba8(0, 0, 0, 255);
        assert_eq!(a, b);

        b.end_color = Color::from_rgba8(0, 0, 1, 255);
        assert_ne!(a, b);
    }

    fn draw_dot<S: DrawSurface>(mut surface: S) -> Size {
        surface.stroke_circle(Circle::new((1.0, 1.0), 1.0), Color::BLACK, 2.0);
        surface.size()
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        assert_eq!(draw_dot(&mut surface), Size::new(10.0, 10.0));
        assert_eq!(surface.commands().len(), 1);
    }
}
