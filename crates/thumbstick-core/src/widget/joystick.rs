//! The joystick widget.

use kurbo::{Circle, Point};

use super::state::{JoystickEvent, WidgetState};
use crate::config::JoystickConfig;
use crate::direction::{self, AngleMode, DirectionVector};
use crate::input::{PointerEvent, PointerTarget};
use crate::style::JoystickStyle;
use crate::surface::{DrawSurface, RadialGradient};

/// Inner radius as a fraction of the outer radius.
pub const INNER_RADIUS_RATIO: f64 = 0.6;
/// Radius of the inner gradient stop (fill color).
pub const GRADIENT_INNER_RADIUS: f64 = 5.0;
/// Radius of the outer gradient stop (stroke color). Fixed, not derived
/// from the widget size.
pub const GRADIENT_OUTER_RADIUS: f64 = 200.0;

type Observer = Box<dyn FnMut(JoystickEvent)>;

/// On-screen joystick drawn onto a surface it owns.
///
/// Construction performs an initial render. Pointer events are ignored
/// until [`attach_input_handlers`](Self::attach_input_handlers) is called.
pub struct JoystickWidget<S: DrawSurface> {
    surface: S,
    state: WidgetState,
    style: JoystickStyle,
    angle_mode: AngleMode,
    direction: DirectionVector,
    handlers_attached: bool,
    observer: Option<Observer>,
}

impl<S: DrawSurface> JoystickWidget<S> {
    /// Create a joystick anchored at `anchor` with outer radius `radius`.
    ///
    /// Colors are CSS color strings. `None` or an unparseable value uses the
    /// default (`#00AA00` fill, `#003300` stroke). The radius is not
    /// validated.
    pub fn new(surface: S, anchor: Point, radius: f64, fill: Option<&str>, stroke: Option<&str>) -> Self {
        Self::with_style(surface, anchor, radius, JoystickStyle::from_strs(fill, stroke))
    }

    /// Create a joystick with an already resolved style.
    pub fn with_style(surface: S, anchor: Point, radius: f64, style: JoystickStyle) -> Self {
        let mut widget = Self {
            surface,
            state: WidgetState::at_rest(anchor, radius, radius * INNER_RADIUS_RATIO),
            style,
            angle_mode: AngleMode::Raw,
            direction: DirectionVector::ZERO,
            handlers_attached: false,
            observer: None,
        };
        log::debug!("Joystick created at ({}, {}) radius {}", anchor.x, anchor.y, radius);
        widget.render();
        widget
    }

    /// Create a joystick from a config.
    pub fn from_config(surface: S, config: &JoystickConfig) -> Self {
        Self::with_style(surface, config.anchor, config.radius, config.style())
            .with_angle_mode(config.angle_mode)
    }

    /// Select the pointer angle formula.
    pub fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = mode;
        self
    }

    /// Travel boundary.
    pub fn outer(&self) -> Circle {
        self.state.outer
    }

    /// Draggable handle.
    pub fn inner(&self) -> Circle {
        self.state.inner
    }

    /// Full widget state.
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    /// Last direction produced by a move, or zero at rest.
    pub fn direction(&self) -> DirectionVector {
        self.direction
    }

    pub fn style(&self) -> &JoystickStyle {
        &self.style
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to resize it. Call
    /// [`render`](Self::render) afterwards if the widget should reappear.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the widget and return its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Install the callback that receives move and release notifications.
    pub fn set_observer(&mut self, observer: impl FnMut(JoystickEvent) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Remove the observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Start reacting to pointer events.
    pub fn attach_input_handlers(&mut self) {
        self.handlers_attached = true;
    }

    pub fn handlers_attached(&self) -> bool {
        self.handlers_attached
    }

    /// Draw the widget.
    ///
    /// The whole surface is cleared first, so anything else drawn on it is
    /// lost.
    pub fn render(&mut self) {
        let WidgetState { outer, inner, .. } = self.state;
        let style = self.style;

        let bounds = self.surface.bounds();
        self.surface.clear_rect(bounds);

        self.surface.stroke_circle(outer, style.stroke, style.outline_width);

        let gradient = RadialGradient::new(
            inner.center,
            GRADIENT_INNER_RADIUS,
            GRADIENT_OUTER_RADIUS,
            style.fill,
            style.stroke,
        );
        self.surface.fill_circle(inner, &gradient);
        self.surface.stroke_circle(inner, style.stroke, style.outline_width);
    }

    /// Press handler. Starts a drag when `position` is on the handle.
    pub fn on_press(&mut self, position: Point) -> bool {
        if self.state.hits_inner(position) {
            self.state.dragging = true;
            log::debug!("Joystick drag started at ({}, {})", position.x, position.y);
        }
        self.state.dragging
    }

    /// Release handler. Ends any drag and snaps the handle back.
    ///
    /// The reset and redraw always happen; observers only hear about
    /// releases that end a drag.
    pub fn on_release(&mut self) {
        let was_dragging = self.state.dragging;
        self.state.reset();
        self.direction = DirectionVector::ZERO;
        if was_dragging {
            self.notify(JoystickEvent::Released);
        }
        self.render();
    }

    /// Move handler. Repositions the handle while dragging.
    ///
    /// Inside the outer circle the handle follows the pointer exactly.
    /// Outside, it is placed on the boundary. Returns the new direction, or
    /// `None` when not dragging.
    pub fn on_move(&mut self, position: Point) -> Option<DirectionVector> {
        if !self.state.dragging {
            return None;
        }

        let center = self.state.outer.center;
        let angle = self.angle_mode.pointer_angle(center, position);

        self.state.inner.center = if self.state.within_outer(position) {
            position
        } else {
            direction::clamp_to_boundary(self.state.outer, position, angle)
        };

        let dx = position.x - center.x;
        let dy = center.y - position.y;
        let direction = self.compute_direction_vector(dx, dy, angle);
        log::debug!("Joystick direction: cos={:.3} sin={:.3}", direction.cos, direction.sin);

        self.direction = direction;
        self.notify(JoystickEvent::Moved(direction));
        self.render();
        Some(direction)
    }

    /// Quadrant-corrected unit vector for `angle`, scaled by how far the
    /// handle sits from the anchor relative to the outer radius.
    ///
    /// `dy` has Y pointing up. The proportion is not clamped.
    pub(crate) fn compute_direction_vector(&self, dx: f64, dy: f64, angle: f64) -> DirectionVector {
        direction::quadrant_vector(dx, dy, angle, self.state.proportion())
    }

    fn notify(&mut self, event: JoystickEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
    }
}

impl<S: DrawSurface> PointerTarget for JoystickWidget<S> {
    fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        if !self.handlers_attached {
            return false;
        }
        match event {
            PointerEvent::Press { position } => self.on_press(position),
            PointerEvent::Release { .. } => {
                self.on_release();
                true
            }
            PointerEvent::Move { position } => self.on_move(position).is_some(),
        }
    }
}

impl<S: DrawSurface + std::fmt::Debug> std::fmt::Debug for JoystickWidget<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoystickWidget")
            .field("surface", &self.surface)
            .field("state", &self.state)
            .field("style", &self.style)
            .field("angle_mode", &self.angle_mode)
            .field("direction", &self.direction)
            .field("handlers_attached", &self.handlers_attached)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{colors_match, DrawCommand, RecordingSurface};
    use kurbo::{Rect, Size};
    use peniko::Color;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TOLERANCE: f64 = 1e-9;

    fn surface() -> RecordingSurface {
        RecordingSurface::new(Size::new(400.0, 300.0))
    }

    fn widget() -> JoystickWidget<RecordingSurface> {
        let mut widget = JoystickWidget::new(surface(), Point::new(100.0, 100.0), 50.0, None, None);
        widget.attach_input_handlers();
        widget
    }

    fn press(widget: &mut JoystickWidget<RecordingSurface>, x: f64, y: f64) -> bool {
        widget.handle_pointer_event(PointerEvent::Press { position: Point::new(x, y) })
    }

    fn drag_to(widget: &mut JoystickWidget<RecordingSurface>, x: f64, y: f64) -> bool {
        widget.handle_pointer_event(PointerEvent::Move { position: Point::new(x, y) })
    }

    fn release(widget: &mut JoystickWidget<RecordingSurface>) -> bool {
        widget.handle_pointer_event(PointerEvent::Release { position: Point::ZERO })
    }

    #[test]
    fn test_construction_at_rest() {
        for (anchor, radius) in [
            (Point::new(0.0, 0.0), 1.0),
            (Point::new(100.0, 100.0), 50.0),
            (Point::new(-20.0, 350.5), 123.25),
        ] {
            let widget = JoystickWidget::new(surface(), anchor, radius, None, None);
            assert_eq!(widget.inner().center, widget.outer().center);
            assert_eq!(widget.outer().center, anchor);
            assert!((widget.outer().radius - radius).abs() < f64::EPSILON);
            assert!((widget.inner().radius - radius * 0.6).abs() < f64::EPSILON);
            assert!(!widget.is_dragging());
            assert_eq!(widget.direction(), DirectionVector::ZERO);
        }
    }

    #[test]
    fn test_construction_renders() {
        let widget = widget();
        let commands = widget.surface().commands();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0], DrawCommand::Clear(Rect::new(0.0, 0.0, 400.0, 300.0)));
    }

    #[test]
    fn test_render_draws_outer_then_inner() {
        let widget = JoystickWidget::new(surface(), Point::new(100.0, 100.0), 50.0, Some("#ff0000"), Some("#0000ff"));
        let red = Color::from_rgba8(255, 0, 0, 255);
        let blue = Color::from_rgba8(0, 0, 255, 255);
        let outer = Circle::new((100.0, 100.0), 50.0);
        let inner = Circle::new((100.0, 100.0), 50.0 * INNER_RADIUS_RATIO);

        let expected = [
            DrawCommand::Clear(Rect::new(0.0, 0.0, 400.0, 300.0)),
            DrawCommand::StrokeCircle { circle: outer, color: blue, width: 1.0 },
            DrawCommand::FillCircle {
                circle: inner,
                gradient: RadialGradient::new(Point::new(100.0, 100.0), 5.0, 200.0, red, blue),
            },
            DrawCommand::StrokeCircle { circle: inner, color: blue, width: 1.0 },
        ];
        assert_eq!(widget.surface().commands(), &expected);
    }

    #[test]
    fn test_render_idempotent() {
        let mut widget = widget();
        widget.render();
        let first = widget.surface().commands().to_vec();
        widget.render();
        assert_eq!(widget.surface().commands(), first.as_slice());
    }

    #[test]
    fn test_default_colors() {
        let widget = widget();
        assert!(colors_match(widget.style().fill, Color::from_rgba8(0x00, 0xAA, 0x00, 255)));
        assert!(colors_match(widget.style().stroke, Color::from_rgba8(0x00, 0x33, 0x00, 255)));
    }

    #[test]
    fn test_events_ignored_before_attach() {
        let mut widget = JoystickWidget::new(surface(), Point::new(100.0, 100.0), 50.0, None, None);
        assert!(!widget.handle_pointer_event(PointerEvent::Press { position: Point::new(100.0, 100.0) }));
        assert!(!widget.is_dragging());

        widget.attach_input_handlers();
        assert!(widget.handlers_attached());
        assert!(widget.handle_pointer_event(PointerEvent::Press { position: Point::new(100.0, 100.0) }));
    }

    #[test]
    fn test_press_inside_inner_starts_drag() {
        let mut widget = widget();
        assert!(press(&mut widget, 110.0, 90.0));
        assert!(widget.is_dragging());
    }

    #[test]
    fn test_press_outside_inner_does_nothing() {
        let mut widget = widget();
        // Inside the outer circle but outside the 30px handle.
        assert!(!press(&mut widget, 140.0, 100.0));
        assert!(!widget.is_dragging());
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut widget = widget();
        assert!(!drag_to(&mut widget, 120.0, 100.0));
        assert_eq!(widget.inner().center, Point::new(100.0, 100.0));
        assert_eq!(widget.on_move(Point::new(120.0, 100.0)), None);
    }

    #[test]
    fn test_move_inside_outer_follows_pointer() {
        let mut widget = widget();
        press(&mut widget, 100.0, 100.0);
        assert!(drag_to(&mut widget, 120.0, 130.0));
        assert_eq!(widget.inner().center, Point::new(120.0, 130.0));
    }

    #[test]
    fn test_move_outside_outer_clamps() {
        let mut widget = widget();
        press(&mut widget, 100.0, 100.0);
        let direction = widget.on_move(Point::new(200.0, 100.0)).unwrap();

        assert!((widget.inner().center.x - 150.0).abs() < TOLERANCE);
        assert!((widget.inner().center.y - 100.0).abs() < TOLERANCE);
        assert!((direction.cos - 1.0).abs() < TOLERANCE);
        assert!(direction.sin.abs() < TOLERANCE);
    }

    #[test]
    fn test_clamped_handle_stays_on_boundary() {
        let mut widget = widget();
        press(&mut widget, 100.0, 100.0);
        for (x, y) in [(300.0, 20.0), (-50.0, -10.0), (0.0, 260.0), (180.0, 400.0), (100.0, -90.0)] {
            drag_to(&mut widget, x, y);
            let distance = (widget.inner().center - widget.outer().center).hypot();
            assert!((distance - 50.0).abs() < 1e-6, "({x}, {y}) -> {distance}");
            assert!((widget.direction().magnitude() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_direction_points_up_for_pointer_above() {
        let mut widget = widget();
        press(&mut widget, 100.0, 100.0);
        let direction = widget.on_move(Point::new(130.0, 60.0)).unwrap();
        assert!(direction.cos > 0.0);
        assert!(direction.sin > 0.0);

        let direction = widget.on_move(Point::new(70.0, 140.0)).unwrap();
        assert!(direction.cos < 0.0);
        assert!(direction.sin < 0.0);
    }

    #[test]
    fn test_half_displacement_scales_by_half() {
        let mut widget = widget();
        press(&mut widget, 100.0, 100.0);
        // 15/20/25 triangle: the handle sits at half the outer radius.
        let direction = widget.on_move(Point::new(115.0, 80.0)).unwrap();

        let angle = (-20.0_f64 / 15.0).atan();
        assert!((direction.cos - angle.cos().abs() * 0.5).abs() < TOLERANCE);
        assert!((direction.sin - angle.sin().abs() * 0.5).abs() < TOLERANCE);
        assert!((direction.magnitude() - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_compute_direction_vector_uses_handle_distance() {
        let mut widget = widget();
        press(&mut widget, 100.0, 100.0);
        drag_to(&mut widget, 125.0, 100.0);

        let direction = widget.compute_direction_vector(25.0, 0.0, 0.0);
        assert!((direction.cos - 0.5).abs() < TOLERANCE);
        assert!(direction.sin.abs() < TOLERANCE);
        assert_eq!(widget.direction(), direction);
    }

    #[test]
    fn test_release_snaps_back() {
        let mut widget = widget();
        press(&mut widget, 100.0, 100.0);
        drag_to(&mut widget, 400.0, 250.0);
        assert!(release(&mut widget));

        assert!(!widget.is_dragging());
        assert_eq!(widget.inner().center, widget.outer().center);
        assert_eq!(widget.direction(), DirectionVector::ZERO);
    }

    #[test]
    fn test_release_without_drag_still_resets() {
        let mut widget = widget();
        let before = widget.surface().clear_count();
        release(&mut widget);
        assert_eq!(widget.inner().center, Point::new(100.0, 100.0));
        assert_eq!(widget.surface().clear_count(), before + 1);
    }

    #[test]
    fn test_move_renders_handle_at_new_position() {
        let mut widget = widget();
        press(&mut widget, 100.0, 100.0);
        drag_to(&mut widget, 110.0, 110.0);

        let commands = widget.surface().commands();
        assert_eq!(commands.len(), 4);
        match commands[2] {
            DrawCommand::FillCircle { circle, gradient } => {
                assert_eq!(circle.center, Point::new(110.0, 110.0));
                assert_eq!(gradient.center, Point::new(110.0, 110.0));
                assert!((gradient.end_radius - GRADIENT_OUTER_RADIUS).abs() < f64::EPSILON);
            }
            other => panic!("expected inner fill, got {other:?}"),
        }
    }

    #[test]
    fn test_observer_receives_moves_and_release() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();

        let mut widget = widget();
        widget.set_observer(move |event| sink.borrow_mut().push(event));
        press(&mut widget, 100.0, 100.0);
        drag_to(&mut widget, 200.0, 100.0);
        release(&mut widget);

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], JoystickEvent::Moved(d) if (d.cos - 1.0).abs() < TOLERANCE));
        assert_eq!(events[1], JoystickEvent::Released);
    }

    #[test]
    fn test_clear_observer() {
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();

        let mut widget = widget();
        widget.set_observer(move |_| *sink.borrow_mut() += 1);
        widget.clear_observer();
        press(&mut widget, 100.0, 100.0);
        drag_to(&mut widget, 120.0, 100.0);
        release(&mut widget);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_stray_release_not_reported() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();

        let mut widget = widget();
        widget.set_observer(move |event| sink.borrow_mut().push(event));
        // Press misses the handle, so no drag is in progress.
        press(&mut widget, 140.0, 100.0);
        let before = widget.surface().clear_count();
        assert!(release(&mut widget));

        assert!(events.borrow().is_empty());
        assert_eq!(widget.inner().center, Point::new(100.0, 100.0));
        assert_eq!(widget.surface().clear_count(), before + 1);
    }

    #[test]
    fn test_vertical_pointer_raw_vs_guarded() {
        let mut raw = widget();
        press(&mut raw, 100.0, 100.0);
        drag_to(&mut raw, 100.0, 100.0);
        assert!(!raw.direction().is_finite());

        let mut guarded = widget().with_angle_mode(AngleMode::Guarded);
        press(&mut guarded, 100.0, 100.0);
        drag_to(&mut guarded, 100.0, 100.0);
        assert_eq!(guarded.direction(), DirectionVector::ZERO);

        drag_to(&mut guarded, 100.0, 80.0);
        assert!(guarded.direction().cos.abs() < TOLERANCE);
        assert!((guarded.direction().sin - 0.4).abs() < TOLERANCE);
    }

    #[test]
    fn test_from_config() {
        let config = JoystickConfig {
            anchor: Point::new(50.0, 60.0),
            radius: 40.0,
            angle_mode: AngleMode::Guarded,
            ..JoystickConfig::default()
        };
        let widget = JoystickWidget::from_config(surface(), &config);
        assert_eq!(widget.outer().center, Point::new(50.0, 60.0));
        assert!((widget.inner().radius - 24.0).abs() < TOLERANCE);
        assert_eq!(widget.angle_mode(), AngleMode::Guarded);
    }

    #[test]
    fn test_into_surface_keeps_drawing() {
        let widget = widget();
        let surface = widget.into_surface();
        assert_eq!(surface.commands().len(), 4);
    }
}
