//! Vello-backed drawing surface.

use kurbo::{Affine, Circle, Rect, Size, Stroke};
use peniko::{Color, Fill};
use thumbstick_core::surface::{covers, DrawSurface, RadialGradient};
use vello::Scene;

/// Drawing surface that records into a [`vello::Scene`].
///
/// A clear covering the whole surface resets the scene. A partial clear
/// paints the background color over the region, since a scene cannot erase.
pub struct VelloSurface {
    /// The Vello scene being built.
    scene: Scene,
    /// Drawable size in logical pixels.
    size: Size,
    /// Color used for partial clears.
    background: Color,
}

impl VelloSurface {
    /// Create an empty surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            scene: Scene::new(),
            size,
            background: Color::from_rgba8(250, 250, 250, 255),
        }
    }

    /// Set the background color used for partial clears.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Color painted by partial clears and behind the presented frame.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Change the drawable size (e.g. on window resize).
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Get the current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Copy the current scene into `target`, transformed by `transform`.
    pub fn append_to(&self, target: &mut Scene, transform: Option<Affine>) {
        target.append(&self.scene, transform);
    }
}

impl DrawSurface for VelloSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear_rect(&mut self, rect: Rect) {
        if covers(rect, self.bounds()) {
            self.scene.reset();
        } else {
            self.scene.fill(Fill::NonZero, Affine::IDENTITY, self.background, None, &rect);
        }
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) {
        self.scene.stroke(&Stroke::new(width), Affine::IDENTITY, color, None, &circle);
    }

    fn fill_circle(&mut self, circle: Circle, gradient: &RadialGradient) {
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            &gradient.to_peniko(),
            None,
            &circle,
        );
    }
}

impl std::fmt::Debug for VelloSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VelloSurface")
            .field("size", &self.size)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}
