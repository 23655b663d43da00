//! Draw descriptions produced by the field.
//!
//! A [`Frame`] is a plain list of circles and lines in pixel space. The field
//! builds one without touching any GPU state, and anything implementing
//! [`DrawSurface`] can paint it: the wgpu batcher in [`crate::gpu`], or a
//! recording surface in tests.

use glam::{Vec2, Vec3, Vec4};

/// A filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    /// Straight RGBA, alpha already includes the point opacity.
    pub color: Vec4,
}

/// A stroked segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
    pub width: f32,
    /// Straight RGBA, alpha already includes the distance falloff.
    pub color: Vec4,
}

/// Everything needed to draw one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub background: Vec3,
    pub circles: Vec<Circle>,
    pub lines: Vec<Line>,
}

impl Frame {
    /// Whether there is nothing to draw on.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Paint onto `surface`: clear, lines, then circles on top.
    ///
    /// Returns `false` without drawing when either the frame or the surface
    /// has no area.
    pub fn paint<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> bool {
        let (w, h) = surface.size();
        if w == 0 || h == 0 || self.is_degenerate() {
            return false;
        }

        surface.clear(self.background.extend(1.0));
        for line in &self.lines {
            surface.stroke_line(line.start, line.end, line.width, line.color);
        }
        for circle in &self.circles {
            surface.fill_circle(circle.center, circle.radius, circle.color);
        }
        true
    }
}

/// Something circles and lines can be drawn onto.
pub trait DrawSurface {
    /// Surface size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface.
    fn clear(&mut self, color: Vec4);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4);

    fn stroke_line(&mut self, start: Vec2, end: Vec2, width: f32, color: Vec4);
}
