//! Points and the per-tick motion rule.

use glam::{Vec2, Vec3};

/// Where a point came from, which decides how it is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// Created when the field is populated.
    Ambient,
    /// Created at the pointer while it was held down.
    Spawned,
    /// Pinned to the live pointer; removed when the pointer is released.
    Follower,
}

/// A single animated point.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Position in pixels.
    pub position: Vec2,
    /// Velocity in pixels per tick.
    pub velocity: Vec2,
    /// Drawn radius in pixels.
    pub radius: f32,
    /// Current opacity (0.0 - 1.0).
    pub opacity: f32,
    /// RGB color (0.0 - 1.0).
    pub color: Vec3,
    /// Origin of this point.
    pub kind: PointKind,
}

impl Point {
    /// An opaque white ambient point with a 2 px radius.
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            radius: 2.0,
            opacity: 1.0,
            color: Vec3::ONE,
            kind: PointKind::Ambient,
        }
    }

    /// Set the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Move one tick and bounce off `bounds`.
    ///
    /// Returns the number of velocity components that were reflected.
    pub fn advance(&mut self, bounds: &Bounds) -> u32 {
        self.position += self.velocity;

        let (x, vx, fx) = reflect(self.position.x, self.velocity.x, bounds.min_x(), bounds.max_x());
        let (y, vy, fy) = reflect(self.position.y, self.velocity.y, bounds.min_y(), bounds.max_y());
        self.position = Vec2::new(x, y);
        self.velocity = Vec2::new(vx, vy);

        fx as u32 + fy as u32
    }

    /// Step opacity linearly toward `target`, never overshooting.
    pub fn fade_toward(&mut self, target: f32, step: f32) {
        if self.opacity < target {
            self.opacity = (self.opacity + step).min(target);
        } else if self.opacity > target {
            self.opacity = (self.opacity - step).max(target);
        }
    }
}

/// Mirror a coordinate that left `[lo, hi]` back inside and point the velocity
/// inward. Strictly outside only: sitting exactly on a bound is not a crossing.
fn reflect(pos: f32, vel: f32, lo: f32, hi: f32) -> (f32, f32, bool) {
    if pos > hi {
        ((2.0 * hi - pos).max(lo), -vel.abs(), true)
    } else if pos < lo {
        ((2.0 * lo - pos).min(hi), vel.abs(), true)
    } else {
        (pos, vel, false)
    }
}

/// The region points bounce inside: the viewport grown by `margin` on each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
    /// Overshoot allowed past each edge.
    pub margin: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            margin: margin.max(0.0),
        }
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        -self.margin
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.width + self.margin
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        -self.margin
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.height + self.margin
    }

    /// Whether `p` lies inside the bounce region (edges included).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Whether the viewport has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
