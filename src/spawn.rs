//! Spawn context for point initialization.
//!
//! Wraps the field's RNG with the handful of random draws a point needs, so
//! population, pointer spawning and resets all create points the same way.

use crate::config::NetworkConfig;
use crate::point::{Point, PointKind};
use crate::theme::ThemePalette;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Build the field RNG from an optional seed.
pub(crate) fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Random draws for creating points inside a viewport.
pub struct SpawnContext<'a> {
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
    rng: &'a mut SmallRng,
}

impl<'a> SpawnContext<'a> {
    pub(crate) fn new(rng: &'a mut SmallRng, width: f32, height: f32) -> Self {
        Self { width, height, rng }
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`; `min` when the range is empty.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Uniform position in `[0, width) x [0, height)`.
    pub fn random_in_viewport(&mut self) -> Vec2 {
        Vec2::new(self.random_range(0.0, self.width), self.random_range(0.0, self.height))
    }

    /// Velocity with each component uniform in `±max_speed / 2`.
    pub fn random_velocity(&mut self, max_speed: f32) -> Vec2 {
        Vec2::new(
            (self.random() - 0.5) * max_speed,
            (self.random() - 0.5) * max_speed,
        )
    }

    /// A new point at `position` styled per `config` and `palette`.
    ///
    /// Starts transparent when fade-in is enabled.
    pub fn point_at(
        &mut self,
        position: Vec2,
        kind: PointKind,
        config: &NetworkConfig,
        palette: &ThemePalette,
    ) -> Point {
        let velocity = self.random_velocity(config.max_speed);
        let radius = self.random_range(config.radius.0, config.radius.1);
        let color = palette.pick(&mut *self.rng);
        let opacity = if config.fade_in.is_some() { 0.0 } else { config.opacity };

        Point {
            position,
            velocity,
            radius,
            opacity,
            color,
            kind,
        }
    }

    /// A new ambient point at a random position.
    pub fn random_point(&mut self, config: &NetworkConfig, palette: &ThemePalette) -> Point {
        let position = self.random_in_viewport();
        self.point_at(position, PointKind::Ambient, config, palette)
    }

    /// The full ambient point set for this viewport.
    pub fn populate(&mut self, config: &NetworkConfig, palette: &ThemePalette) -> Vec<Point> {
        let count = config.budget.count_for(self.width, self.height);
        (0..count).map(|_| self.random_point(config, palette)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PointBudget;

    #[test]
    fn test_populate_within_viewport() {
        let mut rng = make_rng(Some(3));
        let config = NetworkConfig::default().with_point_count(200);
        let mut ctx = SpawnContext::new(&mut rng, 640.0, 480.0);
        let points = ctx.populate(&config, &ThemePalette::dark());

        assert_eq!(points.len(), 200);
        for p in &points {
            assert!(p.position.x >= 0.0 && p.position.x < 640.0);
            assert!(p.position.y >= 0.0 && p.position.y < 480.0);
            assert!(p.velocity.x.abs() <= config.max_speed / 2.0);
            assert!(p.velocity.y.abs() <= config.max_speed / 2.0);
            assert!(p.radius >= config.radius.0 && p.radius <= config.radius.1);
            assert_eq!(p.kind, PointKind::Ambient);
        }
    }

    #[test]
    fn test_fade_in_points_start_transparent() {
        let mut rng = make_rng(Some(3));
        let mut ctx = SpawnContext::new(&mut rng, 100.0, 100.0);
        let faded = ctx.random_point(&NetworkConfig::particle_network(), &ThemePalette::dark());
        let solid = ctx.random_point(&NetworkConfig::node_network(), &ThemePalette::dark());
        assert_eq!(faded.opacity, 0.0);
        assert_eq!(solid.opacity, 1.0);
    }

    #[test]
    fn test_zero_viewport_populates_nothing() {
        let mut rng = make_rng(Some(3));
        let config = NetworkConfig::default().with_budget(PointBudget::Count(60));
        let mut ctx = SpawnContext::new(&mut rng, 0.0, 0.0);
        assert!(ctx.populate(&config, &ThemePalette::dark()).is_empty());
    }

    #[test]
    fn test_same_seed_same_points() {
        let config = NetworkConfig::default().with_point_count(20);
        let mut a = make_rng(Some(11));
        let mut b = make_rng(Some(11));
        let pa = SpawnContext::new(&mut a, 300.0, 300.0).populate(&config, &ThemePalette::dark());
        let pb = SpawnContext::new(&mut b, 300.0, 300.0).populate(&config, &ThemePalette::dark());
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut rng = make_rng(Some(1));
        let mut ctx = SpawnContext::new(&mut rng, 10.0, 10.0);
        assert_eq!(ctx.random_range(2.0, 2.0), 2.0);
    }
}
