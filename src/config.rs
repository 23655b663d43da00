//! Configuration for the network field.
//!
//! Every look of the background is a value of one [`NetworkConfig`]. The two
//! stock looks are available as presets:
//!
//! | Preset | Points | Threshold | Cap | Recompute | Margin | Fade-in |
//! |--------|--------|-----------|-----|-----------|--------|---------|
//! | [`particle_network`](NetworkConfig::particle_network) | area / 15000 | 200 px | none | every frame | 100 px | 0.01 / tick |
//! | [`node_network`](NetworkConfig::node_network) | 60 | 200 px | 5 | 5% of frames | 0 px | none |
//!
//! Configs serialize to JSON, so a look can be tuned without recompiling:
//!
//! ```ignore
//! let config = NetworkConfig::load("background.json")?;
//! Simulation::new().with_config(config).run()?;
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bound on points in a field, whatever the budget or viewport.
pub const MAX_POINTS: usize = 10_000;

/// How many points to create for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointBudget {
    /// A fixed number of points regardless of viewport size.
    Count(u32),
    /// One point per this many square pixels. Lower means more points.
    Density(f32),
}

impl PointBudget {
    /// Number of points for a `width` x `height` viewport.
    ///
    /// Always zero for an empty viewport and never more than [`MAX_POINTS`].
    pub fn count_for(&self, width: f32, height: f32) -> usize {
        if !(width > 0.0 && height > 0.0) {
            return 0;
        }
        let count = match *self {
            PointBudget::Count(n) => n as usize,
            PointBudget::Density(density) if density > 0.0 => {
                (width * height / density).floor() as usize
            }
            PointBudget::Density(_) => 0,
        };
        count.min(MAX_POINTS)
    }
}

/// When the proximity graph is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RecomputeSchedule {
    /// Every tick.
    EveryFrame,
    /// On a tick with this probability (0.0 - 1.0).
    Probability(f32),
}

/// What happens to the points when the viewport is resized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ResizePolicy {
    /// Keep the points; move any that fall outside the new size to
    /// `edge - inset`.
    Reposition {
        /// Distance from the new edge, in pixels.
        inset: f32,
    },
    /// Throw the points away and create a fresh set for the new size.
    Reset,
}

/// Pointer/touch interaction settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Whether pointer input affects the field at all.
    pub enabled: bool,
    /// Points spawned per second while the pointer is held down.
    pub spawn_rate: f32,
    /// Upper bound on spawned points; the oldest is recycled beyond it.
    /// At most [`MAX_POINTS`].
    pub max_spawned: usize,
    /// Pin a point to the live pointer position while it is down.
    pub follower: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spawn_rate: 4.0,
            max_spawned: 40,
            follower: true,
        }
    }
}

/// Full configuration of a network field.
///
/// Use the builder methods or a preset:
///
/// ```ignore
/// let config = NetworkConfig::node_network()
///     .with_connection_distance(150.0)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Number of points for a viewport.
    pub budget: PointBudget,
    /// Initial velocity components are uniform in `±max_speed / 2` pixels per tick.
    pub max_speed: f32,
    /// Points closer than this (strictly) are connected, in pixels.
    pub connection_distance: f32,
    /// Maximum connections per point. Earlier-indexed points claim theirs first.
    pub max_connections: Option<u32>,
    /// When the proximity graph is rebuilt.
    pub recompute: RecomputeSchedule,
    /// How far past the viewport edge points may travel before bouncing.
    pub boundary_margin: f32,
    /// Resize behavior.
    pub resize: ResizePolicy,
    /// Point radius range `(min, max)` in pixels.
    pub radius: (f32, f32),
    /// Per-tick opacity increase for new points. `None` means points start opaque.
    pub fade_in: Option<f32>,
    /// Steady-state point opacity.
    pub opacity: f32,
    /// Multiplier applied to every connection's opacity.
    pub line_opacity: f32,
    /// Connection line width in pixels.
    pub line_width: f32,
    /// Pointer interaction.
    pub interaction: InteractionConfig,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl NetworkConfig {
    /// Canvas variant: density-based count, fade-in, wide bounce margin,
    /// graph rebuilt every frame.
    pub fn particle_network() -> Self {
        Self {
            budget: PointBudget::Density(15_000.0),
            max_speed: 0.7,
            connection_distance: 200.0,
            max_connections: None,
            recompute: RecomputeSchedule::EveryFrame,
            boundary_margin: 100.0,
            resize: ResizePolicy::Reposition { inset: 10.0 },
            radius: (1.2, 2.0),
            fade_in: Some(0.01),
            opacity: 1.0,
            line_opacity: 1.0,
            line_width: 0.5,
            interaction: InteractionConfig::default(),
            seed: None,
        }
    }

    /// Node variant: fixed 60 points, at most 5 connections each, graph rebuilt
    /// on roughly 5% of frames, bounce exactly at the edge, half-strength lines.
    pub fn node_network() -> Self {
        Self {
            budget: PointBudget::Count(60),
            max_speed: 0.5,
            connection_distance: 200.0,
            max_connections: Some(5),
            recompute: RecomputeSchedule::Probability(0.05),
            boundary_margin: 0.0,
            resize: ResizePolicy::Reposition { inset: 10.0 },
            radius: (2.0, 2.0),
            fade_in: None,
            opacity: 1.0,
            line_opacity: 0.5,
            line_width: 1.0,
            interaction: InteractionConfig {
                enabled: false,
                ..InteractionConfig::default()
            },
            seed: None,
        }
    }

    /// Set the point budget.
    pub fn with_budget(mut self, budget: PointBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Set a fixed point count.
    pub fn with_point_count(self, count: u32) -> Self {
        self.with_budget(PointBudget::Count(count))
    }

    /// Set a density (square pixels per point).
    pub fn with_density(self, density: f32) -> Self {
        self.with_budget(PointBudget::Density(density))
    }

    /// Set the maximum speed.
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Set the connection threshold.
    pub fn with_connection_distance(mut self, distance: f32) -> Self {
        self.connection_distance = distance;
        self
    }

    /// Cap connections per point.
    pub fn with_max_connections(mut self, cap: Option<u32>) -> Self {
        self.max_connections = cap;
        self
    }

    /// Set the graph recompute schedule.
    pub fn with_recompute(mut self, schedule: RecomputeSchedule) -> Self {
        self.recompute = schedule;
        self
    }

    /// Set the bounce margin.
    pub fn with_boundary_margin(mut self, margin: f32) -> Self {
        self.boundary_margin = margin;
        self
    }

    /// Set the resize policy.
    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize = policy;
        self
    }

    /// Set the point radius range.
    pub fn with_radius(mut self, min: f32, max: f32) -> Self {
        self.radius = (min, max);
        self
    }

    /// Set the fade-in step, or disable fading with `None`.
    pub fn with_fade_in(mut self, step: Option<f32>) -> Self {
        self.fade_in = step;
        self
    }

    /// Set the line opacity multiplier.
    pub fn with_line_opacity(mut self, opacity: f32) -> Self {
        self.line_opacity = opacity;
        self
    }

    /// Set pointer interaction settings.
    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    /// Seed the RNG for a reproducible field.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every value is in a meaningful range.
    ///
    /// Values are checked on their own, not against a viewport. A density
    /// that would exceed [`MAX_POINTS`] on a large viewport is clamped by
    /// [`PointBudget::count_for`]. A resize inset wider than the viewport is
    /// floored at the top/left edge.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        match self.budget {
            PointBudget::Density(d) if !(d > 0.0) => return invalid("density must be positive"),
            PointBudget::Count(n) if n as usize > MAX_POINTS => {
                return invalid("point count exceeds MAX_POINTS")
            }
            _ => {}
        }
        if !(self.max_speed >= 0.0) {
            return invalid("max_speed must not be negative");
        }
        if !(self.connection_distance > 0.0) {
            return invalid("connection_distance must be positive");
        }
        if let RecomputeSchedule::Probability(p) = self.recompute {
            if !(0.0..=1.0).contains(&p) {
                return invalid("recompute probability must be within 0.0..=1.0");
            }
        }
        if !(self.boundary_margin >= 0.0) {
            return invalid("boundary_margin must not be negative");
        }
        if let ResizePolicy::Reposition { inset } = self.resize {
            if !(inset >= 0.0) {
                return invalid("resize inset must not be negative");
            }
        }
        let (rmin, rmax) = self.radius;
        if !(rmin > 0.0 && rmax >= rmin) {
            return invalid("radius range must be positive with min <= max");
        }
        if let Some(step) = self.fade_in {
            if !(step > 0.0) {
                return invalid("fade_in step must be positive");
            }
        }
        if !(0.0..=1.0).contains(&self.opacity) || !(0.0..=1.0).contains(&self.line_opacity) {
            return invalid("opacities must be within 0.0..=1.0");
        }
        if !(self.line_width > 0.0 && self.line_width.is_finite()) {
            return invalid("line_width must be positive");
        }
        if !(self.interaction.spawn_rate >= 0.0 && self.interaction.spawn_rate.is_finite()) {
            return invalid("spawn_rate must be finite and not negative");
        }
        if self.interaction.max_spawned > MAX_POINTS {
            return invalid("max_spawned exceeds MAX_POINTS");
        }
        Ok(())
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// Missing fields take their [`Default`] values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::particle_network()
    }
}
