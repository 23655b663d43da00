//! The network field: points, their proximity graph, and the per-tick update.
//!
//! A [`NetworkField`] owns everything one animated background needs and nothing
//! else. It is driven from outside:
//!
//! ```ignore
//! let mut field = NetworkField::new(NetworkConfig::node_network(), ThemePalette::dark(), 800.0, 600.0);
//!
//! // once per display frame
//! field.advance_interaction(dt);
//! field.step();
//! field.frame().paint(&mut surface);
//! ```
//!
//! # Graph freshness
//!
//! Connections refer to points by index, so any change to the point set
//! (reset, resize, spawning, follower removal) rebuilds the graph immediately.
//! Between scheduled rebuilds the connection list can be stale; the frame
//! always recomputes each line's opacity from the *current* positions, so a
//! line fades out as its points drift apart and disappears at the threshold.

use crate::config::{NetworkConfig, ResizePolicy};
use crate::frame::{Circle, Frame, Line};
use crate::graph::{line_opacity, Connection, ProximityGraph};
use crate::interaction::PointerTracker;
use crate::point::{Bounds, Point, PointKind};
use crate::spawn::{make_rng, SpawnContext};
use crate::theme::ThemePalette;
use glam::Vec2;
use rand::rngs::SmallRng;

/// What a single [`NetworkField::step`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Velocity components reflected at the bounds this tick.
    pub reflections: u32,
    /// Whether the proximity graph was rebuilt this tick.
    pub recomputed: bool,
    /// Number of points after the tick.
    pub points: usize,
}

/// One animated point network.
pub struct NetworkField {
    config: NetworkConfig,
    palette: ThemePalette,
    points: Vec<Point>,
    graph: ProximityGraph,
    rng: SmallRng,
    bounds: Bounds,
    pointer: PointerTracker,
    ticks: u64,
}

impl NetworkField {
    /// Create and populate a field for a `width` x `height` viewport.
    ///
    /// A zero-sized viewport gives an empty (degenerate) field.
    pub fn new(config: NetworkConfig, palette: ThemePalette, width: f32, height: f32) -> Self {
        let rng = make_rng(config.seed);
        let bounds = Bounds::new(width, height, config.boundary_margin);
        let mut field = Self {
            config,
            palette,
            points: Vec::new(),
            graph: ProximityGraph::new(),
            rng,
            bounds,
            pointer: PointerTracker::new(),
            ticks: 0,
        };
        field.populate();
        field.recompute();
        field
    }

    /// Create a field with an explicit point set instead of random ones.
    pub fn from_points(
        config: NetworkConfig,
        palette: ThemePalette,
        width: f32,
        height: f32,
        points: Vec<Point>,
    ) -> Self {
        let rng = make_rng(config.seed);
        let bounds = Bounds::new(width, height, config.boundary_margin);
        let mut field = Self {
            config,
            palette,
            points,
            graph: ProximityGraph::new(),
            rng,
            bounds,
            pointer: PointerTracker::new(),
            ticks: 0,
        };
        field.recompute();
        field
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn palette(&self) -> &ThemePalette {
        &self.palette
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Connections as of the last graph rebuild.
    pub fn connections(&self) -> &[Connection] {
        self.graph.connections()
    }

    pub fn graph(&self) -> &ProximityGraph {
        &self.graph
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Ticks run since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether the viewport has no area. Such a field has no points and
    /// produces frames that paint nothing.
    pub fn is_degenerate(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Whether the pointer is held down over the field.
    pub fn is_pointer_down(&self) -> bool {
        self.pointer.is_down()
    }

    /// Advance one tick: move, bounce, fade, and rebuild the graph if the
    /// schedule says so. The follower stays where the pointer put it.
    pub fn step(&mut self) -> StepOutcome {
        let bounds = self.bounds;
        let target = self.config.opacity;
        let fade = self.config.fade_in;
        let mut reflections = 0;

        for point in &mut self.points {
            if point.kind != PointKind::Follower {
                reflections += point.advance(&bounds);
            }
            if let Some(step) = fade {
                point.fade_toward(target, step);
            }
        }

        let recomputed = self.config.recompute.should_run(&mut self.rng);
        if recomputed {
            self.recompute();
        }
        self.ticks += 1;

        StepOutcome {
            reflections,
            recomputed,
            points: self.points.len(),
        }
    }

    /// Rebuild the proximity graph now.
    pub fn recompute(&mut self) {
        self.graph.rebuild(
            &self.points,
            self.config.connection_distance,
            self.config.max_connections,
        );
    }

    /// Handle a viewport resize according to the configured [`ResizePolicy`].
    ///
    /// Afterwards no point lies right of `width` or below `height`, and the
    /// graph has been rebuilt.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height, self.config.boundary_margin);

        if self.bounds.is_empty() {
            self.drop_points();
        } else if self.points.is_empty() {
            // Coming back from a degenerate size
            self.populate();
        } else {
            match self.config.resize {
                ResizePolicy::Reset => self.populate(),
                ResizePolicy::Reposition { inset } => {
                    let (w, h) = (self.bounds.width, self.bounds.height);
                    for point in &mut self.points {
                        if point.position.x > w {
                            point.position.x = (w - inset).max(0.0);
                        }
                        if point.position.y > h {
                            point.position.y = (h - inset).max(0.0);
                        }
                    }
                }
            }
        }
        self.recompute();
    }

    /// Throw away every point and create a fresh set for the current size.
    pub fn reset(&mut self) {
        self.populate();
        self.recompute();
    }

    /// Switch palettes, recoloring every existing point.
    pub fn set_palette(&mut self, palette: ThemePalette) {
        for point in &mut self.points {
            point.color = palette.pick(&mut self.rng);
        }
        self.palette = palette;
    }

    /// Describe the current state for drawing. Never mutates the field.
    pub fn frame(&self) -> Frame {
        let circles = self
            .points
            .iter()
            .filter(|p| p.opacity > 0.0)
            .map(|p| Circle {
                center: p.position,
                radius: p.radius,
                color: p.color.extend(p.opacity),
            })
            .collect();

        let line_color = self.palette.line_color;
        let lines = self
            .graph
            .connections()
            .iter()
            .filter_map(|c| {
                let opacity = self.connection_opacity(c);
                if opacity <= 0.0 {
                    return None;
                }
                let (a, b) = (&self.points[c.a], &self.points[c.b]);
                Some(Line {
                    start: a.position,
                    end: b.position,
                    width: self.config.line_width,
                    color: line_color.truncate().extend(line_color.w * opacity),
                })
            })
            .collect();

        Frame {
            width: self.bounds.width,
            height: self.bounds.height,
            background: self.palette.background,
            circles,
            lines,
        }
    }

    /// Opacity of a connection right now: distance falloff times both point
    /// opacities times the configured line opacity. Zero for stale indices.
    pub fn connection_opacity(&self, connection: &Connection) -> f32 {
        match (self.points.get(connection.a), self.points.get(connection.b)) {
            (Some(a), Some(b)) => {
                let distance = a.position.distance(b.position);
                line_opacity(distance, self.config.connection_distance)
                    * a.opacity
                    * b.opacity
                    * self.config.line_opacity
            }
            _ => 0.0,
        }
    }

    /// Pointer pressed (or touch started) at `position`.
    pub fn pointer_down(&mut self, position: Vec2) {
        if !self.config.interaction.enabled || self.is_degenerate() {
            return;
        }
        self.pointer.press(position);

        if self.config.interaction.follower {
            self.points.retain(|p| p.kind != PointKind::Follower);
            let follower = self.spawn_at(position, PointKind::Follower);
            self.points.push(Point {
                velocity: Vec2::ZERO,
                opacity: self.config.opacity,
                ..follower
            });
            self.recompute();
        }
    }

    /// Pointer moved. Only matters while it is held down.
    pub fn pointer_move(&mut self, position: Vec2) {
        if !self.pointer.is_down() {
            return;
        }
        self.pointer.move_to(position);
        if let Some(follower) = self.points.iter_mut().find(|p| p.kind == PointKind::Follower) {
            follower.position = position;
        }
    }

    /// Pointer released (or touch ended): stop spawning, drop the follower.
    pub fn pointer_up(&mut self) {
        self.pointer.release();
        let before = self.points.len();
        self.points.retain(|p| p.kind != PointKind::Follower);
        if self.points.len() != before {
            self.recompute();
        }
    }

    /// Pointer left the surface. Same as releasing it.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Spawn points under a held pointer for `dt` seconds of wall time.
    ///
    /// Returns how many points were spawned.
    pub fn advance_interaction(&mut self, dt: f32) -> u32 {
        let interaction = self.config.interaction;
        let Some(position) = self.pointer.position() else {
            return 0;
        };
        if interaction.max_spawned == 0 {
            return 0;
        }

        let limit = interaction.max_spawned.min(u32::MAX as usize) as u32;
        let due = self.pointer.due(dt, interaction.spawn_rate, limit);
        for _ in 0..due {
            let point = self.spawn_at(position, PointKind::Spawned);
            self.points.push(point);

            let spawned = self.points.iter().filter(|p| p.kind == PointKind::Spawned).count();
            if spawned > interaction.max_spawned {
                if let Some(oldest) = self.points.iter().position(|p| p.kind == PointKind::Spawned) {
                    self.points.remove(oldest);
                }
            }
        }
        if due > 0 {
            self.recompute();
        }
        due
    }

    fn spawn_at(&mut self, position: Vec2, kind: PointKind) -> Point {
        let mut ctx = SpawnContext::new(&mut self.rng, self.bounds.width, self.bounds.height);
        ctx.point_at(position, kind, &self.config, &self.palette)
    }

    fn populate(&mut self) {
        self.pointer.release();
        let mut ctx = SpawnContext::new(&mut self.rng, self.bounds.width, self.bounds.height);
        self.points = ctx.populate(&self.config, &self.palette);
    }

    fn drop_points(&mut self) {
        self.pointer.release();
        self.points.clear();
    }
}
