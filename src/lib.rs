//! # netfield
//!
//! An animated network background: points drift across a viewport, bounce at
//! its edges, and nearby pairs are joined by lines that fade out with distance.
//!
//! The simulation is plain CPU code and fully testable without a window. A
//! wgpu/winit runner draws it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use netfield::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_config(NetworkConfig::node_network())
//!         .with_preferences("prefs.json")
//!         .run()
//! }
//! ```
//!
//! ## Headless use
//!
//! ```ignore
//! let mut field = NetworkField::new(NetworkConfig::default().with_seed(1), ThemePalette::dark(), 800.0, 600.0);
//! for _ in 0..60 {
//!     field.step();
//! }
//! let frame = field.frame();
//! println!("{} points, {} lines", frame.circles.len(), frame.lines.len());
//! ```
//!
//! ## Core Concepts
//!
//! - [`NetworkConfig`]: every tunable, with the [`particle_network`](NetworkConfig::particle_network)
//!   and [`node_network`](NetworkConfig::node_network) presets. Serializes to JSON.
//! - [`NetworkField`]: owns the points and the proximity graph. `step` advances
//!   one tick, `frame` describes what to draw.
//! - [`Frame`] / [`DrawSurface`]: the pure draw description and anything that
//!   can paint it.
//! - [`ThemePalette`]: colors for a [`Theme`], pushed into the field when the
//!   theme changes.
//!
//! ## Connection rules
//!
//! | Rule | Behavior |
//! |------|----------|
//! | Threshold | Strict: a pair exactly at the threshold is not connected |
//! | Opacity | `1 - d / threshold` times both point opacities |
//! | Cap | Earlier-indexed points claim their connections first |
//! | Boundary | Mirror reflection at `edge ± boundary_margin` |

pub mod config;
pub mod error;
pub mod field;
pub mod frame;
pub mod gpu;
pub mod graph;
pub mod input;
pub mod interaction;
pub mod point;
mod simulation;
pub mod spawn;
pub mod theme;
pub mod time;

pub use config::{InteractionConfig, NetworkConfig, PointBudget, RecomputeSchedule, ResizePolicy, MAX_POINTS};
pub use error::{ColorError, ConfigError, GpuError, SimulationError};
pub use field::{NetworkField, StepOutcome};
pub use frame::{Circle, DrawSurface, Frame, Line};
pub use glam::{Vec2, Vec3, Vec4};
pub use graph::{line_opacity, Connection, ProximityGraph};
pub use point::{Bounds, Point, PointKind};
pub use simulation::Simulation;
pub use spawn::SpawnContext;
pub use theme::{parse_hex_color, Preferences, Theme, ThemePalette};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use netfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{InteractionConfig, NetworkConfig, PointBudget, RecomputeSchedule, ResizePolicy};
    pub use crate::error::{ConfigError, SimulationError};
    pub use crate::field::{NetworkField, StepOutcome};
    pub use crate::frame::{DrawSurface, Frame};
    pub use crate::input::{KeyCode, PointerEvent};
    pub use crate::simulation::Simulation;
    pub use crate::theme::{Preferences, Theme, ThemePalette};
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3, Vec4};
}
