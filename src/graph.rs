//! Proximity graph between points.
//!
//! Connections are derived data: the whole graph is thrown away and rebuilt on
//! every recomputation. A pair `(a, b)` is connected iff their distance was
//! strictly below the threshold when the graph was last rebuilt.
//!
//! # Connection cap
//!
//! With a per-point cap `k`, pairs are visited in lexicographic index order
//! (`(0,1), (0,2), ..., (1,2), ...`) and a pair is kept only while both points
//! still have fewer than `k` connections. Earlier-indexed points therefore
//! claim their connections first, and no point ever exceeds `k`.

use crate::config::RecomputeSchedule;
use crate::point::Point;
use rand::Rng;

/// An edge between two nearby points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Lower point index.
    pub a: usize,
    /// Higher point index.
    pub b: usize,
    /// Distance between the points when the graph was rebuilt.
    pub distance: f32,
}

/// Opacity factor for a line of length `distance`.
///
/// `1 - distance / threshold`, clamped to `0.0..=1.0`: 1 for coincident points,
/// falling linearly to exactly 0 at the threshold.
#[inline]
pub fn line_opacity(distance: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / threshold).clamp(0.0, 1.0)
}

/// The set of current connections.
#[derive(Debug, Clone, Default)]
pub struct ProximityGraph {
    connections: Vec<Connection>,
    degree: Vec<u32>,
    rebuilds: u64,
}

impl ProximityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current connections, sorted by `(a, b)`.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether there are no connections.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Connections touching point `index` as of the last rebuild.
    pub fn degree(&self, index: usize) -> u32 {
        self.degree.get(index).copied().unwrap_or(0)
    }

    /// How many times the graph has been rebuilt.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Drop all connections, e.g. when the point set is replaced.
    pub fn clear(&mut self) {
        self.connections.clear();
        self.degree.clear();
    }

    /// Rebuild from scratch.
    pub fn rebuild(&mut self, points: &[Point], threshold: f32, cap: Option<u32>) {
        self.clear();
        self.degree.resize(points.len(), 0);
        self.rebuilds += 1;

        if threshold <= 0.0 || cap == Some(0) {
            return;
        }
        let cap = cap.unwrap_or(u32::MAX);

        for i in 0..points.len() {
            if self.degree[i] >= cap {
                continue;
            }
            let pi = points[i].position;

            for j in (i + 1)..points.len() {
                if self.degree[i] >= cap {
                    break;
                }
                if self.degree[j] >= cap {
                    continue;
                }
                let pj = points[j].position;

                // Cheap reject on one axis before the square root
                if (pj.x - pi.x).abs() >= threshold {
                    continue;
                }

                let distance = pi.distance(pj);
                if distance < threshold {
                    self.connections.push(Connection { a: i, b: j, distance });
                    self.degree[i] += 1;
                    self.degree[j] += 1;
                }
            }
        }
    }
}

impl RecomputeSchedule {
    /// Whether the graph should be rebuilt this tick.
    ///
    /// `EveryFrame` never touches the RNG.
    pub fn should_run<R: Rng>(&self, rng: &mut R) -> bool {
        match *self {
            RecomputeSchedule::EveryFrame => true,
            RecomputeSchedule::Probability(p) if p >= 1.0 => true,
            RecomputeSchedule::Probability(p) if p <= 0.0 => false,
            RecomputeSchedule::Probability(p) => rng.gen::<f32>() < p,
        }
    }
}
