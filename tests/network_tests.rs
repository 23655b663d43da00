//! Integration tests for the network field.
//!
//! These drive `NetworkField` through its public API only: populate, tick,
//! resize, interact, and inspect the frames it produces.

use glam::Vec2;
use netfield::{
    line_opacity, DrawSurface, NetworkConfig, NetworkField, Point, PointKind, RecomputeSchedule,
    ResizePolicy, ThemePalette, Vec4,
};

fn still_config() -> NetworkConfig {
    NetworkConfig::default()
        .with_seed(1234)
        .with_fade_in(None)
        .with_recompute(RecomputeSchedule::EveryFrame)
}

fn moving(x: f32, y: f32, vx: f32, vy: f32) -> Point {
    Point::new(Vec2::new(x, y), Vec2::new(vx, vy))
}

// ============================================================================
// Motion
// ============================================================================

#[test]
fn test_position_is_linear_without_crossings() {
    let points = vec![
        moving(400.0, 300.0, 0.3, -0.2),
        moving(100.0, 500.0, -0.1, 0.35),
        moving(700.0, 80.0, 0.05, 0.05),
    ];
    let initial = points.clone();
    let mut field = NetworkField::from_points(still_config(), ThemePalette::dark(), 800.0, 600.0, points);

    let n = 200;
    let mut reflections = 0;
    for _ in 0..n {
        reflections += field.step().reflections;
    }
    assert_eq!(reflections, 0);

    for (now, start) in field.points().iter().zip(&initial) {
        let expected = start.position + start.velocity * n as f32;
        assert!(
            (now.position - expected).length() < 1e-2,
            "{:?} != {:?}",
            now.position,
            expected
        );
    }
}

#[test]
fn test_velocity_flips_once_per_crossing() {
    let config = still_config().with_boundary_margin(0.0);
    let mut field = NetworkField::from_points(
        config,
        ThemePalette::dark(),
        100.0,
        100.0,
        vec![moving(95.0, 50.0, 3.0, 0.0)],
    );

    // Right wall at tick 2, left wall at tick 36, next right wall at tick 69
    let mut flips = 0;
    let mut reported = 0;
    let mut last_sign = field.points()[0].velocity.x.signum();
    for _ in 0..60 {
        reported += field.step().reflections;
        let sign = field.points()[0].velocity.x.signum();
        if sign != last_sign {
            flips += 1;
            last_sign = sign;
        }
    }
    assert_eq!(flips, 2);
    assert_eq!(reported, 2);
}

#[test]
fn test_points_never_escape_margin() {
    for config in [NetworkConfig::particle_network(), NetworkConfig::node_network()] {
        let config = config.with_seed(99).with_max_speed(40.0);
        let mut field = NetworkField::new(config, ThemePalette::dark(), 640.0, 480.0);
        let bounds = field.bounds();
        for _ in 0..500 {
            field.step();
            for p in field.points() {
                assert!(bounds.contains(p.position), "{:?} escaped {:?}", p.position, bounds);
            }
        }
    }
}

// ============================================================================
// Connections
// ============================================================================

#[test]
fn test_connections_symmetric_and_below_threshold() {
    let mut field = NetworkField::new(
        still_config().with_point_count(120).with_connection_distance(150.0),
        ThemePalette::dark(),
        900.0,
        700.0,
    );
    for _ in 0..30 {
        field.step();
    }

    let points = field.points();
    assert!(!field.connections().is_empty());
    for c in field.connections() {
        let ab = points[c.a].position.distance(points[c.b].position);
        let ba = points[c.b].position.distance(points[c.a].position);
        assert_eq!(ab, ba);
        assert_eq!(c.distance, ab);
        assert!(c.distance < 150.0);
    }
}

#[test]
fn test_exact_threshold_is_not_connected() {
    // Two points exactly 50 apart plus eight far-away bystanders
    let mut points = vec![moving(0.0, 0.0, 0.0, 0.0), moving(30.0, 40.0, 0.0, 0.0)];
    points.extend((0..8).map(|i| moving(300.0 + 80.0 * i as f32, 400.0, 0.0, 0.0)));

    let field = NetworkField::from_points(
        still_config().with_connection_distance(50.0),
        ThemePalette::dark(),
        1000.0,
        1000.0,
        points,
    );
    assert!(field.connections().iter().all(|c| !(c.a == 0 && c.b == 1)));
    assert!(field.connections().is_empty());
    assert!(field.frame().lines.is_empty());
}

#[test]
fn test_close_pair_opacity() {
    let field = NetworkField::from_points(
        still_config().with_connection_distance(200.0),
        ThemePalette::dark(),
        500.0,
        500.0,
        vec![moving(0.0, 0.0, 0.0, 0.0), moving(10.0, 0.0, 0.0, 0.0)],
    );

    assert_eq!(field.connections().len(), 1);
    let opacity = field.connection_opacity(&field.connections()[0]);
    assert!((opacity - 0.95).abs() < 1e-6, "opacity {}", opacity);
}

#[test]
fn test_opacity_monotonic_to_zero() {
    let threshold = 200.0;
    let samples: Vec<f32> = (0..=400).map(|d| line_opacity(d as f32 * 0.5, threshold)).collect();
    assert!(samples.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(line_opacity(threshold, threshold), 0.0);
    assert!(line_opacity(threshold - 0.01, threshold) > 0.0);
}

#[test]
fn test_cap_never_exceeded() {
    let mut field = NetworkField::new(
        NetworkConfig::node_network()
            .with_seed(5)
            .with_recompute(RecomputeSchedule::EveryFrame)
            .with_connection_distance(400.0),
        ThemePalette::dark(),
        800.0,
        600.0,
    );
    for _ in 0..50 {
        field.step();
        let graph = field.graph();
        for i in 0..field.points().len() {
            assert!(graph.degree(i) <= 5);
        }
    }
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_shrink_keeps_points_within_new_size() {
    for policy in [ResizePolicy::Reposition { inset: 10.0 }, ResizePolicy::Reset] {
        let mut field = NetworkField::new(
            still_config().with_point_count(200).with_resize_policy(policy),
            ThemePalette::dark(),
            1600.0,
            1200.0,
        );
        for _ in 0..10 {
            field.step();
        }

        field.resize(500.0, 300.0);
        for p in field.points() {
            assert!(p.position.x <= 500.0, "{:?}: x {}", policy, p.position.x);
            assert!(p.position.y <= 300.0, "{:?}: y {}", policy, p.position.y);
        }
        for c in field.connections() {
            assert!(c.b < field.points().len());
        }
    }
}

// ============================================================================
// Degenerate surfaces
// ============================================================================

struct CountingSurface {
    size: (u32, u32),
    draws: usize,
}

impl DrawSurface for CountingSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }
    fn clear(&mut self, _color: Vec4) {
        self.draws += 1;
    }
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Vec4) {
        self.draws += 1;
    }
    fn stroke_line(&mut self, _start: Vec2, _end: Vec2, _width: f32, _color: Vec4) {
        self.draws += 1;
    }
}

#[test]
fn test_zero_sized_field_never_draws() {
    let mut field = NetworkField::new(NetworkConfig::node_network(), ThemePalette::dark(), 0.0, 0.0);
    assert!(field.points().is_empty());
    field.step();
    field.pointer_down(Vec2::ZERO);
    field.advance_interaction(1.0);

    let mut surface = CountingSurface { size: (800, 600), draws: 0 };
    assert!(!field.frame().paint(&mut surface));
    assert_eq!(surface.draws, 0);
}

#[test]
fn test_zero_sized_surface_skipped() {
    let field = NetworkField::new(still_config().with_point_count(10), ThemePalette::dark(), 200.0, 200.0);
    let mut surface = CountingSurface { size: (0, 600), draws: 0 };
    assert!(!field.frame().paint(&mut surface));
    assert_eq!(surface.draws, 0);
}

// ============================================================================
// Interaction and theming
// ============================================================================

#[test]
fn test_press_drag_release() {
    let mut config = still_config().with_point_count(20);
    config.interaction.spawn_rate = 5.0;
    config.interaction.max_spawned = 4;
    let mut field = NetworkField::new(config, ThemePalette::dark(), 600.0, 400.0);

    field.pointer_down(Vec2::new(100.0, 100.0));
    for i in 0..120 {
        field.pointer_move(Vec2::new(100.0 + i as f32, 100.0));
        field.advance_interaction(1.0 / 60.0);
        field.step();

        let spawned = field.points().iter().filter(|p| p.kind == PointKind::Spawned).count();
        assert!(spawned <= 4);
    }
    assert_eq!(field.points().iter().filter(|p| p.kind == PointKind::Follower).count(), 1);

    field.pointer_up();
    assert!(field.points().iter().all(|p| p.kind != PointKind::Follower));
    assert_eq!(field.points().len(), 24);

    // Nothing more spawns once released
    assert_eq!(field.advance_interaction(10.0), 0);
}

#[test]
fn test_palette_switch_keeps_motion_state() {
    let mut field = NetworkField::new(still_config().with_point_count(30), ThemePalette::dark(), 400.0, 400.0);
    let before: Vec<(Vec2, Vec2)> = field.points().iter().map(|p| (p.position, p.velocity)).collect();
    let connections = field.connections().len();

    field.set_palette(ThemePalette::light());
    let after: Vec<(Vec2, Vec2)> = field.points().iter().map(|p| (p.position, p.velocity)).collect();
    assert_eq!(before, after);
    assert_eq!(field.connections().len(), connections);

    let frame = field.frame();
    assert_eq!(frame.background, ThemePalette::light().background);
    for circle in &frame.circles {
        assert_eq!(circle.color.truncate(), ThemePalette::light().particle_colors[0]);
    }
}

#[test]
fn test_same_seed_same_frames() {
    let run = || {
        let mut field = NetworkField::new(
            NetworkConfig::node_network().with_seed(77),
            ThemePalette::dark(),
            800.0,
            600.0,
        );
        for _ in 0..100 {
            field.step();
        }
        field.frame()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_config_json_roundtrip() {
    let config = NetworkConfig::node_network()
        .with_seed(3)
        .with_resize_policy(ResizePolicy::Reset)
        .with_recompute(RecomputeSchedule::Probability(0.25));
    let json = serde_json::to_string(&config).unwrap();
    let back: NetworkConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
