//! The node variant: 60 points, at most 5 lines each, light theme.
//!
//! Press `T` to switch themes, `Space` to pause, `R` to reset.
//!
//! Run with: `cargo run --example node_background`

use netfield::prelude::*;

fn main() -> Result<(), SimulationError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    Simulation::new()
        .with_title("netfield - nodes")
        .with_window_size(1024, 640)
        .with_config(NetworkConfig::node_network().with_connection_distance(180.0))
        .with_theme(Theme::Light)
        .run()
}
