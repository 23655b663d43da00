//! Runs the particle preset without a window and prints what each frame
//! would draw.
//!
//! Run with: `cargo run --example headless`

use netfield::prelude::*;

fn main() {
    let config = NetworkConfig::particle_network().with_seed(7);
    let mut field = NetworkField::new(config, ThemePalette::dark(), 1280.0, 720.0);

    for tick in 0..300 {
        let outcome = field.step();
        if tick % 60 == 0 {
            let frame = field.frame();
            println!(
                "tick {:3}: {} points, {} lines drawn, {} reflections",
                tick,
                outcome.points,
                frame.lines.len(),
                outcome.reflections
            );
        }
    }

    field.resize(640.0, 360.0);
    println!(
        "after resize: {} points, {} connections",
        field.points().len(),
        field.connections().len()
    );
}
