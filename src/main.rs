//! netfield runner
//!
//! Usage: `netfield [--preset particles|nodes | --config file.json]
//! [--light | --dark] [--prefs prefs.json] [--seed N]`
//!
//! Logging is controlled with `RUST_LOG` (default `info`).

use netfield::prelude::*;
use std::env;
use std::path::PathBuf;
use std::process;

#[derive(Debug, Default, PartialEq)]
struct Args {
    preset: Option<String>,
    config: Option<PathBuf>,
    theme: Option<Theme>,
    prefs: Option<PathBuf>,
    seed: Option<u64>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{} needs a value", name));
        match arg.as_str() {
            "--preset" => parsed.preset = Some(value("--preset")?),
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--prefs" => parsed.prefs = Some(PathBuf::from(value("--prefs")?)),
            "--seed" => {
                let raw = value("--seed")?;
                parsed.seed = Some(raw.parse().map_err(|_| format!("invalid seed: {}", raw))?);
            }
            "--light" => parsed.theme = Some(Theme::Light),
            "--dark" => parsed.theme = Some(Theme::Dark),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(parsed)
}

fn build(args: Args) -> Result<Simulation, String> {
    let mut config = match (&args.config, args.preset.as_deref()) {
        (Some(path), None) => NetworkConfig::load(path)
            .map_err(|e| format!("failed to load {}: {}", path.display(), e))?,
        (Some(_), Some(_)) => return Err("--preset and --config cannot be combined".to_string()),
        (None, None) | (None, Some("particles")) => NetworkConfig::particle_network(),
        (None, Some("nodes")) => NetworkConfig::node_network(),
        (None, Some(other)) => return Err(format!("unknown preset: {} (expected particles or nodes)", other)),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut sim = Simulation::new().with_config(config);
    if let Some(theme) = args.theme {
        sim = sim.with_theme(theme);
    }
    if let Some(prefs) = args.prefs {
        sim = sim.with_preferences(prefs);
    }
    Ok(sim)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let sim = match parse_args(env::args().skip(1)).and_then(build) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{}", e);
            process::exit(2);
        }
    };

    if let Err(e) = sim.run() {
        log::error!("{}", e);
        process::exit(1);
    }
}
