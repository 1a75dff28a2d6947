//! cavern-sim: generate a cavern, find the orb, escape with the gold.
//!
//! Usage: `cavern-sim [config.json]`. Logging is controlled with `RUST_LOG`.

use std::path::Path;

use cavern_sim::{SimConfig, run};
use log::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {path}");
            SimConfig::load(Path::new(&path))?
        }
        None => SimConfig::default(),
    };

    let outcome = run(&config)?;
    println!("{outcome}");
    Ok(())
}
