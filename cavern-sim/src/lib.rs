//! Generated caverns for the search and escape agents.
//!
//! A run generates a cavern ([`mapgen::generate`]), sends an [`Explorer`]
//! from the entrance to the orb through a [`FindSim`], then lets a [`Flee`]
//! agent escape from the orb to the exit through a [`FleeSim`] with a budget
//! proportional to the shortest way out.

use std::fmt;

use cavern_agent::{Exploration, Explorer, Flee, Flight};
use cavern_paths::dijkstra;
use log::info;

pub mod config;
pub mod error;
pub mod mapgen;
pub mod state;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use mapgen::{Layout, generate};
pub use state::{FindSim, FleeSim};

/// What happened during one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub seed: u64,
    pub tiles: usize,
    /// Gold lying in the cavern when the escape began.
    pub gold_available: u64,
    pub search: Exploration,
    /// Length of the shortest way from the orb to the exit.
    pub shortest_exit: u64,
    /// Budget handed to the escape.
    pub budget: u64,
    pub escape: Flight,
    /// Gold picked up during the escape.
    pub gold: u64,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed {} ({} tiles, {} gold)", self.seed, self.tiles, self.gold_available)?;
        writeln!(
            f,
            "search: found the orb in {} moves, {} tiles visited",
            self.search.moves, self.search.visited
        )?;
        write!(
            f,
            "escape: {} gold from {} detours in {} moves, {}/{} steps left (shortest way out {})",
            self.gold,
            self.escape.rewards_visited,
            self.escape.moves,
            self.escape.steps_left,
            self.budget,
            self.shortest_exit
        )
    }
}

/// Budget for an escape whose shortest way out is `shortest` long.
fn budget(shortest: u64, factor: f64) -> u64 {
    (shortest as f64 * factor).ceil() as u64
}

/// Generate a cavern and run both phases on it.
pub fn run(config: &SimConfig) -> Result<Outcome> {
    let Layout {
        cavern,
        entrance,
        orb,
        exit,
        seed,
    } = generate(config)?;

    info!("searching for the orb from {entrance}");
    let mut find = FindSim::new(&cavern, entrance, orb);
    let search = Explorer::new(config.explore).find(&mut find)?;
    info!("orb found after {} moves", search.moves);

    let shortest_exit = dijkstra(&cavern, orb, Some(exit))
        .distance(exit)
        .ok_or(SimError::Disconnected)?;
    let budget = budget(shortest_exit, config.budget_factor);
    let tiles = cavern.len();
    let gold_available = cavern.total_gold();

    info!("escaping to {exit} with {budget} steps (shortest {shortest_exit})");
    let mut flee = FleeSim::new(cavern, orb, exit, budget);
    let escape = Flee::new(config.flee).flee(&mut flee)?;
    info!("escaped with {} gold", flee.gold());

    Ok(Outcome {
        seed,
        tiles,
        gold_available,
        search,
        shortest_exit,
        budget,
        escape,
        gold: flee.gold(),
    })
}
