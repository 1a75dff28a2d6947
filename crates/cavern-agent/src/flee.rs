//! Leaving the cavern within the step budget, collecting gold on the way.
//!
//! The greedy plan repeatedly takes the richest tile not yet considered and
//! evaluates the round trip *current → tile → exit* as one unit. The trip is
//! taken only if the budget read right before the decision covers all of it,
//! so after every detour the agent stands on the exit with steps to spare.
//! The first unaffordable trip ends collection unless
//! [`FleeConfig::skip_unaffordable`] is set.

use cavern_core::NodeId;
use cavern_paths::{IndexedHeap, path_cost, shortest_path};
use log::{debug, info, trace};

use crate::config::{FleeConfig, FleePlan};
use crate::error::{AgentError, Result};
use crate::state::FleeState;

/// Summary of a successful escape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flight {
    /// Moves issued.
    pub moves: usize,
    /// Gold tiles deliberately detoured through.
    pub rewards_visited: usize,
    /// Budget left on the exit.
    pub steps_left: u64,
}

/// Outcome of planning one round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trip {
    Taken,
    Unaffordable { cost: u64, budget: u64 },
    Unreachable,
}

/// Gold-collecting escape agent.
#[derive(Debug, Clone, Default)]
pub struct Flee {
    config: FleeConfig,
}

impl Flee {
    pub fn new(config: FleeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FleeConfig {
        &self.config
    }

    /// Collect gold as the configured plan allows, then walk to the exit.
    ///
    /// On success the state is left on the exit. Detours are never started
    /// unless the budget covers them and the way out; the final walk to the
    /// exit is the shortest one and is only refused by the state when even
    /// that is unaffordable.
    pub fn flee<S: FleeState>(&self, state: &mut S) -> Result<Flight> {
        let exit = state.exit();
        let mut flight = Flight::default();

        match self.config.plan {
            FleePlan::Direct => {}
            FleePlan::Single => {
                if let Some(reward) = rewards(state)?.poll() {
                    self.round_trip(state, reward, exit, &mut flight)?;
                }
            }
            FleePlan::Greedy => self.collect(state, exit, &mut flight)?,
        }

        let from = state.current_node();
        let way_out = shortest_path(state.graph(), from, exit);
        if way_out.is_empty() {
            return Err(AgentError::ExitUnreachable { from, exit });
        }
        move_along(state, &way_out, &mut flight)?;

        flight.steps_left = state.steps_left();
        info!(
            "reached the exit after {} moves, {} detours, {} steps left",
            flight.moves, flight.rewards_visited, flight.steps_left
        );
        Ok(flight)
    }

    /// Take affordable round trips through the richest remaining tiles.
    fn collect<S: FleeState>(&self, state: &mut S, exit: NodeId, flight: &mut Flight) -> Result<()> {
        let mut richest = rewards(state)?;
        while let Some(reward) = richest.poll() {
            if state.gold(reward) == 0 || reward == state.current_node() {
                trace!("gold on {reward} was already picked up");
                continue;
            }
            match self.round_trip(state, reward, exit, flight)? {
                Trip::Taken | Trip::Unreachable => {}
                Trip::Unaffordable { .. } if self.config.skip_unaffordable => {}
                Trip::Unaffordable { cost, budget } => {
                    debug!("stopping collection: {cost} steps needed, {budget} left");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Plan current → `reward` → `exit` and walk it if the budget allows.
    fn round_trip<S: FleeState>(
        &self,
        state: &mut S,
        reward: NodeId,
        exit: NodeId,
        flight: &mut Flight,
    ) -> Result<Trip> {
        let here = state.current_node();
        let to_reward = shortest_path(state.graph(), here, reward);
        let to_exit = shortest_path(state.graph(), reward, exit);
        if to_reward.is_empty() || to_exit.is_empty() {
            debug!("skipping {reward}: no way there and out");
            return Ok(Trip::Unreachable);
        }

        let cost = path_cost(state.graph(), &to_reward)? + path_cost(state.graph(), &to_exit)?;
        let budget = state.steps_left();
        if budget < cost.saturating_add(self.config.reserve) {
            debug!("cannot afford {reward}: round trip {cost}, budget {budget}");
            return Ok(Trip::Unaffordable { cost, budget });
        }

        debug!(
            "detouring through {reward} ({} gold): round trip {cost}, budget {budget}",
            state.gold(reward)
        );
        move_along(state, &to_reward, flight)?;
        flight.rewards_visited += 1;
        move_along(state, &to_exit, flight)?;
        Ok(Trip::Taken)
    }
}

/// Max-heap of every tile with gold, keyed by the gold on it. The tile the
/// agent stands on is left out: gold is only picked up on arrival.
fn rewards<S: FleeState>(state: &S) -> Result<IndexedHeap<NodeId, u32>> {
    let here = state.current_node();
    let mut richest = IndexedHeap::max();
    for n in state.all_nodes() {
        let gold = state.gold(n);
        if gold > 0 && n != here {
            richest.insert(n, gold)?;
        }
    }
    Ok(richest)
}

/// Walk `path` from the current node, skipping nodes already stood on.
fn move_along<S: FleeState>(state: &mut S, path: &[NodeId], flight: &mut Flight) -> Result<()> {
    for &n in path {
        if n != state.current_node() {
            trace!("moving to {n}, {} steps left", state.steps_left());
            state.move_to(n)?;
            flight.moves += 1;
        }
    }
    Ok(())
}
