//! Agents for the two phases of a cavern run.
//!
//! - [`Explorer`] finds the orb seeing only the current node's neighbors
//!   ([`FindState`]).
//! - [`Flee`] gets back out to the exit before the step budget runs out,
//!   detouring for gold when it can afford to ([`FleeState`]).
//!
//! Both are configured with plain structs ([`ExploreConfig`],
//! [`FleeConfig`]) and report a short summary of what they did.

pub mod config;
pub mod error;
pub mod explore;
pub mod flee;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::{ExploreConfig, FleeConfig, FleePlan, SearchOrder};
pub use error::{AgentError, Result};
pub use explore::{Exploration, Explorer};
pub use flee::{Flee, Flight};
pub use state::{FindState, FleeState, MoveError, NodeStatus};
