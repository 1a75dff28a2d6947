//! Game-state adapters the agents are driven by.
//!
//! Both adapters own the agent's position and change it only through
//! `move_to`. [`FindState`] exposes a local view of the cavern; [`FleeState`]
//! exposes the whole graph plus a step budget.

use cavern_core::NodeId;
use cavern_paths::Graph;
use thiserror::Error;

/// A visible neighbor during the search for the orb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeStatus {
    id: NodeId,
    distance: u32,
}

impl NodeStatus {
    pub const fn new(id: NodeId, distance_to_target: u32) -> Self {
        Self {
            id,
            distance: distance_to_target,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Straight-line distance from this node to the orb, ignoring walls.
    #[inline]
    pub fn distance_to_target(&self) -> u32 {
        self.distance
    }
}

/// A move the adapter refused to make.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("{to} is not adjacent to {from}")]
    NotAdjacent { from: NodeId, to: NodeId },

    #[error("moving to {to} costs {cost} steps but only {left} remain")]
    OutOfSteps { to: NodeId, cost: u64, left: u64 },
}

/// Local view used while looking for the orb.
pub trait FindState {
    /// The node the agent stands on.
    fn current_loc(&self) -> NodeId;

    /// Neighbors reachable in one move from the current node.
    fn neighbors(&self) -> Vec<NodeStatus>;

    /// Straight-line distance to the orb; 0 iff standing on it.
    fn distance_to_orb(&self) -> u32;

    /// Move to a neighbor of the current node.
    fn move_to(&mut self, id: NodeId) -> Result<(), MoveError>;
}

/// Full view used while fleeing to the exit.
pub trait FleeState {
    type Graph: Graph<Node = NodeId>;

    /// The whole cavern. It does not change while fleeing.
    fn graph(&self) -> &Self::Graph;

    /// The node the agent stands on.
    fn current_node(&self) -> NodeId;

    /// The node the agent must end on.
    fn exit(&self) -> NodeId;

    /// Every node of the cavern.
    fn all_nodes(&self) -> Vec<NodeId>;

    /// Gold currently lying on `n`.
    fn gold(&self, n: NodeId) -> u32;

    /// Remaining budget. Each move spends the length of the edge taken.
    fn steps_left(&self) -> u64;

    /// Move to a neighbor of the current node, spending its edge length.
    fn move_to(&mut self, n: NodeId) -> Result<(), MoveError>;
}
