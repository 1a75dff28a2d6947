//! Game states backed by a generated cavern.

use cavern_agent::{FindState, FleeState, MoveError, NodeStatus};
use cavern_core::{Cavern, NodeId, Point};
use log::trace;

/// Search phase: the agent sees the current node's neighbors and a
/// Manhattan estimate of the distance to the orb.
pub struct FindSim<'a> {
    cavern: &'a Cavern,
    at: NodeId,
    orb: NodeId,
    moves: usize,
}

impl<'a> FindSim<'a> {
    pub fn new(cavern: &'a Cavern, at: NodeId, orb: NodeId) -> Self {
        Self {
            cavern,
            at,
            orb,
            moves: 0,
        }
    }

    /// Moves accepted so far.
    pub fn moves(&self) -> usize {
        self.moves
    }

    fn pos(&self, n: NodeId) -> Point {
        self.cavern.tile(n).map(|t| t.pos).unwrap_or_default()
    }

    fn estimate(&self, n: NodeId) -> u32 {
        self.pos(n).manhattan(self.pos(self.orb))
    }
}

impl FindState for FindSim<'_> {
    fn current_loc(&self) -> NodeId {
        self.at
    }

    fn neighbors(&self) -> Vec<NodeStatus> {
        self.cavern
            .exits(self.at)
            .iter()
            .map(|e| e.other(self.at))
            .map(|n| NodeStatus::new(n, self.estimate(n)))
            .collect()
    }

    fn distance_to_orb(&self) -> u32 {
        if self.at == self.orb {
            0
        } else {
            self.estimate(self.at).max(1)
        }
    }

    fn move_to(&mut self, id: NodeId) -> Result<(), MoveError> {
        if self.cavern.edge(self.at, id).is_none() {
            return Err(MoveError::NotAdjacent { from: self.at, to: id });
        }
        trace!("search: {} -> {id}", self.at);
        self.at = id;
        self.moves += 1;
        Ok(())
    }
}

/// Escape phase: the whole cavern is visible, every move spends the length
/// of the edge taken and picks up the gold lying on the node entered.
pub struct FleeSim {
    cavern: Cavern,
    at: NodeId,
    exit: NodeId,
    steps_left: u64,
    moves: usize,
    gold: u64,
}

impl FleeSim {
    pub fn new(cavern: Cavern, at: NodeId, exit: NodeId, steps: u64) -> Self {
        Self {
            cavern,
            at,
            exit,
            steps_left: steps,
            moves: 0,
            gold: 0,
        }
    }

    /// Gold picked up so far.
    pub fn gold(&self) -> u64 {
        self.gold
    }

    /// Moves accepted so far.
    pub fn moves(&self) -> usize {
        self.moves
    }
}

impl FleeState for FleeSim {
    type Graph = Cavern;

    fn graph(&self) -> &Cavern {
        &self.cavern
    }

    fn current_node(&self) -> NodeId {
        self.at
    }

    fn exit(&self) -> NodeId {
        self.exit
    }

    fn all_nodes(&self) -> Vec<NodeId> {
        self.cavern.nodes().collect()
    }

    fn gold(&self, n: NodeId) -> u32 {
        self.cavern.tile(n).map_or(0, |t| t.gold)
    }

    fn steps_left(&self) -> u64 {
        self.steps_left
    }

    fn move_to(&mut self, n: NodeId) -> Result<(), MoveError> {
        let Some(edge) = self.cavern.edge(self.at, n) else {
            return Err(MoveError::NotAdjacent { from: self.at, to: n });
        };
        let cost = u64::from(edge.length);
        if cost > self.steps_left {
            return Err(MoveError::OutOfSteps {
                to: n,
                cost,
                left: self.steps_left,
            });
        }
        self.steps_left -= cost;
        self.at = n;
        self.moves += 1;
        let picked = self.cavern.take_gold(n).unwrap_or(0);
        if picked > 0 {
            trace!("picked up {picked} gold at {n}");
        }
        self.gold += u64::from(picked);
        Ok(())
    }
}
