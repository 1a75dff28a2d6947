//! In-memory game states for the agent tests.

use std::collections::HashMap;

use cavern_core::{Cavern, NodeId, Point, Tile};

use crate::state::{FindState, FleeState, MoveError, NodeStatus};

/// A `w` x `h` grid where every open cell is a node and 4-adjacent open
/// cells are joined by edges of length 1.
pub(crate) fn grid(w: i32, h: i32, open: impl Fn(Point) -> bool) -> (Cavern, HashMap<Point, NodeId>) {
    let mut cavern = Cavern::new();
    let mut ids = HashMap::new();
    for y in 0..h {
        for x in 0..w {
            let p = Point::new(x, y);
            if open(p) {
                ids.insert(p, cavern.add_node(Tile::new(p, 0)));
            }
        }
    }
    for (&p, &id) in &ids {
        for q in [p.shift(1, 0), p.shift(0, 1)] {
            if let Some(&other) = ids.get(&q) {
                cavern.connect(id, other, 1).unwrap();
            }
        }
    }
    (cavern, ids)
}

/// How the find fixture reports distances to the orb.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Heuristic {
    Manhattan,
    /// Far looks near and near looks far.
    Inverted,
    Constant,
}

pub(crate) struct FindFixture {
    pub cavern: Cavern,
    pub at: NodeId,
    pub orb: NodeId,
    pub moves: Vec<NodeId>,
    heuristic: Heuristic,
}

impl FindFixture {
    pub fn new(cavern: Cavern, at: NodeId, orb: NodeId, heuristic: Heuristic) -> Self {
        Self {
            cavern,
            at,
            orb,
            moves: Vec::new(),
            heuristic,
        }
    }

    fn pos(&self, n: NodeId) -> Point {
        self.cavern.tile(n).map(|t| t.pos).unwrap_or_default()
    }

    fn estimate(&self, n: NodeId) -> u32 {
        let d = self.pos(n).manhattan(self.pos(self.orb));
        match self.heuristic {
            Heuristic::Manhattan => d,
            Heuristic::Inverted => 1000 - d,
            Heuristic::Constant => 1,
        }
    }
}

impl FindState for FindFixture {
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
        self.pos(self.at).manhattan(self.pos(self.orb))
    }

    fn move_to(&mut self, id: NodeId) -> Result<(), MoveError> {
        if self.cavern.edge(self.at, id).is_none() {
            return Err(MoveError::NotAdjacent { from: self.at, to: id });
        }
        self.at = id;
        self.moves.push(id);
        Ok(())
    }
}

pub(crate) struct FleeFixture {
    pub cavern: Cavern,
    pub at: NodeId,
    pub exit: NodeId,
    pub steps: u64,
    pub moves: Vec<NodeId>,
    pub gold: u64,
}

impl FleeFixture {
    pub fn new(cavern: Cavern, at: NodeId, exit: NodeId, steps: u64) -> Self {
        Self {
            cavern,
            at,
            exit,
            steps,
            moves: Vec::new(),
            gold: 0,
        }
    }
}

impl FleeState for FleeFixture {
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
        self.steps
    }

    fn move_to(&mut self, n: NodeId) -> Result<(), MoveError> {
        let Some(edge) = self.cavern.edge(self.at, n) else {
            return Err(MoveError::NotAdjacent { from: self.at, to: n });
        };
        let cost = u64::from(edge.length);
        if cost > self.steps {
            return Err(MoveError::OutOfSteps {
                to: n,
                cost,
                left: self.steps,
            });
        }
        self.steps -= cost;
        self.at = n;
        self.moves.push(n);
        self.gold += u64::from(self.cavern.take_gold(n).unwrap_or(0));
        Ok(())
    }
}
