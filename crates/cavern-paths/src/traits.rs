use std::fmt::Debug;
use std::hash::Hash;

use cavern_core::{Cavern, NodeId};

/// One edge leaving a node, seen from that node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit<N> {
    /// The endpoint on the far side of the edge.
    pub to: N,
    /// Edge length. Never negative.
    pub length: u32,
}

/// Read-only view of an undirected graph with non-negative edge lengths.
pub trait Graph {
    /// Node identity.
    type Node: Copy + Eq + Hash + Debug;

    /// Append every edge leaving `n` into `buf`. The caller clears `buf`
    /// before calling.
    fn exits(&self, n: Self::Node, buf: &mut Vec<Exit<Self::Node>>);

    /// Length of the shortest edge joining adjacent `from` and `to`, or
    /// `None` if they are not adjacent.
    fn edge_length(&self, from: Self::Node, to: Self::Node) -> Option<u32>;
}

impl Graph for Cavern {
    type Node = NodeId;

    fn exits(&self, n: NodeId, buf: &mut Vec<Exit<NodeId>>) {
        buf.extend(Cavern::exits(self, n).iter().map(|e| Exit {
            to: e.other(n),
            length: e.length,
        }));
    }

    fn edge_length(&self, from: NodeId, to: NodeId) -> Option<u32> {
        self.edge(from, to).map(|e| e.length)
    }
}
