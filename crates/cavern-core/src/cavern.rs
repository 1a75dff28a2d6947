//! Adjacency-list cavern graph.
//!
//! A [`Cavern`] is an undirected graph whose nodes are [`Tile`]s identified
//! by [`NodeId`] and whose edges carry a non-negative integer length.

use std::fmt;

use thiserror::Error;

use crate::geom::Point;

/// Opaque node identity. Ids are dense indices handed out by
/// [`Cavern::add_node`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-node payload: where the tile sits and how much gold lies on it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub pos: Point,
    pub gold: u32,
}

impl Tile {
    pub const fn new(pos: Point, gold: u32) -> Self {
        Self { pos, gold }
    }
}

/// An undirected edge joining exactly two nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    a: NodeId,
    b: NodeId,
    pub length: u32,
}

impl Edge {
    /// The two endpoints, in the order they were connected.
    #[inline]
    pub fn ends(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    /// The endpoint that is not `n`.
    ///
    /// `n` must be one of the endpoints; for any other node the first
    /// endpoint is returned.
    #[inline]
    pub fn other(&self, n: NodeId) -> NodeId {
        debug_assert!(n == self.a || n == self.b, "{n} is not an endpoint");
        if n == self.a { self.b } else { self.a }
    }

    /// Whether this edge joins `x` and `y` (in either direction).
    #[inline]
    pub fn joins(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// Errors raised while building a [`Cavern`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CavernError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("cannot connect {0} to itself")]
    SelfLoop(NodeId),
}

/// An undirected, edge-weighted graph of tiles.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cavern {
    tiles: Vec<Tile>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl Cavern {
    /// Create an empty cavern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cavern with room for `nodes` tiles.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            tiles: Vec::with_capacity(nodes),
            adjacency: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Add a tile and return its id.
    pub fn add_node(&mut self, tile: Tile) -> NodeId {
        let id = NodeId(self.tiles.len() as u64);
        self.tiles.push(tile);
        self.adjacency.push(Vec::new());
        id
    }

    /// Join `a` and `b` with an edge of the given length.
    ///
    /// Parallel edges are allowed; path queries use the shortest one.
    pub fn connect(&mut self, a: NodeId, b: NodeId, length: u32) -> Result<Edge, CavernError> {
        for n in [a, b] {
            if !self.contains(n) {
                return Err(CavernError::UnknownNode(n));
            }
        }
        if a == b {
            return Err(CavernError::SelfLoop(a));
        }
        let edge = Edge { a, b, length };
        self.adjacency[a.index()].push(edge);
        self.adjacency[b.index()].push(edge);
        self.edge_count += 1;
        Ok(edge)
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the cavern has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether `n` is a node of this cavern.
    #[inline]
    pub fn contains(&self, n: NodeId) -> bool {
        n.index() < self.tiles.len()
    }

    /// All node ids, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.tiles.len() as u64).map(NodeId)
    }

    /// The tile stored at `n`.
    #[inline]
    pub fn tile(&self, n: NodeId) -> Option<&Tile> {
        self.tiles.get(n.index())
    }

    /// Place `gold` on `n`, replacing whatever was there.
    pub fn set_gold(&mut self, n: NodeId, gold: u32) -> Result<(), CavernError> {
        let tile = self
            .tiles
            .get_mut(n.index())
            .ok_or(CavernError::UnknownNode(n))?;
        tile.gold = gold;
        Ok(())
    }

    /// Remove and return the gold lying on `n`.
    pub fn take_gold(&mut self, n: NodeId) -> Result<u32, CavernError> {
        let tile = self
            .tiles
            .get_mut(n.index())
            .ok_or(CavernError::UnknownNode(n))?;
        Ok(std::mem::take(&mut tile.gold))
    }

    /// Edges leaving `n`. Empty for unknown nodes.
    #[inline]
    pub fn exits(&self, n: NodeId) -> &[Edge] {
        self.adjacency.get(n.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The shortest edge joining `a` and `b`, if they are adjacent.
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.exits(a)
            .iter()
            .filter(|e| e.joins(a, b))
            .min_by_key(|e| e.length)
    }

    /// Total gold lying in the cavern.
    pub fn total_gold(&self) -> u64 {
        self.tiles.iter().map(|t| u64::from(t.gold)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> (Cavern, [NodeId; 3]) {
        let mut c = Cavern::new();
        let a = c.add_node(Tile::new(Point::new(0, 0), 0));
        let b = c.add_node(Tile::new(Point::new(1, 0), 5));
        let d = c.add_node(Tile::new(Point::new(2, 0), 7));
        c.connect(a, b, 2).unwrap();
        c.connect(b, d, 3).unwrap();
        (c, [a, b, d])
    }

    #[test]
    fn edges_are_undirected() {
        let (c, [a, b, d]) = line();
        assert_eq!(c.len(), 3);
        assert_eq!(c.edge_count(), 2);
        assert_eq!(c.exits(b).len(), 2);
        assert_eq!(c.edge(a, b).map(|e| e.length), Some(2));
        assert_eq!(c.edge(b, a).map(|e| e.length), Some(2));
        assert!(c.edge(a, d).is_none());
    }

    #[test]
    fn other_endpoint() {
        let (c, [a, b, _]) = line();
        let e = c.exits(a)[0];
        assert_eq!(e.other(a), b);
        assert_eq!(e.other(b), a);
        assert_eq!(e.ends(), (a, b));
    }

    #[test]
    fn parallel_edges_pick_shortest() {
        let (mut c, [a, b, _]) = line();
        c.connect(b, a, 1).unwrap();
        assert_eq!(c.edge(a, b).map(|e| e.length), Some(1));
        assert_eq!(c.edge_count(), 3);
    }

    #[test]
    fn connect_rejects_bad_nodes() {
        let (mut c, [a, _, _]) = line();
        assert_eq!(c.connect(a, a, 1), Err(CavernError::SelfLoop(a)));
        assert_eq!(
            c.connect(a, NodeId(42), 1),
            Err(CavernError::UnknownNode(NodeId(42)))
        );
        assert!(c.exits(NodeId(42)).is_empty());
    }

    #[test]
    fn take_gold_empties_tile() {
        let (mut c, [_, b, d]) = line();
        assert_eq!(c.total_gold(), 12);
        assert_eq!(c.take_gold(b), Ok(5));
        assert_eq!(c.take_gold(b), Ok(0));
        c.set_gold(b, 2).unwrap();
        assert_eq!(c.tile(b).map(|t| t.gold), Some(2));
        assert_eq!(c.set_gold(NodeId(9), 1), Err(CavernError::UnknownNode(NodeId(9))));
        assert_eq!(c.tile(d).map(|t| t.gold), Some(7));
        assert_eq!(c.total_gold(), 9);
    }
}
