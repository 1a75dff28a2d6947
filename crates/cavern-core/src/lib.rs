//! **cavern-core**: graph model shared by the cavern crates.
//!
//! This crate provides the foundational types: grid geometry for tiles, node
//! identities, undirected weighted edges and the [`Cavern`] adjacency-list
//! graph that path queries and the foraging agents run against.

pub mod cavern;
pub mod geom;

pub use cavern::{Cavern, CavernError, Edge, NodeId, Tile};
pub use geom::{Point, Range};
