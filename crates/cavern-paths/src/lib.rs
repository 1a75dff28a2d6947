//! Shortest paths over weighted, undirected graphs.
//!
//! - **IndexedHeap**: a min- or max-ordered priority queue with in-place
//!   priority changes ([`IndexedHeap::change_priority`])
//! - **Dijkstra** single-source search with early exit ([`dijkstra`],
//!   [`shortest_path`])
//! - **Path utilities**: backpointer reconstruction ([`reconstruct_path`])
//!   and path costing ([`path_cost`])
//!
//! Graphs are read through the [`Graph`] trait, which [`cavern_core::Cavern`]
//! implements. Edge lengths must be non-negative.

mod dijkstra;
mod heap;
mod path;
mod traits;

pub use dijkstra::{Info, Ledger, dijkstra, shortest_path};
pub use heap::{HeapError, IndexedHeap, Order};
pub use path::{PathError, path_cost, reconstruct_path};
pub use traits::{Exit, Graph};
