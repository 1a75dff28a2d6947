use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use crate::heap::{HeapError, IndexedHeap};
use crate::path::reconstruct_path;
use crate::traits::{Exit, Graph};

/// What a search knows about one node: the best known distance from the
/// source and the previous node on that best path (`None` for the source).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Info<N> {
    pub dist: u64,
    pub parent: Option<N>,
}

/// Distances and backpointers recorded by [`dijkstra`].
///
/// A node has an entry iff it was discovered (put on the frontier) or
/// settled. Settled entries are final.
#[derive(Debug, Clone)]
pub struct Ledger<N> {
    source: N,
    entries: HashMap<N, Info<N>>,
}

impl<N: Copy + Eq + Hash> Ledger<N> {
    /// The node the search started from.
    #[inline]
    pub fn source(&self) -> N {
        self.source
    }

    /// Entry for `n`, if discovered.
    #[inline]
    pub fn get(&self, n: N) -> Option<&Info<N>> {
        self.entries.get(&n)
    }

    /// Whether `n` was discovered.
    #[inline]
    pub fn contains(&self, n: N) -> bool {
        self.entries.contains_key(&n)
    }

    /// Best known distance from the source to `n`.
    #[inline]
    pub fn distance(&self, n: N) -> Option<u64> {
        self.get(n).map(|info| info.dist)
    }

    /// Node preceding `n` on its best known path.
    #[inline]
    pub fn predecessor(&self, n: N) -> Option<N> {
        self.get(n).and_then(|info| info.parent)
    }

    /// Number of discovered nodes. Never zero: the source is always present.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; provided for symmetry with [`len`](Self::len).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(node, info)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (N, &Info<N>)> + '_ {
        self.entries.iter().map(|(&n, info)| (n, info))
    }

    /// Path from the source to `dest`, or `None` if `dest` was never
    /// discovered.
    pub fn path_to(&self, dest: N) -> Option<Vec<N>> {
        reconstruct_path(self, dest)
    }
}

/// Single-source Dijkstra search.
///
/// With `Some(target)` the search stops as soon as `target` is settled; the
/// ledger then contains `target` iff it is reachable. With `None` every node
/// reachable from `source` is settled, giving a full distance map.
///
/// Edge lengths are non-negative, so a node's distance is final once it is
/// polled from the frontier and it is never relaxed again. A discovered node
/// is only re-parented on a strictly shorter distance, so among equal-cost
/// paths the one found first is kept.
///
/// # Panics
///
/// Panics if the frontier and the ledger fall out of step, which would be a
/// bug in the search itself.
pub fn dijkstra<G: Graph>(graph: &G, source: G::Node, target: Option<G::Node>) -> Ledger<G::Node> {
    match search(graph, source, target) {
        Ok(ledger) => ledger,
        Err(err) => unreachable!("frontier out of step with the ledger: {err}"),
    }
}

fn search<G: Graph>(
    graph: &G,
    source: G::Node,
    target: Option<G::Node>,
) -> Result<Ledger<G::Node>, HeapError> {
    let mut entries = HashMap::new();
    entries.insert(
        source,
        Info {
            dist: 0,
            parent: None,
        },
    );

    // Discovered but not yet settled nodes, keyed by best known distance.
    let mut frontier: IndexedHeap<G::Node, u64> = IndexedHeap::min();
    frontier.insert(source, 0)?;

    let mut nbuf = Vec::new();

    while let Some((f, dist_f)) = frontier.poll_with_priority() {
        if Some(f) == target {
            break;
        }

        nbuf.clear();
        graph.exits(f, &mut nbuf);

        for &Exit { to: w, length } in nbuf.iter() {
            let dist = dist_f + u64::from(length);
            let info = Info {
                dist,
                parent: Some(f),
            };
            match entries.entry(w) {
                Entry::Vacant(slot) => {
                    slot.insert(info);
                    frontier.insert(w, dist)?;
                }
                // Settled nodes are no longer on the frontier and keep their
                // final entry.
                Entry::Occupied(mut slot) if dist < slot.get().dist && frontier.contains(&w) => {
                    frontier.change_priority(&w, dist)?;
                    slot.insert(info);
                }
                Entry::Occupied(_) => {}
            }
        }
    }

    Ok(Ledger { source, entries })
}

/// The shortest path from `source` to `target`, both included.
///
/// Returns an empty vector if `target` is unreachable, and `[source]` when
/// `source == target`.
pub fn shortest_path<G: Graph>(graph: &G, source: G::Node, target: G::Node) -> Vec<G::Node> {
    dijkstra(graph, source, Some(target))
        .path_to(target)
        .unwrap_or_default()
}
