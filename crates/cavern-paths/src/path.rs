use std::hash::Hash;

use thiserror::Error;

use crate::dijkstra::Ledger;
use crate::traits::Graph;

/// A path that cannot be costed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    #[error("a path needs at least one node")]
    Empty,

    #[error("path step {step} joins two nodes that are not adjacent")]
    NotAdjacent { step: usize },
}

/// Sum of the edge lengths along `path`.
///
/// A single-node path costs 0. Consecutive nodes must be adjacent; when
/// several edges join them the shortest one is counted.
pub fn path_cost<G: Graph>(graph: &G, path: &[G::Node]) -> Result<u64, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    path.windows(2)
        .enumerate()
        .try_fold(0u64, |sum, (step, pair)| {
            let length = graph
                .edge_length(pair[0], pair[1])
                .ok_or(PathError::NotAdjacent { step })?;
            Ok(sum + u64::from(length))
        })
}

/// Walk backpointers from `dest` to the source and return the path in
/// source-to-destination order.
///
/// Returns `None` if `dest` has no ledger entry.
pub fn reconstruct_path<N: Copy + Eq + Hash>(ledger: &Ledger<N>, dest: N) -> Option<Vec<N>> {
    let mut path = Vec::new();
    let mut cur = Some(dest);
    while let Some(n) = cur {
        path.push(n);
        cur = ledger.get(n)?.parent;
    }
    path.reverse();
    Some(path)
}
