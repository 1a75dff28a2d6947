//! Finding the orb with a heuristic-ordered depth-first walk.
//!
//! The explorer only sees its current node and that node's neighbors. It
//! walks depth-first, never entering a node twice, and backtracks through
//! the game state when a branch is exhausted. Neighbors are tried closest to
//! the orb first, which favours promising branches but gives no shortest-walk
//! guarantee. If the orb is reachable at all, it is found.

use std::collections::HashSet;

use cavern_core::NodeId;
use cavern_paths::IndexedHeap;
use log::{debug, info, trace};

use crate::config::{ExploreConfig, SearchOrder};
use crate::error::{AgentError, Result};
use crate::state::FindState;

/// Summary of a successful search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exploration {
    /// Moves issued, backtracking included.
    pub moves: usize,
    /// Distinct nodes entered, the start included.
    pub visited: usize,
}

/// One level of the depth-first walk: a node and the neighbors still to try.
struct Frame {
    node: NodeId,
    candidates: Vec<NodeId>,
    next: usize,
}

/// Orb-finding agent.
#[derive(Debug, Clone, Default)]
pub struct Explorer {
    config: ExploreConfig,
}

impl Explorer {
    pub fn new(config: ExploreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExploreConfig {
        &self.config
    }

    /// Walk until standing on the orb.
    ///
    /// On success the state is left on the orb. Fails with
    /// [`AgentError::OrbUnreachable`] once every reachable node has been
    /// entered, leaving the state back at the start.
    pub fn find<S: FindState>(&self, state: &mut S) -> Result<Exploration> {
        let start = state.current_loc();
        let mut visited = HashSet::from([start]);
        let mut moves = 0;

        if state.distance_to_orb() == 0 {
            info!("already standing on the orb at {start}");
            return Ok(Exploration { moves, visited: 1 });
        }

        let mut stack = vec![Frame {
            node: start,
            candidates: self.candidates(state)?,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let untried = frame.candidates[frame.next..]
                .iter()
                .position(|c| !visited.contains(c));

            let Some(offset) = untried else {
                // Dead end: step back to the node we came from.
                stack.pop();
                if let Some(parent) = stack.last() {
                    trace!("backtracking to {}", parent.node);
                    state.move_to(parent.node)?;
                    moves += 1;
                }
                continue;
            };

            let next = frame.candidates[frame.next + offset];
            frame.next += offset + 1;

            trace!("entering {next}");
            state.move_to(next)?;
            moves += 1;
            visited.insert(next);

            if state.distance_to_orb() == 0 {
                info!(
                    "found the orb at {next} after {moves} moves, {} nodes visited",
                    visited.len()
                );
                return Ok(Exploration {
                    moves,
                    visited: visited.len(),
                });
            }

            stack.push(Frame {
                node: next,
                candidates: self.candidates(state)?,
                next: 0,
            });
        }

        debug!("exhausted {} nodes without finding the orb", visited.len());
        Err(AgentError::OrbUnreachable)
    }

    /// Neighbors of the current node in the order they should be tried.
    fn candidates<S: FindState>(&self, state: &S) -> Result<Vec<NodeId>> {
        let neighbors = state.neighbors();
        match self.config.order {
            SearchOrder::Neighbors => Ok(neighbors.iter().map(|n| n.id()).collect()),
            SearchOrder::Heuristic => {
                let mut closest = IndexedHeap::min();
                for n in &neighbors {
                    // A neighbor listed twice keeps its first distance.
                    if !closest.contains(&n.id()) {
                        closest.insert(n.id(), n.distance_to_target())?;
                    }
                }
                Ok(closest.into_sorted_vec())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FindFixture, Heuristic, grid};
    use cavern_core::Point;

    fn explorer(order: SearchOrder) -> Explorer {
        Explorer::new(ExploreConfig { order })
    }

    #[test]
    fn already_on_orb() {
        let (cavern, ids) = grid(3, 3, |_| true);
        let at = ids[&Point::new(1, 1)];
        let mut state = FindFixture::new(cavern, at, at, Heuristic::Manhattan);
        let found = Explorer::default().find(&mut state).unwrap();
        assert_eq!(found, Exploration { moves: 0, visited: 1 });
        assert!(state.moves.is_empty());
    }

    #[test]
    fn ends_on_orb_for_every_heuristic() {
        // A 6x6 room with a wall down the middle, open at the bottom.
        let (cavern, ids) = grid(6, 6, |p| p.x != 3 || p.y == 5);
        let start = ids[&Point::new(0, 0)];
        let orb = ids[&Point::new(5, 0)];
        for heuristic in [Heuristic::Manhattan, Heuristic::Inverted, Heuristic::Constant] {
            for order in [SearchOrder::Heuristic, SearchOrder::Neighbors] {
                let mut state = FindFixture::new(cavern.clone(), start, orb, heuristic);
                let found = explorer(order).find(&mut state).unwrap();
                assert_eq!(state.at, orb, "{heuristic:?} {order:?}");
                assert_eq!(found.moves, state.moves.len());
                assert!(found.visited <= cavern.len());
            }
        }
    }

    #[test]
    fn heuristic_walks_straight_down_open_corridor() {
        let (cavern, ids) = grid(7, 1, |_| true);
        let start = ids[&Point::new(3, 0)];
        let orb = ids[&Point::new(6, 0)];
        let mut state = FindFixture::new(cavern, start, orb, Heuristic::Manhattan);
        let found = explorer(SearchOrder::Heuristic).find(&mut state).unwrap();
        assert_eq!(found.moves, 3);
        assert_eq!(found.visited, 4);
    }

    #[test]
    fn misleading_heuristic_still_finds_orb() {
        let (cavern, ids) = grid(7, 1, |_| true);
        let start = ids[&Point::new(3, 0)];
        let orb = ids[&Point::new(6, 0)];
        let mut state = FindFixture::new(cavern, start, orb, Heuristic::Inverted);
        let found = explorer(SearchOrder::Heuristic).find(&mut state).unwrap();
        // Walks the wrong way to the end, back to the start, then right.
        assert_eq!(found.moves, 3 + 3 + 3);
        assert_eq!(found.visited, 7);
        assert_eq!(state.at, orb);
    }

    #[test]
    fn cycles_do_not_trap_the_walk() {
        let (cavern, ids) = grid(4, 4, |p| p.x == 0 || p.y == 0 || p.x == 3 || p.y == 3);
        let start = ids[&Point::new(0, 0)];
        let orb = ids[&Point::new(3, 3)];
        let mut state = FindFixture::new(cavern, start, orb, Heuristic::Constant);
        explorer(SearchOrder::Neighbors).find(&mut state).unwrap();
        assert_eq!(state.at, orb);
    }

    #[test]
    fn unreachable_orb_returns_to_start() {
        // Two rooms with no opening between them.
        let (cavern, ids) = grid(5, 3, |p| p.x != 2);
        let start = ids[&Point::new(0, 1)];
        let orb = ids[&Point::new(4, 1)];
        let mut state = FindFixture::new(cavern, start, orb, Heuristic::Manhattan);
        let err = Explorer::default().find(&mut state).unwrap_err();
        assert_eq!(err, AgentError::OrbUnreachable);
        assert_eq!(state.at, start);
    }
}
