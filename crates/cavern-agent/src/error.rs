//! Error types for the cavern agents

use cavern_core::NodeId;
use cavern_paths::{HeapError, PathError};
use thiserror::Error;

use crate::state::MoveError;

/// Cavern agent error type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("explored every reachable node without finding the orb")]
    OrbUnreachable,

    #[error("no path from {from} to the exit {exit}")]
    ExitUnreachable { from: NodeId, exit: NodeId },

    #[error("move rejected: {0}")]
    Move(#[from] MoveError),

    #[error("bad path: {0}")]
    Path(#[from] PathError),

    #[error("priority queue misuse: {0}")]
    Heap(#[from] HeapError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
