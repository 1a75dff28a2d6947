//! Error types for the cavern simulation

use cavern_agent::AgentError;
use cavern_core::CavernError;
use thiserror::Error;

/// Simulation error type
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Only {carved} cells were carved; a cavern needs at least 3")]
    TooSmall { carved: usize },

    #[error("The exit cannot be reached from the orb")]
    Disconnected,

    #[error("Cavern error: {0}")]
    Cavern(#[from] CavernError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),
}

pub type Result<T> = std::result::Result<T, SimError>;
