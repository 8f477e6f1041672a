use thiserror::Error;

use skirmish_core::types::AgentId;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("unknown agent: {0}")]
    UnknownAgent(AgentId),

    #[error("agent already spawned: {0}")]
    DuplicateAgent(AgentId),

    #[error("unknown squad: {0}")]
    UnknownSquad(u32),

    #[error("scenario error: {0}")]
    Scenario(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
