use thiserror::Error;

use kb_core::TaskId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("unknown task {0}")]
    UnknownTask(TaskId),

    #[error("task {0} is no longer pending")]
    NotPending(TaskId),
}

pub type AgentResult<T> = Result<T, AgentError>;
