use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("executor rejected the task")]
    Rejected,
}
