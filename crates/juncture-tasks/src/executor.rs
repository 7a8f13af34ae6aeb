use std::thread;

use crate::error::TaskError;

/// Unit of background work handed to an [`Executor`].
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Decides where a [`TaskRunner`](crate::TaskRunner) job runs.
pub trait Executor {
    fn execute(&self, job: Job) -> Result<(), TaskError>;
}

/// Runs each job on its own named worker thread.
#[derive(Debug, Clone)]
pub struct ThreadExecutor {
    name: String,
}

impl ThreadExecutor {
    pub fn new() -> Self {
        Self {
            name: "juncture-task".into(),
        }
    }

    /// Name given to spawned worker threads.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for ThreadExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for ThreadExecutor {
    fn execute(&self, job: Job) -> Result<(), TaskError> {
        thread::Builder::new().name(self.name.clone()).spawn(job)?;
        Ok(())
    }
}

/// Runs jobs immediately on the calling thread. Results are still delivered
/// through [`TaskRunner::run_pending`](crate::TaskRunner::run_pending).
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn execute(&self, job: Job) -> Result<(), TaskError> {
        job();
        Ok(())
    }
}
