use thiserror::Error;

/// Lifecycle misuse of a [`Controller`](crate::Controller).
///
/// These are wiring bugs in the caller, so `set`/`reset` panic with them;
/// `try_set`/`try_reset` hand them back instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActivationError {
    #[error("controller is already active; reset() it before calling set() again")]
    AlreadyActive,
    #[error("controller is not active; reset() requires a prior set()")]
    NotActive,
}
