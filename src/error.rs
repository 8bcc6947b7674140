//! Error types returned by the execution state and the generator handle.

use thiserror::Error;

use crate::Status;

/// Misuse of an execution state's lifecycle.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// Resumption was requested while the state can't run any further,
    /// e.g. after completion, after a failure or after disposal.
    #[error("cannot resume a generator that is {0}")]
    NotResumable(Status),

    /// `dispose` was called on a state that had already been released.
    #[error("generator state was already disposed")]
    AlreadyDisposed,
}

/// Everything a driver can observe going wrong while pulling a generator.
///
/// `E` is the error type of the generator body.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeneratorError<E> {
    /// The lifecycle was misused, see [StateError]
    #[error(transparent)]
    State(#[from] StateError),

    /// The final value was requested but there is none to give.
    ///
    /// Either the body has not finished yet, it failed, the value was already
    /// taken, or the policy disposed the state on completion.
    #[error("no return value available while the generator is {0}")]
    NoReturnValue(Status),

    /// The body itself failed. Surfaced by the call that resumed it.
    #[error("generator body failed: {0}")]
    Body(E),
}

impl<E> GeneratorError<E> {
    /// The body failure, if this is one
    pub fn into_body(self) -> Option<E> {
        match self {
            GeneratorError::Body(e) => Some(e),
            _ => None,
        }
    }
}
