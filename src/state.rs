//! The execution state of one generator invocation
//!
//! Holds the suspended body (its locals and resume point) together with the
//! output channels: the latest yielded value, the final value, and a captured
//! failure. This is the raw primitive, a [Generator](crate::Generator) wraps it
//! with freshness tracking, policies and scoped disposal.

use std::fmt;

use tracing::{debug, trace};

use crate::{Body, Start, StateError, Step};

/// Where an execution state is in its lifecycle
///
/// ```text
/// Created --(lazy start)------------------------> [Created]
/// Created --(eager start)--> Running --> Suspended
/// Suspended --resume--> Running --> Suspended | Completed | Faulted
/// any --dispose--> Disposed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Suspended before any body logic ran
    Created,
    /// The body is executing. Only observable if the body panicked
    Running,
    /// Paused at a suspension point
    Suspended,
    /// The body finished normally
    Completed,
    /// The body failed
    Faulted,
    /// Resources were released
    Disposed,
}

impl Status {
    /// Whether [ExecutionState::resume] may be called
    pub const fn is_resumable(self) -> bool {
        matches!(self, Status::Created | Status::Suspended)
    }

    /// Whether the body reached its end, normally or not
    pub const fn is_completed(self) -> bool {
        matches!(self, Status::Completed | Status::Faulted)
    }

    /// Lowercase name, as used by `Display`
    pub const fn name(self) -> &'static str {
        match self {
            Status::Created => "created",
            Status::Running => "running",
            Status::Suspended => "suspended",
            Status::Completed => "completed",
            Status::Faulted => "faulted",
            Status::Disposed => "disposed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a single resumption ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resumed {
    /// A new value was yielded
    Suspended,
    /// The body finished, the final value is stored
    Completed,
    /// The body failed, the failure is stored
    Faulted,
}

/// One in-flight or finished invocation of a body
pub struct ExecutionState<B: Body> {
    body: Option<B>,
    yielded: Option<B::Yield>,
    final_value: Option<B::Return>,
    fault: Option<B::Error>,
    status: Status,
    resumptions: usize,
}

impl<B: Body> ExecutionState<B> {
    /// Wraps the body without running any of it
    pub fn new(body: B) -> Self {
        ExecutionState {
            body: Some(body),
            yielded: None,
            final_value: None,
            fault: None,
            status: Status::Created,
            resumptions: 0,
        }
    }

    /// Begins the invocation
    ///
    /// With [Start::Eager] the body runs up to its first suspension point
    /// before this returns. A failure raised on the way is kept in the state,
    /// see [take_fault](Self::take_fault).
    pub fn start(body: B, start: Start) -> Self {
        let mut state = Self::new(body);
        if start == Start::Eager {
            // a fresh state is always resumable
            let _ = state.resume();
        }
        state
    }

    /// Continues the body from its resume point
    ///
    /// Fails with [StateError::NotResumable] if the body already finished,
    /// was disposed, or is still marked running after a panic.
    pub fn resume(&mut self) -> Result<Resumed, StateError> {
        if !self.status.is_resumable() {
            return Err(StateError::NotResumable(self.status));
        }
        let body = match self.body.as_mut() {
            Some(body) => body,
            None => return Err(StateError::NotResumable(self.status)),
        };

        trace!(status = %self.status, resumptions = self.resumptions, "resuming body");
        self.status = Status::Running;
        let step = body.resume();
        self.resumptions += 1;

        let resumed = match step {
            Step::Yield(value) => {
                self.yielded = Some(value);
                self.status = Status::Suspended;
                Resumed::Suspended
            }
            Step::Return(value) => {
                self.body = None;
                self.yielded = None;
                self.final_value = Some(value);
                self.status = Status::Completed;
                debug!(resumptions = self.resumptions, "body completed");
                Resumed::Completed
            }
            Step::Fail(error) => {
                self.body = None;
                self.yielded = None;
                self.fault = Some(error);
                self.status = Status::Faulted;
                debug!(resumptions = self.resumptions, "body faulted");
                Resumed::Faulted
            }
        };
        Ok(resumed)
    }

    /// The most recent yielded value. None once the body has finished
    pub fn yielded_value(&self) -> Option<&B::Yield> {
        self.yielded.as_ref()
    }

    /// Moves the most recent yielded value out
    pub fn take_yielded(&mut self) -> Option<B::Yield> {
        self.yielded.take()
    }

    /// The final value, only once the body completed without failing
    pub fn final_value(&self) -> Option<&B::Return> {
        match self.status {
            Status::Completed => self.final_value.as_ref(),
            _ => None,
        }
    }

    /// Moves the final value out, see [final_value](Self::final_value)
    pub fn take_final_value(&mut self) -> Option<B::Return> {
        match self.status {
            Status::Completed => self.final_value.take(),
            _ => None,
        }
    }

    /// Returns and clears a captured failure
    pub fn take_fault(&mut self) -> Option<B::Error> {
        self.fault.take()
    }

    /// Releases the body and every output slot
    ///
    /// Valid from any state, including mid body. The body's locals are
    /// dropped without running it to a terminal point, so only their own
    /// `Drop` implementations run. Disposing twice is reported as
    /// [StateError::AlreadyDisposed].
    pub fn dispose(&mut self) -> Result<(), StateError> {
        if self.status == Status::Disposed {
            return Err(StateError::AlreadyDisposed);
        }
        trace!(status = %self.status, "disposing state");
        self.body = None;
        self.yielded = None;
        self.final_value = None;
        self.fault = None;
        self.status = Status::Disposed;
        Ok(())
    }

    /// Current lifecycle status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the body finished, normally or by failing
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Whether [dispose](Self::dispose) already ran
    pub fn is_disposed(&self) -> bool {
        self.status == Status::Disposed
    }

    /// How many times the body has been entered
    pub fn resumptions(&self) -> usize {
        self.resumptions
    }
}

impl<B: Body> fmt::Debug for ExecutionState<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionState")
            .field("status", &self.status)
            .field("resumptions", &self.resumptions)
            .field("has_yielded", &self.yielded.is_some())
            .field("has_final_value", &self.final_value.is_some())
            .field("has_fault", &self.fault.is_some())
            .finish()
    }
}
