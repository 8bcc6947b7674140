//! The caller facing generator handle

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use crate::{
    Body, Deferred, ExecutionState, Faults, Finish, GeneratorError, Policy, Resumed, StateError,
    Status,
};

/// Owns one [ExecutionState] and drives it on behalf of a caller
///
/// The policy `P` fixes when the body starts and whether the state outlives
/// completion, see [Policy]. Dropping the handle disposes the state, on every
/// exit path.
///
/// Values are handed out once each. A value that was produced but not yet
/// taken with [next_value](Self::next_value) is *fresh*, and no call resumes
/// the body while a fresh value is waiting. So [advance](Self::advance) can be
/// used as a loop predicate without losing values.
///
/// ```
/// use resumable::*;
///
/// let body = from_iter::<_, ()>(vec!['a', 'b']);
/// let mut gen = Generator::new(body);
///
/// let mut seen = String::new();
/// while gen.advance().unwrap() {
///     seen.push(gen.next_value().unwrap());
/// }
/// assert_eq!(seen, "ab");
/// assert!(gen.is_exhausted());
/// ```
pub struct Generator<B: Body, P: Policy = Deferred> {
    state: ExecutionState<B>,
    policy: PhantomData<fn() -> P>,
}

impl<B: Body> Generator<B, Deferred> {
    /// A lazily started generator that keeps its final value
    pub fn new(body: B) -> Self {
        Self::with_policy(body)
    }
}

impl<B: Body, P: Policy> Generator<B, P> {
    /// Creates the generator under policy `P`
    ///
    /// An eager policy runs the body up to its first suspension point here.
    /// If it fails on the way, the failure is raised by the next call that
    /// would resume it.
    /// ```
    /// use resumable::*;
    ///
    /// let gen = Generator::<_, Immediate>::with_policy(from_iter::<_, ()>(1..));
    /// assert_eq!(gen.yielded(), Some(&1));
    /// ```
    pub fn with_policy(body: B) -> Self {
        trace!(start = ?P::START, finish = ?P::FINISH, "creating generator");
        let state = ExecutionState::start(body, P::START);
        let mut generator = Generator {
            state,
            policy: PhantomData,
        };
        if generator.state.status() == Status::Completed {
            generator.finish();
        }
        generator
    }

    /// Whether the body can't be resumed any more
    ///
    /// True once it finished, normally or not, once the state was disposed,
    /// and after a panic escaped the body. Agrees with [advance](Self::advance)
    /// returning `Ok(false)`.
    pub fn is_exhausted(&self) -> bool {
        !self.state.status().is_resumable()
    }

    /// Resumes if needed, then reports whether a value is waiting
    ///
    /// Returns `Ok(false)` once the body finished. Calling this repeatedly
    /// without taking the value never resumes more than once.
    pub fn advance(&mut self) -> Result<bool, GeneratorError<B::Error>> {
        self.fill()?;
        Ok(self.state.yielded_value().is_some())
    }

    /// Takes the waiting value, resuming once first if there is none
    pub fn next_value(&mut self) -> Result<B::Yield, GeneratorError<B::Error>> {
        self.fill()?;
        let status = self.state.status();
        self.state
            .take_yielded()
            .ok_or(GeneratorError::State(StateError::NotResumable(status)))
    }

    /// Like [next_value](Self::next_value) but leaves the value in place,
    /// so repeated calls return the same value
    pub fn peek(&mut self) -> Result<&B::Yield, GeneratorError<B::Error>> {
        self.fill()?;
        let status = self.state.status();
        self.state
            .yielded_value()
            .ok_or(GeneratorError::State(StateError::NotResumable(status)))
    }

    /// The waiting value, without ever resuming
    pub fn yielded(&self) -> Option<&B::Yield> {
        self.state.yielded_value()
    }

    /// Resumes unconditionally
    ///
    /// This bypasses the freshness guard: a value that was not taken yet is
    /// overwritten. Useful for bodies run for their side effects.
    pub fn resume(&mut self) -> Result<Resumed, GeneratorError<B::Error>> {
        self.surface_fault()?;
        let resumed = self.state.resume()?;
        match resumed {
            Resumed::Suspended => {}
            Resumed::Completed => self.finish(),
            Resumed::Faulted => self.surface_fault()?,
        }
        Ok(resumed)
    }

    /// The final value of a completed body
    ///
    /// Not available before completion, after a failure, or when the policy
    /// disposes the state on completion.
    pub fn return_value(&self) -> Result<&B::Return, GeneratorError<B::Error>> {
        let status = self.state.status();
        self.state
            .final_value()
            .ok_or(GeneratorError::NoReturnValue(status))
    }

    /// Moves the final value out, see [return_value](Self::return_value)
    pub fn take_return_value(&mut self) -> Result<B::Return, GeneratorError<B::Error>> {
        let status = self.state.status();
        self.state
            .take_final_value()
            .ok_or(GeneratorError::NoReturnValue(status))
    }

    /// Where the underlying state is in its lifecycle
    pub fn status(&self) -> Status {
        self.state.status()
    }

    /// How many times the body has been entered
    pub fn resumptions(&self) -> usize {
        self.state.resumptions()
    }

    /// The underlying state, for inspection
    pub fn state(&self) -> &ExecutionState<B> {
        &self.state
    }

    /// Releases the state now. The same happens when the handle is dropped
    pub fn dispose(mut self) {
        self.release();
    }

    fn fill(&mut self) -> Result<(), GeneratorError<B::Error>> {
        self.surface_fault()?;
        if self.state.yielded_value().is_some() || !self.state.status().is_resumable() {
            return Ok(());
        }
        match self.state.resume()? {
            Resumed::Suspended => Ok(()),
            Resumed::Completed => {
                self.finish();
                Ok(())
            }
            Resumed::Faulted => self.surface_fault(),
        }
    }

    fn surface_fault(&mut self) -> Result<(), GeneratorError<B::Error>> {
        let error = match self.state.take_fault() {
            Some(error) => error,
            None => return Ok(()),
        };
        self.finish();
        match P::FAULTS {
            Faults::Propagate => Err(GeneratorError::Body(error)),
            Faults::Suppress => {
                warn!(
                    resumptions = self.state.resumptions(),
                    "suppressed generator body failure"
                );
                Ok(())
            }
        }
    }

    fn finish(&mut self) {
        if P::FINISH == Finish::Dispose {
            self.release();
        }
    }

    fn release(&mut self) {
        if !self.state.is_disposed() {
            // can only fail when already disposed
            let _ = self.state.dispose();
        }
    }
}

impl<B: Body, P: Policy> Drop for Generator<B, P> {
    fn drop(&mut self) {
        if !self.state.is_disposed() {
            debug!(status = %self.state.status(), "disposing generator on drop");
            self.release();
        }
    }
}

impl<B: Body, P: Policy> fmt::Debug for Generator<B, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("start", &P::START)
            .field("finish", &P::FINISH)
            .field("state", &self.state)
            .finish()
    }
}
