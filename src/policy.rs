//! Suspension policies
//!
//! A policy decides what happens at the two edges of a generator's life:
//! whether the body starts running on creation, and whether the state
//! survives completion. It is a type parameter of [Generator](crate::Generator),
//! so it is fixed when the generator type is chosen, never per call.

use std::marker::PhantomData;

/// Behaviour on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Start {
    /// Suspend before any body logic runs. The first resumption runs the body
    /// up to its first suspension point
    Lazy,
    /// Run the body to its first suspension point before creation returns
    Eager,
}

/// Behaviour on completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Keep the state, so the final value can still be read.
    /// Disposal happens when the handle goes away
    Preserve,
    /// Release the state as soon as the body finishes.
    /// The final value is forfeited
    Dispose,
}

/// What to do with a failure raised by the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faults {
    /// Hand it to whichever call resumed the body
    Propagate,
    /// Log it and treat it as plain completion
    Suppress,
}

/// A suspension policy, see the module docs
pub trait Policy {
    const START: Start;
    const FINISH: Finish;
    const FAULTS: Faults = Faults::Propagate;
}

/// Lazy start, state preserved after completion.
///
/// The general purpose configuration, and the default for [Generator](crate::Generator)
#[derive(Debug, Clone, Copy, Default)]
pub struct Deferred;

impl Policy for Deferred {
    const START: Start = Start::Lazy;
    const FINISH: Finish = Finish::Preserve;
}

/// Eager start, state preserved after completion.
///
/// The first value is readable straight after creation
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Policy for Immediate {
    const START: Start = Start::Eager;
    const FINISH: Finish = Finish::Preserve;
}

/// Eager start, state disposed on completion.
///
/// Suits fire and forget bodies that have nothing to return
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl Policy for Detached {
    const START: Start = Start::Eager;
    const FINISH: Finish = Finish::Dispose;
}

/// Same as `P`, but body failures are logged and swallowed
///
/// This hides bugs, so it is strictly opt-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Suppressed<P>(PhantomData<P>);

impl<P: Policy> Policy for Suppressed<P> {
    const START: Start = P::START;
    const FINISH: Finish = P::FINISH;
    const FAULTS: Faults = Faults::Suppress;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_configurations() {
        assert_eq!(Deferred::START, Start::Lazy);
        assert_eq!(Deferred::FINISH, Finish::Preserve);
        assert_eq!(Immediate::START, Start::Eager);
        assert_eq!(Immediate::FINISH, Finish::Preserve);
        assert_eq!(Detached::START, Start::Eager);
        assert_eq!(Detached::FINISH, Finish::Dispose);
    }

    #[test]
    fn failures_propagate_unless_suppressed() {
        assert_eq!(Deferred::FAULTS, Faults::Propagate);
        assert_eq!(Detached::FAULTS, Faults::Propagate);
        assert_eq!(<Suppressed<Detached>>::FAULTS, Faults::Suppress);
        assert_eq!(<Suppressed<Detached>>::START, Start::Eager);
        assert_eq!(<Suppressed<Deferred>>::FINISH, Finish::Preserve);
    }
}
