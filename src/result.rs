//! This module contains functions that provide easier
//! to use workflows for failing sequences.
//! This can be implemented outside the crate, but are here for convenience.
use super::*;

/// Lifts a result into a sequence that finishes or fails straight away
///
/// Useful to bring fallible plain functions into a sequence
/// ```
/// use resumable::*;
/// let parsed: Sequence<(), i32, std::num::ParseIntError> = lift_result("12".parse());
/// ```
pub fn lift_result<'a, Y, R, E>(r: Result<R, E>) -> Sequence<'a, Y, R, E> {
    match r {
        Ok(value) => result(value),
        Err(error) => fail(error),
    }
}

/// Handle a failure with another sequence
///
/// Values yielded before the failure are kept, the recovery sequence
/// continues from there. This is or_else for sequences.
pub fn recover<'a, Y, R, E1, E2, F>(seq: Sequence<'a, Y, R, E1>, f: F) -> Sequence<'a, Y, R, E2>
where
    F: FnOnce(E1) -> Sequence<'a, Y, R, E2> + 'a,
    Y: 'a,
    R: 'a,
    E1: 'a,
    E2: 'a,
{
    defer(move || match run_step(seq) {
        StepResult::Done(value) => result(value),
        StepResult::Failed(error) => f(error),
        StepResult::Yield { output, next } => {
            let rest = recover(*next, f);
            bind(yield_value(output), move |()| rest)
        }
    })
}

/// Convert E1 into E2
///
/// Sugar over recover
pub fn map_err<'a, Y, R, E1, E2, F>(seq: Sequence<'a, Y, R, E1>, f: F) -> Sequence<'a, Y, R, E2>
where
    F: FnOnce(E1) -> E2 + 'a,
    Y: 'a,
    R: 'a,
    E1: 'a,
    E2: 'a,
{
    recover(seq, |e| fail(f(e)))
}
