use crate::{Body, Step};

/// A generator body described as data
///
/// A sequence yields values (outputs), may fail, and ends with a final
/// result. Nothing runs on its own; a [Generator](crate::Generator), or
/// [run_step], steps through it.
///
/// This is useful when a body is easier to compose out of smaller pieces
/// than to write as a hand-rolled state machine.
///
/// This is represented as a monad <https://en.wikipedia.org/wiki/Monad_(functional_programming)>
pub struct Sequence<'a, Yield, Return, Error> {
    state: SequenceState<'a, Yield, Return, Error>,
}

/// The internal state of the sequence
enum SequenceState<'a, Yield: 'a, Return: 'a, Error: 'a> {
    /// Waiting to be forced, the rest of the body is built on demand
    Defer(Box<dyn FnOnce() -> Sequence<'a, Yield, Return, Error> + 'a>),
    /// Paused on a value, waiting for it to be consumed
    Yield(Yield, Box<Sequence<'a, Yield, Return, Error>>),
    /// The sequence is completed
    Done(Return),
    /// The sequence failed
    Fail(Error),
    /// Moved out while being stepped as a [Body]
    Spent,
}

/// Return/unit. Creates a sequence that finishes with the supplied value
///
/// This lifts the value into the sequence 'world'
/// ```
/// use resumable::*;
/// let seq: Sequence<(), i32, ()> = result(1);
/// ```
pub fn result<'a, Y, R, E>(r: R) -> Sequence<'a, Y, R, E> {
    let state = SequenceState::Done(r);
    Sequence { state }
}

/// Yields a value to whoever drives the sequence
///
/// This pauses until the value is consumed
/// ```
/// use resumable::*;
/// let seq: Sequence<&str, (), ()> = yield_value("hello");
/// ```
pub fn yield_value<'a, Y, E>(y: Y) -> Sequence<'a, Y, (), E> {
    let state = SequenceState::Yield(y, Box::new(result(())));
    Sequence { state }
}

/// Fails the sequence, further binds will short-circuit
/// ```
/// use resumable::*;
/// let seq: Sequence<u8, (), &str> = fail("no more input");
/// ```
pub fn fail<'a, Y, R, E>(e: E) -> Sequence<'a, Y, R, E> {
    let state = SequenceState::Fail(e);
    Sequence { state }
}

/// Postpone building the rest of the sequence until it is stepped
///
/// Any code in f runs only when the sequence is resumed. Use this to make a
/// whole body lazy, or to write sequences that refer to themselves.
///
/// Recursing through `defer` in the continuation of a [bind], as below,
/// keeps every step shallow however long the sequence runs.
/// ```
/// use resumable::*;
///
/// // an infinite counter
/// fn count<'a>(from: u64) -> Sequence<'a, u64, (), ()> {
///     bind(yield_value(from), move |()| defer(move || count(from + 1)))
/// }
/// let mut gen = Generator::new(count(0));
/// assert_eq!(gen.next_value(), Ok(0));
/// assert_eq!(gen.next_value(), Ok(1));
/// ```
pub fn defer<'a, Y, R, E, F>(f: F) -> Sequence<'a, Y, R, E>
where
    F: FnOnce() -> Sequence<'a, Y, R, E> + 'a,
{
    let closure = Box::new(f);
    let state = SequenceState::Defer(closure);
    Sequence { state }
}

/// Chain sequences together.
///
/// This allows the result from one sequence to flow into the next one.
/// The next sequence yields the same values, but can change its result.
/// This is equivalent to and_then for Option.
///
/// Binding never runs a deferred part of m, and the continuation f only
/// runs once m is finished and the combined sequence is stepped.
///
/// Stepping walks down to the innermost left operand, so a chain nested on
/// the left, `bind(bind(bind(m, f), g), h)`, costs stack in proportion to its
/// depth. Build long sequences nested on the right instead, as
/// [from_iter] does, or recurse through [defer].
/// ```
/// use resumable::*;
/// // yields two values and returns their sum
/// let seq: Sequence<i32, i32, ()> =
///     bind(yield_value(1), |()| bind(yield_value(2), |()| result(3)));
/// ```
pub fn bind<'a, Y, E, A, B, F>(m: Sequence<'a, Y, A, E>, f: F) -> Sequence<'a, Y, B, E>
where
    F: FnOnce(A) -> Sequence<'a, Y, B, E> + 'a,
    Y: 'a,
    E: 'a,
    A: 'a,
    B: 'a,
{
    match m.state {
        SequenceState::Done(ra) => f(ra),
        SequenceState::Fail(e) => fail(e),
        SequenceState::Yield(output, ra) => {
            let next = defer(move || bind(*ra, f));
            let state = SequenceState::Yield(output, Box::new(next));
            Sequence { state }
        }
        SequenceState::Defer(mf) => defer(move || bind(mf(), f)),
        SequenceState::Spent => unreachable!("a spent sequence is never bound"),
    }
}

/// A step wise evaluation of the sequence
///
/// In the case of output, a tuple of the output and the remaining sequence
/// is returned.
///
/// If the sequence is finished, it will be in the done case, so the return
/// value can be extracted
pub enum StepResult<'a, Yield, Return, Error> {
    /// The final value
    Done(Return),
    /// We have output to give to the driver
    Yield {
        /// The current output being provided
        output: Yield,
        /// The remaining sequence to process
        next: Box<Sequence<'a, Yield, Return, Error>>,
    },
    /// The sequence failed
    Failed(Error),
}

/// Runs a single step in the sequence.
///
/// Deferred parts are forced until a value, the result, or a failure shows up.
/// ```
/// use resumable::*;
/// let seq: Sequence<i32, (), ()> = yield_value(1);
/// let sr = run_step(seq);
/// assert!(matches!(sr, StepResult::Yield { output: 1, .. }));
/// ```
pub fn run_step<'a, Y, R, E>(sequence: Sequence<'a, Y, R, E>) -> StepResult<'a, Y, R, E> {
    let mut state = sequence.state;
    loop {
        match state {
            SequenceState::Defer(f) => state = f().state,
            SequenceState::Done(result) => return StepResult::Done(result),
            SequenceState::Fail(error) => return StepResult::Failed(error),
            SequenceState::Yield(output, next) => return StepResult::Yield { output, next },
            SequenceState::Spent => unreachable!("a spent sequence is never stepped"),
        }
    }
}

impl<'a, Y, R, E> Body for Sequence<'a, Y, R, E> {
    type Yield = Y;
    type Return = R;
    type Error = E;

    fn resume(&mut self) -> Step<Y, R, E> {
        let spent = Sequence {
            state: SequenceState::Spent,
        };
        let current = std::mem::replace(self, spent);
        match run_step(current) {
            StepResult::Done(r) => Step::Return(r),
            StepResult::Failed(e) => Step::Fail(e),
            StepResult::Yield { output, next } => {
                *self = *next;
                Step::Yield(output)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    type Seq<Y, R> = Sequence<'static, Y, R, &'static str>;

    #[test]
    fn done_steps_to_result() {
        let seq: Seq<(), i32> = result(1);
        assert!(matches!(run_step(seq), StepResult::Done(1)));
    }

    #[test]
    fn failure_short_circuits_bind() {
        let seq: Seq<i32, i32> = bind(fail("nope"), |()| result(1));
        assert!(matches!(run_step(seq), StepResult::Failed("nope")));
    }

    #[test]
    fn yields_in_order() {
        let seq: Seq<i32, ()> = bind(yield_value(1), |()| yield_value(2));

        let next = match run_step(seq) {
            StepResult::Yield { output: 1, next } => next,
            _ => panic!("expected the first yield"),
        };
        let next = match run_step(*next) {
            StepResult::Yield { output: 2, next } => next,
            _ => panic!("expected the second yield"),
        };
        assert!(matches!(run_step(*next), StepResult::Done(())));
    }

    #[test]
    fn defer_runs_nothing_until_stepped() {
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        let seq: Seq<i32, ()> = defer(move || {
            flag.set(true);
            yield_value(1)
        });
        let seq = bind(seq, |()| result(()));

        assert!(!ran.get());
        assert!(matches!(run_step(seq), StepResult::Yield { output: 1, .. }));
        assert!(ran.get());
    }

    #[test]
    fn continuation_waits_for_the_yield_to_be_consumed() {
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        let seq: Seq<i32, ()> = bind(yield_value(1), move |()| {
            flag.set(true);
            result(())
        });

        let next = match run_step(seq) {
            StepResult::Yield { next, .. } => next,
            _ => panic!("expected a yield"),
        };
        assert!(!ran.get());
        assert!(matches!(run_step(*next), StepResult::Done(())));
        assert!(ran.get());
    }

    #[test]
    fn stepped_as_a_body() {
        let mut seq: Seq<i32, &str> = bind(yield_value(4), |()| result("end"));

        assert_eq!(seq.resume(), Step::Yield(4));
        assert_eq!(seq.resume(), Step::Return("end"));
    }

    #[test]
    fn deferred_recursion_stays_shallow() {
        fn count(from: u32) -> Seq<u32, ()> {
            bind(yield_value(from), move |()| defer(move || count(from + 1)))
        }

        let mut seq = count(0);
        for expected in 0..100_000 {
            assert_eq!(seq.resume(), Step::Yield(expected));
        }
    }
}
