//! Sample drivers that pull a generator in a loop
//!
//! It's not necessary to use these, as [Generator::advance] and
//! [Generator::next_value] are all you need if rolling your own,
//! but they're a good reference, and fairly generally useable

use std::fmt::Debug;

use tracing::trace;

use crate::*;

/// How far [run_for] got before handing control back
pub enum DriveResult<B: Body, P: Policy> {
    /// The body has finished
    Completed {
        /// The final value, None if the policy discarded it
        result: Option<B::Return>,
        /// Values handed to the callback
        consumed: usize,
    },
    /// The limit was reached before the body finished
    Paused {
        /// The generator, to resume or dispose later
        generator: Generator<B, P>,
        /// Values handed to the callback
        consumed: usize,
    },
}

impl<B: Body, P: Policy> Debug for DriveResult<B, P>
where
    B::Return: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed { result, consumed } => f
                .debug_struct("Completed")
                .field("result", result)
                .field("consumed", consumed)
                .finish(),
            Self::Paused {
                generator,
                consumed,
            } => f
                .debug_struct("Paused")
                .field("status", &generator.status())
                .field("consumed", consumed)
                .finish(),
        }
    }
}

/// Pulls at most `limit` values, handing each to `on_value`
///
/// Returns whenever the body finishes or the limit is reached. Reaching the
/// limit does not resume the body any further, so a body that yields exactly
/// `limit` values is reported as paused.
/// ```
/// use resumable::*;
/// use resumable::executor::*;
///
/// let naturals = Generator::new(from_iter::<_, ()>(0..));
/// let mut seen = vec![];
///
/// let exec = run_for(naturals, 3, |n| seen.push(n)).unwrap();
///
/// assert!(matches!(exec, DriveResult::Paused { consumed: 3, .. }));
/// assert_eq!(seen, vec![0, 1, 2]);
/// ```
pub fn run_for<B, P, F>(
    mut generator: Generator<B, P>,
    limit: usize,
    mut on_value: F,
) -> Result<DriveResult<B, P>, GeneratorError<B::Error>>
where
    B: Body,
    P: Policy,
    F: FnMut(B::Yield),
{
    let mut consumed = 0;
    while consumed < limit {
        if !generator.advance()? {
            trace!(consumed, "generator finished within limit");
            let result = generator.take_return_value().ok();
            return Ok(DriveResult::Completed { result, consumed });
        }
        on_value(generator.next_value()?);
        consumed += 1;
    }
    Ok(DriveResult::Paused {
        generator,
        consumed,
    })
}

/// Pulls every value, then returns the final value
///
/// The final value is None when the policy discards it on completion.
/// This never returns for a body that never finishes.
/// ```
/// use resumable::*;
/// use resumable::executor::*;
///
/// let body = map(from_iter::<_, ()>(vec![1, 2]), |()| "done");
/// let mut outputs = vec![];
///
/// let result = run_to_completion(Generator::new(body), |o| outputs.push(o));
///
/// assert_eq!(result, Ok(Some("done")));
/// assert_eq!(outputs, vec![1, 2]);
/// ```
pub fn run_to_completion<B, P, F>(
    mut generator: Generator<B, P>,
    mut on_value: F,
) -> Result<Option<B::Return>, GeneratorError<B::Error>>
where
    B: Body,
    P: Policy,
    F: FnMut(B::Yield),
{
    while generator.advance()? {
        on_value(generator.next_value()?);
    }
    Ok(generator.take_return_value().ok())
}

/// Collects every value and the final value
pub fn collect<B, P>(
    generator: Generator<B, P>,
) -> Result<(Vec<B::Yield>, Option<B::Return>), GeneratorError<B::Error>>
where
    B: Body,
    P: Policy,
{
    let mut outputs = vec![];
    let result = run_to_completion(generator, |o| outputs.push(o))?;
    Ok((outputs, result))
}
