//! Use a generator as an iterator
//!
//! A generator is an iterator of results. [values] gives an iterator of
//! plain values instead, keeping the failure or final value for [Values::finish].
use crate::*;

impl<B: Body, P: Policy> Iterator for Generator<B, P> {
    type Item = Result<B::Yield, GeneratorError<B::Error>>;

    /// Yields values until the body finishes. A failure is yielded once,
    /// after that the iterator is exhausted
    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(true) => Some(self.next_value()),
            Ok(false) => None,
            Err(error) => Some(Err(error)),
        }
    }
}

impl<B: Body, P: Policy> std::iter::FusedIterator for Generator<B, P> {}

/// Plain values out of a generator, see [values]
pub struct Values<B: Body, P: Policy> {
    generator: Generator<B, P>,
    error: Option<GeneratorError<B::Error>>,
}

impl<B: Body, P: Policy> Iterator for Values<B, P> {
    type Item = B::Yield;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() {
            return None;
        }
        match self.generator.next() {
            Some(Ok(value)) => Some(value),
            Some(Err(error)) => {
                self.error = Some(error);
                None
            }
            None => None,
        }
    }
}

impl<B: Body, P: Policy> Values<B, P> {
    /// Stops iterating, and reports how the body ended
    ///
    /// Gives the failure that stopped iteration, or else the final value.
    /// The final value is None if the body has not finished yet, or the
    /// policy discarded it.
    pub fn finish(mut self) -> Result<Option<B::Return>, GeneratorError<B::Error>> {
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(self.generator.take_return_value().ok()),
        }
    }

    /// The generator, to continue driving it by hand
    pub fn into_inner(self) -> Generator<B, P> {
        self.generator
    }
}

/// Iterate the plain values of a generator
/// ```
/// use resumable::*;
/// use resumable::iterator::values;
///
/// let body = map(from_iter::<_, ()>(1..=3), |()| "three");
/// let mut it = values(Generator::new(body));
/// let sum: i32 = it.by_ref().sum();
///
/// assert_eq!(sum, 6);
/// assert_eq!(it.finish(), Ok(Some("three")));
/// ```
pub fn values<B: Body, P: Policy>(generator: Generator<B, P>) -> Values<B, P> {
    Values {
        generator,
        error: None,
    }
}
