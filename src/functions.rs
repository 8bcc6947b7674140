//! This module contains functions that provide easier
//! to use workflows for sequences.
//! This can be implemented outside the crate, but are here for convenience.

use super::*;

/// Map the result of the sequence
///
/// This is sugar of bind and result
/// ```
/// use resumable::*;
/// let seq: Sequence<u8, String, ()> = map(result(4), |a: i32| a.to_string());
/// ```
pub fn map<'a, Y, E, A, B, F>(seq: Sequence<'a, Y, A, E>, map: F) -> Sequence<'a, Y, B, E>
where
    F: FnOnce(A) -> B + 'a,
    Y: 'a,
    E: 'a,
    A: 'a,
    B: 'a,
{
    bind(seq, move |a| result(map(a)))
}

/// Yields every item of the iterator, in order
///
/// Items are pulled from the iterator only as the sequence is stepped,
/// so infinite iterators are fine.
/// ```
/// use resumable::*;
/// let mut gen = Generator::new(from_iter::<_, ()>(1..));
/// assert_eq!(gen.next_value(), Ok(1));
/// assert_eq!(gen.next_value(), Ok(2));
/// ```
pub fn from_iter<'a, I, E>(items: I) -> Sequence<'a, I::Item, (), E>
where
    I: IntoIterator,
    I::IntoIter: 'a,
    I::Item: 'a,
    E: 'a,
{
    fn go<'a, It, E>(mut items: It) -> Sequence<'a, It::Item, (), E>
    where
        It: Iterator + 'a,
        It::Item: 'a,
        E: 'a,
    {
        match items.next() {
            Some(item) => bind(yield_value(item), move |()| go(items)),
            None => result(()),
        }
    }
    let items = items.into_iter();
    defer(move || go(items))
}

/// Runs two sequences one after the other
///
/// This will run first until it completes, then second afterwards
/// until it completes
/// Returns both results tupled together
pub fn tuple<'a, Y, E, R1, R2>(
    first: Sequence<'a, Y, R1, E>,
    second: Sequence<'a, Y, R2, E>,
) -> Sequence<'a, Y, (R1, R2), E>
where
    Y: 'a,
    E: 'a,
    R1: 'a,
    R2: 'a,
{
    bind(first, move |a| map(second, move |b| (a, b)))
}

/// Runs a sequence before the second sequence
///
/// Result of the first sequence is ignored, second is returned
/// if you need both results, use tuple
pub fn right<'a, Y, E, A, B>(
    left: Sequence<'a, Y, A, E>,
    right: Sequence<'a, Y, B, E>,
) -> Sequence<'a, Y, B, E>
where
    Y: 'a,
    E: 'a,
    A: 'a,
    B: 'a,
{
    map(tuple(left, right), |(_, b)| b)
}

/// Runs a sequence before the second sequence
///
/// Result of the first sequence is returned, second is ignored
/// if you need both results, use tuple
pub fn left<'a, Y, E, A, B>(
    left: Sequence<'a, Y, A, E>,
    right: Sequence<'a, Y, B, E>,
) -> Sequence<'a, Y, A, E>
where
    Y: 'a,
    E: 'a,
    A: 'a,
    B: 'a,
{
    map(tuple(left, right), |(a, _)| a)
}

/// Converts the result to the unit type
///
/// Useful when you only care about what the sequence yields
pub fn void<'a, Y, E, A>(seq: Sequence<'a, Y, A, E>) -> Sequence<'a, Y, (), E>
where
    Y: 'a,
    E: 'a,
    A: 'a,
{
    map(seq, |_| ())
}
