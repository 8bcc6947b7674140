//! Compatibility with do-notation
//!
//! As rust currently lacks the ability to define a generic 'bind'
//! operation, thus provides syntactic sugar.
//! It's not necessary to use the library, but does help with callback hell
//!```
//! use resumable::*;
//! use ::do_notation::m;
//!
//! // The body in do-notation
//! let body: Sequence<String, usize, ()> =
//!        m! {
//!            yield_value("first".to_string());
//!            count <- result(2);
//!            let second = format!("second of {}", count);
//!            yield_value(second);
//!            result(count)
//!        };
//!
//! // Execute
//! let mut outputs = vec![];
//! let mut gen = Generator::new(body);
//! while gen.advance().unwrap() {
//!     outputs.push(gen.next_value().unwrap());
//! }
//!
//! // Verify
//! assert_eq!(outputs, vec!["first", "second of 2"]);
//! assert_eq!(gen.return_value(), Ok(&2));
//!```
use crate::*;

impl<'a, Y, R, E> do_notation::Lift<R> for Sequence<'a, Y, R, E> {
    /// Creates a finished sequence from a value
    ///
    /// see [result](function@result)
    fn lift(a: R) -> Self {
        result(a)
    }
}

impl<'a, Y: 'a, R: 'a, E: 'a> Sequence<'a, Y, R, E> {
    /// Chains sequences
    ///
    /// see [bind](function@bind)
    pub fn and_then<F: 'a, B: 'a>(self, f: F) -> Sequence<'a, Y, B, E>
    where
        F: FnOnce(R) -> Sequence<'a, Y, B, E>,
    {
        bind(self, f)
    }
}
