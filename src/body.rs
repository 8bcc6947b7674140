/// The outcome of running a body from one resume point to the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<Yield, Return, Error> {
    /// A suspension point was reached, producing an intermediate value
    Yield(Yield),
    /// The body finished with its terminal value.
    /// Plain completion is `Return(())`
    Return(Return),
    /// The body failed
    Fail(Error),
}

/// The logic of a generator, written as an explicit state machine
///
/// The implementing type owns the locals of the invocation, and
/// remembers where to continue (usually as an enum of resume points).
/// Each call to resume runs until the next suspension point or until the end.
///
/// resume is never called again once it returned [Step::Return] or [Step::Fail],
/// the [ExecutionState](crate::ExecutionState) guards this.
///
/// ```
/// use resumable::*;
///
/// enum Countdown {
///     Running { left: u32 },
///     Finished,
/// }
///
/// impl Body for Countdown {
///     type Yield = u32;
///     type Return = &'static str;
///     type Error = std::convert::Infallible;
///
///     fn resume(&mut self) -> Step<u32, &'static str, Self::Error> {
///         match *self {
///             Countdown::Running { left: 0 } => {
///                 *self = Countdown::Finished;
///                 Step::Return("liftoff")
///             }
///             Countdown::Running { left } => {
///                 *self = Countdown::Running { left: left - 1 };
///                 Step::Yield(left)
///             }
///             Countdown::Finished => unreachable!(),
///         }
///     }
/// }
///
/// let mut gen = Generator::new(Countdown::Running { left: 2 });
/// assert_eq!(gen.next_value(), Ok(2));
/// assert_eq!(gen.next_value(), Ok(1));
/// assert_eq!(gen.advance(), Ok(false));
/// assert_eq!(gen.return_value(), Ok(&"liftoff"));
/// ```
pub trait Body {
    /// Intermediate values handed out at suspension points
    type Yield;
    /// The terminal value
    type Return;
    /// Failures raised by the body
    type Error;

    /// Continue from the current resume point
    fn resume(&mut self) -> Step<Self::Yield, Self::Return, Self::Error>;
}

impl<B: Body + ?Sized> Body for Box<B> {
    type Yield = B::Yield;
    type Return = B::Return;
    type Error = B::Error;

    fn resume(&mut self) -> Step<Self::Yield, Self::Return, Self::Error> {
        (**self).resume()
    }
}

/// A body driven by a closure, see [from_fn]
pub struct FromFn<F> {
    f: F,
}

impl<F, Y, R, E> Body for FromFn<F>
where
    F: FnMut() -> Step<Y, R, E>,
{
    type Yield = Y;
    type Return = R;
    type Error = E;

    fn resume(&mut self) -> Step<Y, R, E> {
        (self.f)()
    }
}

/// Turns a closure into a body
///
/// The closure's captures act as the locals. Handy for small machines
/// where a dedicated type would be noise.
/// ```
/// use resumable::*;
///
/// let mut i = 0;
/// let body = from_fn(move || {
///     i += 1;
///     if i <= 2 { Step::Yield(i) } else { Step::<_, (), ()>::Return(()) }
/// });
/// let mut gen = Generator::new(body);
/// assert_eq!(gen.next_value(), Ok(1));
/// assert_eq!(gen.next_value(), Ok(2));
/// assert!(!gen.advance().unwrap());
/// ```
pub fn from_fn<F, Y, R, E>(f: F) -> FromFn<F>
where
    F: FnMut() -> Step<Y, R, E>,
{
    FromFn { f }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_bodies_forward() {
        let mut calls = 0;
        let mut body: Box<dyn Body<Yield = u8, Return = (), Error = ()>> =
            Box::new(from_fn(move || {
                calls += 1;
                if calls == 1 {
                    Step::Yield(7)
                } else {
                    Step::Return(())
                }
            }));

        assert_eq!(body.resume(), Step::Yield(7));
        assert_eq!(body.resume(), Step::Return(()));
    }
}
