use std::cell::Cell;
use std::rc::Rc;

use resumable::executor::{run_for, DriveResult};
use resumable::*;

/// Counts up from zero, recording every entry into the body
///
/// `fail_at` makes the body fail instead of yielding that value.
/// Without `max` it never finishes.
struct Counter {
    point: ResumePoint,
    max: Option<usize>,
    fail_at: Option<usize>,
    entries: Rc<Cell<usize>>,
    _locals: DropFlag,
}

enum ResumePoint {
    Start,
    AfterYield { i: usize },
    Finished,
}

#[derive(Debug, PartialEq)]
struct Broken(usize);

impl Body for Counter {
    type Yield = usize;
    type Return = &'static str;
    type Error = Broken;

    fn resume(&mut self) -> Step<usize, &'static str, Broken> {
        self.entries.set(self.entries.get() + 1);
        let i = match self.point {
            ResumePoint::Start => 0,
            ResumePoint::AfterYield { i } => i + 1,
            ResumePoint::Finished => unreachable!("resumed after finishing"),
        };
        if Some(i) == self.fail_at {
            self.point = ResumePoint::Finished;
            return Step::Fail(Broken(i));
        }
        match self.max {
            Some(max) if i >= max => {
                self.point = ResumePoint::Finished;
                Step::Return("maximum value reached")
            }
            _ => {
                self.point = ResumePoint::AfterYield { i };
                Step::Yield(i)
            }
        }
    }
}

/// Set when the body's locals are dropped
struct DropFlag(Rc<Cell<bool>>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

/// Handles kept by the test while the body is owned by the generator
struct Tracker {
    entries: Rc<Cell<usize>>,
    dropped: Rc<Cell<bool>>,
}

fn counter(max: Option<usize>, fail_at: Option<usize>) -> (Counter, Tracker) {
    let entries = Rc::new(Cell::new(0));
    let dropped = Rc::new(Cell::new(false));
    let body = Counter {
        point: ResumePoint::Start,
        max,
        fail_at,
        entries: entries.clone(),
        _locals: DropFlag(dropped.clone()),
    };
    (body, Tracker { entries, dropped })
}

#[test]
fn lazy_start_runs_no_body_code() {
    let (body, tracker) = counter(Some(3), None);
    let mut gen = Generator::new(body);

    assert_eq!(tracker.entries.get(), 0);
    assert_eq!(gen.status(), Status::Created);

    assert_eq!(gen.advance(), Ok(true));
    assert_eq!(tracker.entries.get(), 1);
}

#[test]
fn eager_start_runs_to_first_yield() {
    let (body, tracker) = counter(Some(3), None);
    let gen = Generator::<_, Immediate>::with_policy(body);

    assert_eq!(tracker.entries.get(), 1);
    assert_eq!(gen.yielded(), Some(&0));
}

#[test]
fn every_value_observed_in_order() {
    for n in [0, 1, 5] {
        let (body, _tracker) = counter(Some(n), None);
        let mut gen = Generator::new(body);

        for expected in 0..n {
            assert!(!gen.is_exhausted());
            assert_eq!(gen.next_value(), Ok(expected));
        }
        // the Nth value was taken, but nothing resumed past it yet
        assert!(!gen.is_exhausted());
        assert_eq!(gen.advance(), Ok(false));
        assert!(gen.is_exhausted());
    }
}

#[test]
fn repeated_checks_never_skip_a_value() {
    let (body, tracker) = counter(Some(3), None);
    let mut gen = Generator::new(body);

    assert_eq!(gen.advance(), Ok(true));
    assert_eq!(gen.advance(), Ok(true));
    assert_eq!(gen.peek(), Ok(&0));
    assert_eq!(gen.peek(), Ok(&0));
    assert_eq!(tracker.entries.get(), 1);

    assert_eq!(gen.next_value(), Ok(0));
    assert_eq!(gen.next_value(), Ok(1));
    assert_eq!(gen.next_value(), Ok(2));
}

#[test]
fn failure_surfaces_after_good_values() {
    let (body, _tracker) = counter(None, Some(2));
    let mut gen = Generator::new(body);

    assert_eq!(gen.next_value(), Ok(0));
    assert_eq!(gen.next_value(), Ok(1));
    assert_eq!(gen.next_value(), Err(GeneratorError::Body(Broken(2))));
    assert!(gen.is_exhausted());
    assert_eq!(gen.advance(), Ok(false));
}

#[test]
fn bounded_counter_returns_final_message() {
    let (body, tracker) = counter(Some(3), None);
    let mut gen = Generator::new(body);

    let mut seen = vec![];
    while gen.advance().unwrap() {
        seen.push(gen.next_value().unwrap());
    }

    assert_eq!(seen, vec![0, 1, 2]);
    assert_eq!(gen.return_value(), Ok(&"maximum value reached"));
    // locals go as soon as the body ends
    assert!(tracker.dropped.get());

    gen.dispose();
}

#[test]
fn infinite_counter_disposed_mid_body() {
    let (body, tracker) = counter(None, None);
    let mut gen = Generator::<_, Detached>::with_policy(body);

    for _ in 0..3 {
        assert_eq!(gen.resume(), Ok(Resumed::Suspended));
    }

    assert_eq!(tracker.entries.get(), 4);
    assert!(!gen.is_exhausted());
    assert_eq!(gen.status(), Status::Suspended);
    assert!(!tracker.dropped.get());

    gen.dispose();
    assert!(tracker.dropped.get());
}

#[test]
fn driver_pulls_three_then_stops() {
    let (body, tracker) = counter(None, None);
    let mut seen = vec![];

    let exec = run_for(Generator::new(body), 3, |v| seen.push(v)).unwrap();

    assert_eq!(seen, vec![0, 1, 2]);
    assert!(matches!(exec, DriveResult::Paused { consumed: 3, .. }));
    drop(exec);
    assert!(tracker.dropped.get());
}

#[test]
fn early_return_releases_state() {
    fn first_even(gen: &mut Generator<Counter>) -> Result<usize, GeneratorError<Broken>> {
        loop {
            let value = gen.next_value()?;
            if value % 2 == 0 && value > 0 {
                return Ok(value);
            }
        }
    }

    fn drive(body: Counter) -> Result<usize, GeneratorError<Broken>> {
        let mut gen = Generator::new(body);
        let found = first_even(&mut gen)?;
        Ok(found)
    }

    let (body, tracker) = counter(None, None);
    assert_eq!(drive(body), Ok(2));
    assert!(tracker.dropped.get());

    let (body, tracker) = counter(None, Some(1));
    assert_eq!(drive(body), Err(GeneratorError::Body(Broken(1))));
    assert!(tracker.dropped.get());
}

#[test]
fn panicking_driver_releases_state() {
    let (body, tracker) = counter(None, None);
    let dropped = tracker.dropped.clone();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let mut gen = Generator::new(body);
        let _ = gen.next_value();
        panic!("driver gave up");
    }));

    assert!(outcome.is_err());
    assert!(dropped.get());
}
