use do_notation::m;
use resumable::executor::run_to_completion;
use resumable::*;
use tracing_subscriber::EnvFilter;

/// Prints every number it reaches, forever. Run only for its side effects
fn ticker<'a>() -> Sequence<'a, (), (), ()> {
    fn from<'a>(i: usize) -> Sequence<'a, (), (), ()> {
        println!("coroutine: {}", i);
        m! {
            yield_value(());
            defer(move || from(i + 1))
        }
    }
    defer(|| from(0))
}

/// Yields 0..max, then says why it stopped
fn counter<'a>(max: usize) -> Sequence<'a, usize, String, ()> {
    from_iter(0..max).and_then(|()| {
        println!("coroutine: ending");
        result("maximum value reached".to_string())
    })
}

/// A hand written state machine, the same counter without a final message
enum Template {
    Next { i: usize, max: usize },
    Done,
}

impl Body for Template {
    type Yield = usize;
    type Return = ();
    type Error = std::convert::Infallible;

    fn resume(&mut self) -> Step<usize, (), Self::Error> {
        match *self {
            Template::Next { i, max } if i < max => {
                println!("coroutine: generated: {}", i);
                *self = Template::Next { i: i + 1, max };
                Step::Yield(i)
            }
            _ => {
                *self = Template::Done;
                Step::Return(())
            }
        }
    }
}

/// Runs the three flavours of the same engine in turn
pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("<--- fire and forget --->");
    let mut ticks = Generator::<_, Detached>::with_policy(ticker());
    for i in 0..3 {
        println!("main: {}", i);
        if let Err(e) = ticks.resume() {
            println!("main: ticker failed: {:?}", e);
        }
    }
    ticks.dispose();

    println!("<--- eager, with a final value --->");
    let counting = Generator::<_, Immediate>::with_policy(counter(3));
    let on_value = |v: usize| println!("main: got from coroutine: {}", v);
    match run_to_completion(counting, on_value) {
        Ok(Some(message)) => println!("main: coroutine ended: {}", message),
        Ok(None) => println!("main: coroutine ended without a message"),
        Err(e) => println!("main: coroutine failed: {:?}", e),
    }

    println!("<--- generic template --->");
    let template = Generator::new(Template::Next { i: 0, max: 3 });
    let on_value = |v: usize| println!("main: got from coroutine: {}", v);
    if let Err(e) = run_to_completion(template, on_value) {
        println!("main: template failed: {}", e);
    }
}
