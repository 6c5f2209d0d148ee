//! The expectation engine.
//!
//! Every public entry point here is `#[track_caller]`: the location of the
//! user's call is taken once, at the boundary, and handed to the trace
//! capturer together with the `skip` count of the [`It`] wrapper. Failures are
//! only ever reported through the [`Reporter`]; nothing here panics on its own.

use std::error::Error;
use std::fmt;
use std::panic::Location;

use crate::config::Config;
use crate::error::ExpectError;
use crate::format::ValueFormatter;
use crate::matcher::invoke;
use crate::reporter::Reporter;
use crate::trace::{tabulate, StackTrace};
use crate::value::Value;

const USAGE: &str = "expect() requires 3rd argument to be a matcher func";

/// One run of a matcher against a value.
#[derive(Debug, Clone)]
pub struct Expectation {
    pub actual: Value,
    pub matcher: Value,
    pub args: Vec<Value>,
}

impl Expectation {
    pub fn new<A, M, I>(actual: A, matcher: M, args: I) -> Self
    where
        A: Into<Value>,
        M: Into<Value>,
        I: IntoIterator<Item = Value>,
    {
        Self {
            actual: actual.into(),
            matcher: matcher.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Runs the matcher, returning what went wrong, if anything.
    ///
    /// The matcher formats its message with `formatter`.
    pub fn check(&self, formatter: ValueFormatter) -> Option<Failure> {
        match formatter.scope(|| invoke(&self.matcher, &self.actual, &self.args)) {
            Err(ExpectError::NotAMatcher { got }) => Some(Failure::Misused {
                got: formatter.format(&got),
            }),
            Ok(result) if result.passed => None,
            Ok(result) => Some(Failure::Unmet {
                actual: formatter.format(&self.actual),
                message: result.message,
            }),
        }
    }

    /// Checks the expectation and reports a failure to `reporter`.
    #[track_caller]
    pub fn run<R: Reporter + ?Sized>(&self, reporter: &mut R, config: &Config) {
        if let Some(failure) = self.check(config.formatter()) {
            report(reporter, &failure, Location::caller(), 0);
        }
    }
}

/// A failure, with every value in it already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The matcher position held something that is not a matcher.
    Misused { got: String },
    /// The matcher ran and did not pass.
    Unmet { actual: String, message: String },
    /// An unconditional [`fail`].
    Explicit { message: String },
    /// [`must`] got an error.
    Must { error: String },
}

impl Failure {
    /// The diagnostic logged for this failure, ending with `trace`.
    pub fn render(&self, trace: &StackTrace) -> String {
        let trace = trace.to_string();
        match self {
            Failure::Misused { got } => format!(
                "{USAGE}\n       got: {got}\n\n{}",
                tabulate("Stacktrace: ", &trace, "\n")
            ),
            Failure::Unmet { actual, message } => format!(
                "expected {actual} {message}\n{}",
                tabulate(" stacktrace: ", &trace, "\n")
            ),
            Failure::Explicit { message } => format!(
                "Fail {message}:\n{}",
                tabulate(" stacktrace: ", &trace, "\n")
            ),
            Failure::Must { error } => format!(
                "Must failed: got {error}\n{}",
                tabulate(" stacktrace: ", &trace, "\n")
            ),
        }
    }
}

fn report<R: Reporter + ?Sized>(
    reporter: &mut R,
    failure: &Failure,
    caller: &Location<'_>,
    skip: usize,
) {
    let trace = StackTrace::capture_at(caller, skip);
    reporter.logf(format_args!("{}", failure.render(&trace)));
    reporter.fail_now();
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

/// Runs `matcher(actual, args...)` and fails `reporter` unless it passes.
///
/// Values are formatted with the process-wide [`Config`].
///
/// ```rust
/// use expectations::{args, expect, matchers::to_be_length_of, PanicReporter};
///
/// let mut t = PanicReporter::new();
/// expect(&mut t, "abc", to_be_length_of(), args![3]);
/// ```
#[track_caller]
pub fn expect<R, A, M, I>(reporter: &mut R, actual: A, matcher: M, args: I)
where
    R: Reporter + ?Sized,
    A: Into<Value>,
    M: Into<Value>,
    I: IntoIterator<Item = Value>,
{
    expect_with(reporter, Config::global(), actual, matcher, args);
}

/// [`expect`] with an explicit configuration.
#[track_caller]
pub fn expect_with<R, A, M, I>(reporter: &mut R, config: &Config, actual: A, matcher: M, args: I)
where
    R: Reporter + ?Sized,
    A: Into<Value>,
    M: Into<Value>,
    I: IntoIterator<Item = Value>,
{
    Expectation::new(actual, matcher, args).run(reporter, config);
}

/// Fails `reporter` unconditionally.
#[track_caller]
pub fn fail<R: Reporter + ?Sized>(reporter: &mut R, message: impl fmt::Display) {
    let failure = Failure::Explicit {
        message: message.to_string(),
    };
    report(reporter, &failure, Location::caller(), 0);
}

/// Fails `reporter` when `error` is present.
#[track_caller]
pub fn must<R: Reporter + ?Sized>(reporter: &mut R, error: Option<&dyn Error>) {
    if let Some(error) = error {
        let failure = Failure::Must {
            error: error.to_string(),
        };
        report(reporter, &failure, Location::caller(), 0);
    }
}

/// Unwraps `result`, failing `reporter` like [`must`] on `Err`.
///
/// ```rust
/// use expectations::{must_ok, PanicReporter};
///
/// let mut t = PanicReporter::new();
/// let n = must_ok(&mut t, "42".parse::<i32>());
/// assert_eq!(n, Some(42));
/// ```
#[track_caller]
pub fn must_ok<R, T, E>(reporter: &mut R, result: Result<T, E>) -> Option<T>
where
    R: Reporter + ?Sized,
    E: fmt::Display,
{
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            let failure = Failure::Must {
                error: error.to_string(),
            };
            report(reporter, &failure, Location::caller(), 0);
            None
        }
    }
}

// ============================================================================
// IT WRAPPER
// ============================================================================

/// Binds a reporter and a configuration once.
///
/// ```rust
/// use expectations::{args, matchers::*, It, PanicReporter};
///
/// let mut t = PanicReporter::new();
/// let mut it = It::new(&mut t);
/// it.expects(2 + 2, to_equal(), args![4]);
/// it.expects(Vec::<i32>::new(), to_be_empty(), args![]);
/// ```
///
/// Helper functions that wrap `It` can hide their own frame from traces with
/// [`It::with_skip`].
pub struct It<'r, R: Reporter + ?Sized> {
    reporter: &'r mut R,
    config: Config,
    skip: usize,
}

impl<'r, R: Reporter + ?Sized> It<'r, R> {
    /// Uses the process-wide configuration.
    pub fn new(reporter: &'r mut R) -> Self {
        Self::with_config(reporter, Config::global().clone())
    }

    pub fn with_config(reporter: &'r mut R, config: Config) -> Self {
        Self {
            reporter,
            config,
            skip: 0,
        }
    }

    /// Drops `skip` caller frames from every trace, so frame 0 is the caller
    /// of a helper rather than the helper itself.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn reporter(&mut self) -> &mut R {
        &mut *self.reporter
    }

    #[track_caller]
    pub fn expects<A, M, I>(&mut self, actual: A, matcher: M, args: I)
    where
        A: Into<Value>,
        M: Into<Value>,
        I: IntoIterator<Item = Value>,
    {
        let expectation = Expectation::new(actual, matcher, args);
        if let Some(failure) = expectation.check(self.config.formatter()) {
            self.report(&failure, Location::caller());
        }
    }

    #[track_caller]
    pub fn fails(&mut self, message: impl fmt::Display) {
        let failure = Failure::Explicit {
            message: message.to_string(),
        };
        self.report(&failure, Location::caller());
    }

    #[track_caller]
    pub fn must(&mut self, error: Option<&dyn Error>) {
        if let Some(error) = error {
            let failure = Failure::Must {
                error: error.to_string(),
            };
            self.report(&failure, Location::caller());
        }
    }

    #[track_caller]
    pub fn must_ok<T, E: fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                let failure = Failure::Must {
                    error: error.to_string(),
                };
                self.report(&failure, Location::caller());
                None
            }
        }
    }

    fn report(&mut self, failure: &Failure, caller: &Location<'_>) {
        report(&mut *self.reporter, failure, caller, self.skip);
    }
}

impl<R: Reporter + ?Sized> fmt::Debug for It<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("It")
            .field("config", &self.config)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}
