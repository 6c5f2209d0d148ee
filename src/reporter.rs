//! Where failed expectations go.
//!
//! The engine only needs two things from a reporter: a place to log a
//! diagnostic and a way to stop the current test. Three sinks are provided:
//!
//! - [`WriterReporter`]: writes to any `io::Write`, then calls its failer.
//! - [`ConsoleReporter`]: writes to stdout or stderr, first line in bold red.
//! - [`PanicReporter`]: collects messages and panics with them, which is how
//!   the Rust test harness fails a test.

use std::fmt;
use std::io::{self, Write};

use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::config::{ColorMode, Config};

/// The capability an expectation reports through.
pub trait Reporter {
    /// Stops the current test unit.
    fn fail_now(&mut self);

    /// Records one formatted diagnostic message.
    fn logf(&mut self, args: fmt::Arguments<'_>);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn fail_now(&mut self) {
        (**self).fail_now();
    }

    fn logf(&mut self, args: fmt::Arguments<'_>) {
        (**self).logf(args);
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn fail_now(&mut self) {
        (**self).fail_now();
    }

    fn logf(&mut self, args: fmt::Arguments<'_>) {
        (**self).logf(args);
    }
}

/// Called by writer-backed reporters to stop the test.
pub type Failer = Box<dyn FnMut() + Send>;

/// Unwinds the current thread, which ends the running test.
pub fn default_failer() {
    panic!("expectation failed");
}

// ============================================================================
// WRITER REPORTER
// ============================================================================

/// Writes diagnostics verbatim to `W`.
///
/// ```rust
/// use expectations::{Reporter, WriterReporter};
///
/// let mut reporter = WriterReporter::new(Vec::new()).with_failer(|| {});
/// reporter.logf(format_args!("Something: {}", 1));
/// reporter.fail_now();
/// assert_eq!(reporter.into_inner(), b"Something: 1");
/// ```
pub struct WriterReporter<W: Write> {
    writer: W,
    failer: Failer,
}

impl<W: Write> WriterReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failer: Box::new(default_failer),
        }
    }

    pub fn with_failer(mut self, failer: impl FnMut() + Send + 'static) -> Self {
        self.failer = Box::new(failer);
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for WriterReporter<W> {
    fn fail_now(&mut self) {
        let _ = self.writer.flush();
        (self.failer)();
    }

    fn logf(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.writer.write_fmt(args);
    }
}

impl<W: Write> fmt::Debug for WriterReporter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterReporter").finish_non_exhaustive()
    }
}

// ============================================================================
// CONSOLE REPORTER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Writes each diagnostic on its own lines to a standard stream, with the
/// headline colored when the [`ColorMode`] allows it.
pub struct ConsoleReporter {
    stream: StandardStream,
    failer: Failer,
}

impl ConsoleReporter {
    pub fn new(target: ConsoleTarget, color: ColorMode) -> Self {
        let stream = match target {
            ConsoleTarget::Stdout => {
                StandardStream::stdout(color.color_choice(atty::Stream::Stdout))
            }
            ConsoleTarget::Stderr => {
                StandardStream::stderr(color.color_choice(atty::Stream::Stderr))
            }
        };
        Self {
            stream,
            failer: Box::new(default_failer),
        }
    }

    /// Reports to stdout using the process-wide color mode.
    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout, Config::global().color)
    }

    /// Reports to stderr using the process-wide color mode.
    pub fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr, Config::global().color)
    }

    pub fn with_failer(mut self, failer: impl FnMut() + Send + 'static) -> Self {
        self.failer = Box::new(failer);
        self
    }

    fn write_message(&mut self, message: &str) -> io::Result<()> {
        let (headline, rest) = match message.split_once('\n') {
            Some((headline, rest)) => (headline, Some(rest)),
            None => (message, None),
        };
        self.stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(self.stream, "{headline}")?;
        self.stream.reset()?;
        if let Some(rest) = rest {
            write!(self.stream, "\n{rest}")?;
        }
        writeln!(self.stream)
    }
}

impl Reporter for ConsoleReporter {
    fn fail_now(&mut self) {
        let _ = self.stream.flush();
        (self.failer)();
    }

    fn logf(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.write_message(&args.to_string());
    }
}

impl fmt::Debug for ConsoleReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleReporter").finish_non_exhaustive()
    }
}

// ============================================================================
// PANIC REPORTER
// ============================================================================

/// Fails through the test harness: `fail_now` panics with everything logged
/// so far, so the messages show up in the failing test's output.
///
/// ```rust,should_panic
/// use expectations::{args, expect, matchers::to_be, PanicReporter};
///
/// let mut t = PanicReporter::new();
/// expect(&mut t, 1, to_be(), args![2]);
/// ```
#[derive(Debug, Default)]
pub struct PanicReporter {
    messages: Vec<String>,
}

impl PanicReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Reporter for PanicReporter {
    fn fail_now(&mut self) {
        panic!("{}", self.messages.join("\n"));
    }

    fn logf(&mut self, args: fmt::Arguments<'_>) {
        self.messages.push(args.to_string());
    }
}
