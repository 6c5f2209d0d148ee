//! Stack traces that start at the caller's code.
//!
//! The public entry points are `#[track_caller]`, so the location of the
//! user's `expect(...)` call is known exactly. That location becomes frame 0;
//! the rest of the trace comes from the `backtrace` crate with the capture
//! machinery and every frame of this library removed. No caller has to count
//! how many wrapper layers sit between it and the capture.

use std::fmt;
use std::panic::Location;
use std::path::Path;

use unicode_width::UnicodeWidthStr;

/// Most frames a trace will hold.
pub const MAX_FRAMES: usize = 100;

const UNKNOWN: &str = "<unknown>";
const LIBRARY_PATH: &str = concat!(env!("CARGO_CRATE_NAME"), "::");
const LIBRARY_IMPL_PATH: &str = concat!("<", env!("CARGO_CRATE_NAME"), "::");

/// One resolved call frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}\n    inside {}", self.file, self.line, self.function)
    }
}

/// A symbol as the platform resolved it; any part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub function: Option<String>,
}

impl RawFrame {
    fn is_library(&self) -> bool {
        self.function.as_deref().is_some_and(|name| {
            name.starts_with(LIBRARY_PATH) || name.starts_with(LIBRARY_IMPL_PATH)
        })
    }

    fn into_frame(self) -> Frame {
        Frame {
            file: self.file.unwrap_or_else(|| UNKNOWN.to_string()),
            line: self.line.unwrap_or(0),
            function: self.function.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

/// An ordered list of frames, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    frames: Vec<Frame>,
}

impl StackTrace {
    /// Captures the trace of whoever called this function.
    #[track_caller]
    pub fn capture() -> Self {
        Self::capture_at(Location::caller(), 0)
    }

    /// Captures the active frames, starting at `caller`.
    ///
    /// `skip` drops that many further frames above the library boundary, for
    /// helper functions that should not show up in their own failures. When
    /// frames are skipped, `caller` is not used and frame 0 is the first frame
    /// left after skipping.
    pub fn capture_at(caller: &Location<'_>, skip: usize) -> Self {
        Self::from_resolved(caller, skip, resolve_frames())
    }

    /// Builds a trace from already-resolved frames, innermost first.
    ///
    /// Everything up to and including the innermost run of library frames is
    /// discarded. Without any library frame, nothing past `caller` is known.
    /// Frame 0 takes the debuginfo path of the first user frame when it names
    /// the same file as `caller`, so every frame renders paths the same way.
    pub fn from_resolved(caller: &Location<'_>, skip: usize, resolved: Vec<RawFrame>) -> Self {
        let user: Vec<RawFrame> = match resolved.iter().position(RawFrame::is_library) {
            Some(start) => resolved
                .into_iter()
                .skip(start)
                .skip_while(|frame| frame.is_library() || frame.function.is_none())
                .skip(skip)
                .collect(),
            None => Vec::new(),
        };

        let mut user = user.into_iter();
        let mut frames = Vec::with_capacity(MAX_FRAMES.min(user.len() + 1));
        if skip == 0 {
            // the first user frame is the function that contains the call site
            let first = user.next();
            let file = first
                .as_ref()
                .and_then(|frame| frame.file.as_deref())
                .filter(|file| Path::new(file).ends_with(caller.file()))
                .unwrap_or(caller.file())
                .to_string();
            let function = first
                .and_then(|frame| frame.function)
                .unwrap_or_else(|| UNKNOWN.to_string());
            frames.push(Frame {
                file,
                line: caller.line(),
                function,
            });
        }
        frames.extend(user.map(RawFrame::into_frame));
        frames.truncate(MAX_FRAMES);
        Self { frames }
    }

    pub fn from_frames(mut frames: Vec<Frame>) -> Self {
        frames.truncate(MAX_FRAMES);
        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{frame}")?;
        }
        Ok(())
    }
}

fn resolve_frames() -> Vec<RawFrame> {
    let backtrace = backtrace::Backtrace::new();
    backtrace
        .frames()
        .iter()
        .flat_map(backtrace::BacktraceFrame::symbols)
        .map(|symbol| RawFrame {
            file: symbol.filename().map(|path| path.display().to_string()),
            line: symbol.lineno(),
            // alternate form drops the trailing symbol hash
            function: symbol.name().map(|name| format!("{name:#}")),
        })
        .collect()
}

/// Prefixes `content` with `prefix` and indents every following line by the
/// width of `prefix`, so multi-line content lines up under its label.
///
/// ```rust
/// use expectations::trace::tabulate;
/// assert_eq!(tabulate("label: ", "one\ntwo", "\n"), "label: one\n       two");
/// ```
pub fn tabulate(prefix: &str, content: &str, sep: &str) -> String {
    if sep.is_empty() {
        return format!("{prefix}{content}");
    }
    let indent = " ".repeat(prefix.width());
    let lines: Vec<String> = content
        .split(sep)
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect();
    format!("{prefix}{}", lines.join(sep))
}
