//! # Shared test support
//!
//! A recording reporter that never aborts, plus string checks built on
//! `predicates`.

#![allow(dead_code)]

use std::fmt;

use expectations::Reporter;
use predicates::prelude::*;
use predicates::str::contains;

/// Records everything an expectation does to it.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub did_fail_now: bool,
    pub messages: Vec<String>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first logged message, or an empty string.
    pub fn first(&self) -> &str {
        self.messages.first().map(String::as_str).unwrap_or("")
    }

    pub fn assert_passed(&self) {
        assert!(
            !self.did_fail_now && self.messages.is_empty(),
            "expected no failure, got {:?}",
            self.messages
        );
    }

    pub fn assert_failed_with(&self, prefix: &str) {
        assert!(self.did_fail_now, "expected fail_now to be called");
        assert_eq!(self.messages.len(), 1, "expected one message: {:?}", self.messages);
        assert!(
            predicate::str::starts_with(prefix).eval(self.first()),
            "expected message to start with {prefix:?}, got:\n{}",
            self.first()
        );
    }

    /// The trace points at `file:line` and never into this library's sources.
    pub fn assert_traced_to(&self, file: &str, line: u32) {
        let at_caller = contains(format!("{file}:{line}\n"));
        assert!(
            at_caller.eval(self.first()),
            "expected a frame at {file}:{line}, got:\n{}",
            self.first()
        );
        assert_no_library_frames(self.first());
    }
}

impl Reporter for RecordingReporter {
    fn fail_now(&mut self) {
        self.did_fail_now = true;
    }

    fn logf(&mut self, args: fmt::Arguments<'_>) {
        self.messages.push(args.to_string());
    }
}

pub fn assert_no_library_frames(message: &str) {
    let library_sources = contains("src/expect.rs")
        .or(contains("src/trace.rs"))
        .or(contains("src/matcher.rs"))
        .or(contains("inside expectations::"));
    assert!(
        !library_sources.eval(message),
        "trace leaks library frames:\n{message}"
    );
}
