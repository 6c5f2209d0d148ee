//! Matcher-based test expectations.
//!
//! ```rust
//! use expectations::prelude::*;
//!
//! let mut t = PanicReporter::new();
//! expect(&mut t, "expectations", to_be_length_of(), args![12]);
//! expect(&mut t, Some(3), not(to_be_nil()), args![]);
//! ```
//!
//! A failing expectation logs `expected <actual> <condition>` followed by a
//! stack trace that starts at the line of the `expect` call, then fails the
//! [`Reporter`].

pub use crate::config::{ColorMode, Config};
pub use crate::error::{ConfigError, ExpectError};
pub use crate::expect::{expect, expect_with, fail, must, must_ok, Expectation, Failure, It};
pub use crate::format::ValueFormatter;
pub use crate::matcher::{MatchResult, Matcher};
pub use crate::reporter::{ConsoleReporter, ConsoleTarget, PanicReporter, Reporter, WriterReporter};
pub use crate::trace::StackTrace;
pub use crate::value::{Record, Value};

pub mod config;
pub mod error;
pub mod expect;
pub mod format;
pub mod matcher;
pub mod matchers;
pub mod reporter;
pub mod trace;
pub mod value;

/// Builds the auxiliary argument list of an expectation, converting each
/// argument into a [`Value`].
///
/// ```rust
/// use expectations::{args, Value};
///
/// assert_eq!(args![1, "a", None::<i32>], vec![Value::Int(1), Value::from("a"), Value::Nil]);
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}

pub mod prelude {
    pub use crate::args;
    pub use crate::matchers::*;
    pub use crate::{expect, expect_with, fail, must, must_ok, It};
    pub use crate::{Config, PanicReporter, Reporter, Value};
}
