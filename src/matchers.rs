//! The standard matchers.
//!
//! Each function builds a [`Matcher`] to pass to [`expect`](crate::expect):
//!
//! ```rust
//! use expectations::{args, expect, matchers::*, PanicReporter};
//!
//! let mut t = PanicReporter::new();
//! expect(&mut t, vec![1, 2], to_equal(), args![vec![1, 2]]);
//! expect(&mut t, "red", not(to_be()), args!["blue"]);
//! expect(&mut t, None::<i32>, to_be_nil(), args![]);
//! ```
//!
//! Matchers never panic. Inputs they cannot handle, such as the length of an
//! integer or a missing argument, produce a failing [`MatchResult`] instead.

use crate::format::ValueFormatter;
use crate::matcher::{MatchResult, Matcher};
use crate::value::Value;

/// Returns the auxiliary argument at `index`, or the failing result to report
/// in its place.
fn required<'a>(args: &'a [Value], index: usize, condition: &str) -> Result<&'a Value, MatchResult> {
    args.get(index).ok_or_else(|| {
        MatchResult::fail(format!("{condition} <missing argument {}>", index + 1))
    })
}

fn as_size(value: &Value) -> Option<usize> {
    match value {
        Value::Int(n) => usize::try_from(*n).ok(),
        Value::Uint(n) => usize::try_from(*n).ok(),
        _ => None,
    }
}

/// Shallow equality: primitives by value, shared references by identity.
///
/// Message: `to be <expected>`.
pub fn to_be() -> Matcher {
    Matcher::new("to_be", |actual: &Value, args: &[Value]| {
        let expected = match required(args, 0, "to be") {
            Ok(expected) => expected,
            Err(missing) => return missing,
        };
        let formatter = ValueFormatter::active();
        MatchResult::new(
            format!("to be {}", formatter.format(expected)),
            actual.is_identical(expected),
        )
    })
}

/// Deep structural equality; references are compared by what they point at.
///
/// Message: `to equal <expected>`.
pub fn to_equal() -> Matcher {
    Matcher::new("to_equal", |actual: &Value, args: &[Value]| {
        let expected = match required(args, 0, "to equal") {
            Ok(expected) => expected,
            Err(missing) => return missing,
        };
        let formatter = ValueFormatter::active();
        MatchResult::new(
            format!("to equal {}", formatter.format(expected)),
            actual == expected,
        )
    })
}

pub fn to_be_true() -> Matcher {
    Matcher::new("to_be_true", |actual: &Value, _args: &[Value]| {
        MatchResult::new("to be true", matches!(actual, Value::Bool(true)))
    })
}

pub fn to_be_false() -> Matcher {
    Matcher::new("to_be_false", |actual: &Value, _args: &[Value]| {
        MatchResult::new("to be false", matches!(actual, Value::Bool(false)))
    })
}

/// Passes for nil and for references that hold nothing.
pub fn to_be_nil() -> Matcher {
    Matcher::new("to_be_nil", |actual: &Value, _args: &[Value]| {
        MatchResult::new("to be nil", actual.is_nil())
    })
}

/// Expects a value with a length equal to the first argument.
///
/// Values without a length fail with a message saying so.
pub fn to_be_length_of() -> Matcher {
    Matcher::new("to_be_length_of", |actual: &Value, args: &[Value]| {
        let size = match required(args, 0, "to be length of") {
            Ok(size) => size,
            Err(missing) => return missing,
        };
        let formatter = ValueFormatter::active();
        let Some(size) = as_size(size) else {
            return MatchResult::fail(format!(
                "to be length of {}, which is not a size",
                formatter.format(size)
            ));
        };

        match actual.len() {
            Some(len) => MatchResult::new(
                format!(
                    "to be length of {size}, got (size: {len}; value: {})",
                    formatter.render(actual)
                ),
                len == size,
            ),
            None => MatchResult::fail(format!(
                "to be length of {size}, but {} has no length",
                formatter.format(actual)
            )),
        }
    })
}

/// Expects a value with a length of zero.
pub fn to_be_empty() -> Matcher {
    Matcher::new("to_be_empty", |actual: &Value, _args: &[Value]| {
        let formatter = ValueFormatter::active();
        match actual.len() {
            Some(len) => MatchResult::new(
                format!(
                    "to be empty (size: {len}; value: {})",
                    formatter.render(actual)
                ),
                len == 0,
            ),
            None => MatchResult::fail(format!(
                "to be empty, but {} has no length",
                formatter.format(actual)
            )),
        }
    })
}

/// Inverts another matcher, prefixing its message with `not `.
///
/// ```rust
/// use expectations::{matchers::{not, to_be_true}, Value};
///
/// let result = not(to_be_true()).call(&Value::from(true), &[]);
/// assert_eq!(result.message, "not to be true");
/// assert!(!result.passed);
/// ```
pub fn not(matcher: Matcher) -> Matcher {
    let name = format!("not({})", matcher.name());
    Matcher::new(name, move |actual: &Value, args: &[Value]| {
        matcher.call(actual, args).negate()
    })
}
