//! The matcher calling convention and the dynamic invoker.
//!
//! A matcher is any `Fn(&Value, &[Value]) -> MatchResult`: the value under
//! test plus an ordered list of auxiliary arguments. Matchers travel as
//! [`Value`]s so the engine can receive anything in matcher position and tell
//! a misuse apart from a failed expectation.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::ExpectError;
use crate::value::Value;

/// The function shape every matcher implements.
pub type MatchFn = dyn Fn(&Value, &[Value]) -> MatchResult + Send + Sync;

/// What a matcher reports back: the expected condition in words, and whether
/// it held.
///
/// The message completes the sentence `expected <actual> ...`, e.g. `to be 2 (int)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub message: String,
    pub passed: bool,
}

impl MatchResult {
    pub fn new(message: impl Into<String>, passed: bool) -> Self {
        Self {
            message: message.into(),
            passed,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(message, true)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(message, false)
    }

    /// Flips `passed` and prefixes the message with `not `.
    pub fn negate(self) -> Self {
        Self {
            message: format!("not {}", self.message),
            passed: !self.passed,
        }
    }

    pub fn into_parts(self) -> (String, bool) {
        (self.message, self.passed)
    }
}

impl From<(String, bool)> for MatchResult {
    fn from((message, passed): (String, bool)) -> Self {
        Self { message, passed }
    }
}

impl From<(&str, bool)> for MatchResult {
    fn from((message, passed): (&str, bool)) -> Self {
        Self::new(message, passed)
    }
}

/// A named, shareable matcher function.
///
/// # Examples
///
/// ```rust
/// use expectations::{MatchResult, Matcher, Value};
///
/// let to_be_positive = Matcher::new("to_be_positive", |actual: &Value, _args: &[Value]| {
///     MatchResult::new("to be positive", matches!(actual, Value::Int(n) if *n > 0))
/// });
/// assert!(to_be_positive.call(&Value::from(3), &[]).passed);
/// ```
#[derive(Clone)]
pub struct Matcher {
    name: Cow<'static, str>,
    func: Arc<MatchFn>,
}

impl Matcher {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> MatchResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, actual: &Value, args: &[Value]) -> MatchResult {
        (self.func)(actual, args)
    }

    /// True when both handles share the same underlying function.
    pub fn same_as(&self, other: &Matcher) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<matcher {}>", self.name)
    }
}

// ============================================================================
// INVOCATION
// ============================================================================

/// Converts heterogeneous values into a matcher argument list.
///
/// Absent values are kept as [`Value::Nil`] so positions never shift.
pub fn marshal<I>(values: I) -> Vec<Value>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    values.into_iter().map(Into::into).collect()
}

/// Runs `matcher(actual, args...)`.
///
/// Returns [`ExpectError::NotAMatcher`] without calling anything when
/// `matcher` does not hold a matcher.
pub fn invoke(matcher: &Value, actual: &Value, args: &[Value]) -> Result<MatchResult, ExpectError> {
    let Value::Matcher(matcher) = matcher else {
        return Err(ExpectError::NotAMatcher {
            got: matcher.clone(),
        });
    };
    Ok(matcher.call(actual, args))
}
