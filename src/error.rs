//! Errors raised by the library itself.
//!
//! Failed expectations are not errors: they go to the [`Reporter`](crate::Reporter).
//! These types cover misuse of the API and bad configuration.

use miette::Diagnostic;
use thiserror::Error;

use crate::value::Value;

/// Misuse detected while running an expectation.
#[derive(Debug, Error, Diagnostic)]
pub enum ExpectError {
    #[error("expect() requires 3rd argument to be a matcher func, got {got:?}")]
    #[diagnostic(
        code(expectations::not_a_matcher),
        help("pass a matcher such as `to_be()` or `not(to_equal())`")
    )]
    NotAMatcher { got: Value },
}

/// Invalid configuration, from the environment or from a second install.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid {var} value {value:?}: expected an unsigned integer")]
    #[diagnostic(
        code(expectations::config::max_value_len),
        help("use 0 to disable truncation")
    )]
    InvalidMaxValueLen {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid color mode {value:?}: expected auto, always or never")]
    #[diagnostic(code(expectations::config::color))]
    InvalidColor { value: String },

    #[error("configuration was already installed for this process")]
    #[diagnostic(
        code(expectations::config::already_installed),
        help("install the configuration once, before the first expectation runs")
    )]
    AlreadyInstalled,
}
