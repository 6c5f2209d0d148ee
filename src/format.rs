//! Bounded, debugging-oriented rendering of values for diagnostics.
//!
//! Every value shown in a failure message goes through [`ValueFormatter`]: the
//! full `Debug` rendering, cut in the middle when it grows past the configured
//! threshold, followed by the runtime type in parentheses.

use std::borrow::Cow;
use std::cell::Cell;

use unicode_segmentation::UnicodeSegmentation;

use crate::config::Config;
use crate::value::Value;

/// Threshold used when nothing else is configured.
pub const DEFAULT_MAX_VALUE_LEN: usize = 128;

/// Spliced into the middle of renderings that were cut.
pub const ELLIPSIS: &str = "<...>";

const ELLIPSIS_LEN: usize = 5;

thread_local! {
    static ACTIVE: Cell<Option<ValueFormatter>> = const { Cell::new(None) };
}

/// Renders values as `<debug rendering> (<type>)`.
///
/// # Examples
///
/// ```rust
/// use expectations::{Value, ValueFormatter};
/// let formatter = ValueFormatter::default();
/// assert_eq!(formatter.format(&Value::from(1)), "1 (int)");
/// assert_eq!(formatter.format(&Value::from("a")), "\"a\" (string)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormatter {
    max_len: usize,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VALUE_LEN)
    }
}

impl ValueFormatter {
    /// A `max_len` of 0 disables truncation.
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// The formatter of the expectation running on this thread, or the
    /// process-wide one outside of an expectation.
    ///
    /// Matchers use this to format their messages, so an expectation run with
    /// an explicit [`Config`] formats everything with the same threshold.
    pub fn active() -> Self {
        ACTIVE
            .with(Cell::get)
            .unwrap_or_else(|| Config::global().formatter())
    }

    /// Runs `f` with `self` as the [`active`](ValueFormatter::active) formatter.
    pub(crate) fn scope<T>(self, f: impl FnOnce() -> T) -> T {
        let previous = ACTIVE.with(|active| active.replace(Some(self)));
        let _restore = Restore(previous);
        f()
    }

    /// The rendering followed by the type name. Truncation happens before the
    /// type suffix is appended, so the suffix is never cut.
    pub fn format(&self, value: &Value) -> String {
        format!("{} ({})", self.render(value), value.type_name())
    }

    /// The possibly truncated rendering without the type suffix.
    pub fn render(&self, value: &Value) -> String {
        truncate(&format!("{value:?}"), self.max_len).into_owned()
    }
}

struct Restore(Option<ValueFormatter>);

impl Drop for Restore {
    fn drop(&mut self) {
        ACTIVE.with(|active| active.set(self.0));
    }
}

/// Cuts `text` down to `max_len` grapheme clusters by replacing its middle
/// with [`ELLIPSIS`].
///
/// The head gets the extra grapheme when the remaining budget is odd. Texts
/// within the limit, and any text when `max_len` is 0, are returned as is.
/// Limits too small to hold the marker keep only the head.
pub fn truncate(text: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed(text);
    }
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_len {
        return Cow::Borrowed(text);
    }

    if max_len <= ELLIPSIS_LEN {
        return Cow::Owned(graphemes[..max_len].concat());
    }

    let budget = max_len - ELLIPSIS_LEN;
    let head = budget - budget / 2;
    let tail = budget / 2;

    let mut out = String::with_capacity(text.len().min(max_len * 4));
    out.extend(graphemes[..head].iter().copied());
    out.push_str(ELLIPSIS);
    out.extend(graphemes[graphemes.len() - tail..].iter().copied());
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_untouched() {
        assert!(matches!(truncate("abc", 10), Cow::Borrowed("abc")));
        assert!(matches!(truncate("abc", 3), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_zero_disables_truncation() {
        let long = "x".repeat(1000);
        assert_eq!(truncate(&long, 0).len(), 1000);
    }

    #[test]
    fn test_long_text_keeps_head_and_tail() {
        let text: String = ('a'..='z').collect();
        let cut = truncate(&text, 15);
        assert_eq!(cut, "abcde<...>vwxyz");
        assert_eq!(cut.graphemes(true).count(), 15);
    }

    #[test]
    fn test_odd_budget_favours_head() {
        let text: String = ('a'..='z').collect();
        assert_eq!(truncate(&text, 12), "abcd<...>xyz");
    }

    #[test]
    fn test_tiny_limit_keeps_only_the_head() {
        assert_eq!(truncate("abcdefgh", 3), "abc");
        assert_eq!(truncate("abcdefgh", 5), "abcde");
        assert_eq!(truncate("abcdefgh", 6), "a<...>");
    }

    #[test]
    fn test_multibyte_text_is_cut_on_grapheme_boundaries() {
        let text = "é".repeat(20);
        let cut = truncate(&text, 9);
        assert_eq!(cut, "éé<...>éé");
    }

    #[test]
    fn test_type_suffix_follows_truncated_rendering() {
        let formatter = ValueFormatter::new(10);
        let value = Value::from("a".repeat(50));
        assert_eq!(formatter.format(&value), "\"aa<...>a\" (string)");
    }

    #[test]
    fn test_scope_sets_and_restores_active_formatter() {
        let narrow = ValueFormatter::new(7);
        let inner = narrow.scope(|| {
            ValueFormatter::unbounded().scope(ValueFormatter::active);
            ValueFormatter::active()
        });
        assert_eq!(inner, narrow);
        assert_eq!(ACTIVE.with(Cell::get), None);
    }

    #[test]
    fn test_default_threshold() {
        assert_eq!(ValueFormatter::default().max_len(), DEFAULT_MAX_VALUE_LEN);
        assert_eq!(ValueFormatter::unbounded().max_len(), 0);
    }
}
