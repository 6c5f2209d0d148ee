mod common;

use std::io;

use common::RecordingReporter;
use expectations::matchers::*;
use expectations::{
    args, expect, expect_with, fail, must, must_ok, Config, It, Matcher, MatchResult, Value,
};

#[test]
fn passing_expectation_is_silent() {
    let mut r = RecordingReporter::new();
    expect(&mut r, 1, to_be(), args![1]);
    expect(&mut r, "a", to_equal(), args!["a"]);
    expect(&mut r, true, to_be_true(), []);
    r.assert_passed();
}

#[test]
fn failing_expectation_reports_actual_and_condition() {
    let mut r = RecordingReporter::new();
    let line = line!() + 1;
    expect(&mut r, 1, to_be(), args![2]);

    r.assert_failed_with("expected 1 (int) to be 2 (int)\n stacktrace: ");
    r.assert_traced_to(file!(), line);
}

#[test]
fn non_matcher_is_a_usage_error() {
    let mut r = RecordingReporter::new();
    let line = line!() + 1;
    expect(&mut r, 1, 1, []);

    r.assert_failed_with(
        "expect() requires 3rd argument to be a matcher func\n       got: 1 (int)\n\nStacktrace: ",
    );
    r.assert_traced_to(file!(), line);
}

#[test]
fn fail_is_unconditional() {
    let mut r = RecordingReporter::new();
    let line = line!() + 1;
    fail(&mut r, "as intended");

    r.assert_failed_with("Fail as intended:\n stacktrace: ");
    r.assert_traced_to(file!(), line);
}

#[test]
fn must_only_fails_on_error() {
    let mut r = RecordingReporter::new();
    must(&mut r, None);
    r.assert_passed();

    let err = io::Error::new(io::ErrorKind::NotFound, "no such thing");
    let line = line!() + 1;
    must(&mut r, Some(&err));
    r.assert_failed_with("Must failed: got no such thing\n stacktrace: ");
    r.assert_traced_to(file!(), line);
}

#[test]
fn must_ok_unwraps_or_fails() {
    let mut r = RecordingReporter::new();
    assert_eq!(must_ok(&mut r, "7".parse::<u8>()), Some(7));
    r.assert_passed();

    assert_eq!(must_ok(&mut r, "seven".parse::<u8>()), None);
    r.assert_failed_with("Must failed: got invalid digit found in string");
}

#[test]
fn explicit_config_truncates_values() {
    let mut r = RecordingReporter::new();
    let config = Config::default().with_max_value_len(10);
    let long = "a".repeat(50);
    expect_with(&mut r, &config, long.as_str(), to_be_empty(), []);

    r.assert_failed_with(
        "expected \"aa<...>a\" (string) to be empty (size: 50; value: \"aa<...>a\")",
    );
}

#[test]
fn nil_values_reach_the_matcher() {
    let mut r = RecordingReporter::new();
    expect(&mut r, None::<i32>, to_be_nil(), []);
    expect(&mut r, (), to_be_nil(), []);
    expect(&mut r, Value::null_ref(), to_be_nil(), []);
    expect(&mut r, Some(1), not(to_be_nil()), []);
    r.assert_passed();

    expect(&mut r, Value::reference(1), to_be_nil(), []);
    r.assert_failed_with("expected &1 (&int) to be nil");
}

#[test]
fn custom_matchers_need_no_registration() {
    let to_be_even = Matcher::new("to_be_even", |actual: &Value, _args: &[Value]| {
        MatchResult::new("to be even", matches!(actual, Value::Int(n) if n % 2 == 0))
    });

    let mut r = RecordingReporter::new();
    expect(&mut r, 4, to_be_even.clone(), []);
    r.assert_passed();

    expect(&mut r, 3, not(not(to_be_even)), []);
    r.assert_failed_with("expected 3 (int) not not to be even");
}

#[test]
fn it_wrapper_reports_at_the_caller() {
    let mut r = RecordingReporter::new();
    {
        let mut it = It::new(&mut r);
        it.expects(vec![1, 2], to_equal(), args![vec![1, 2]]);
        it.expects("abc", to_be_length_of(), args![3]);
        assert_eq!(it.must_ok(Ok::<_, io::Error>(5)), Some(5));
        it.must(None);
    }
    r.assert_passed();

    let line;
    {
        let mut it = It::new(&mut r);
        line = line!() + 1;
        it.expects(vec![1, 2], to_equal(), args![vec![2, 1]]);
    }
    r.assert_failed_with("expected [1, 2] (list) to equal [2, 1] (list)");
    r.assert_traced_to(file!(), line);
}

#[test]
fn it_wrapper_fails() {
    let mut r = RecordingReporter::new();
    let line;
    {
        let mut it = It::new(&mut r);
        line = line!() + 1;
        it.fails("on purpose");
    }
    r.assert_failed_with("Fail on purpose:\n stacktrace: ");
    r.assert_traced_to(file!(), line);
}

#[test]
fn it_wrapper_uses_its_own_config() {
    let mut r = RecordingReporter::new();
    {
        let mut it = It::with_config(&mut r, Config::default().with_max_value_len(12));
        assert_eq!(it.config().max_value_len, 12);
        it.expects("x".repeat(40), to_be(), args!["y"]);
    }
    r.assert_failed_with("expected \"xxx<...>xx\" (string) to be \"y\" (string)");
}

#[test]
fn each_failure_fails_the_reporter_once() {
    let mut r = RecordingReporter::new();
    expect(&mut r, 1, to_be(), args![2]);
    expect(&mut r, 3, to_be(), args![4]);
    assert_eq!(r.messages.len(), 2);
    assert!(r.messages[1].starts_with("expected 3 (int) to be 4 (int)"));
}
