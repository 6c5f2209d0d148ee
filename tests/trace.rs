mod common;

use common::RecordingReporter;
use expectations::matchers::*;
use expectations::trace::MAX_FRAMES;
use expectations::{args, expect, It, StackTrace, Value};

#[test]
fn capture_starts_at_the_calling_line() {
    let line = line!() + 1;
    let trace = StackTrace::capture();

    let head = &trace.frames()[0];
    assert!(head.file.ends_with(file!()), "unexpected head file: {}", head.file);
    assert_eq!(head.line, line);
    assert!(trace.len() <= MAX_FRAMES);
    common::assert_no_library_frames(&trace.to_string());
}

#[test]
fn nested_user_code_keeps_the_call_site() {
    fn check_positive(r: &mut RecordingReporter, n: i64) {
        expect(r, n > 0, to_be_true(), args![]);
    }

    let mut r = RecordingReporter::new();
    check_positive(&mut r, -1);

    r.assert_failed_with("expected false (bool) to be true");
    // the helper's own line, not a line inside the library
    assert!(r.first().contains(&format!("{}:", file!())));
    common::assert_no_library_frames(r.first());
}

#[test]
fn helpers_can_skip_their_own_frame() {
    fn expect_even(r: &mut RecordingReporter, n: i64) {
        let mut it = It::new(r).with_skip(1);
        it.expects(Value::from(n % 2), to_equal(), args![0]);
    }

    let mut r = RecordingReporter::new();
    expect_even(&mut r, 3);

    r.assert_failed_with("expected 1 (int) to equal 0 (int)");
    let mut frames = r.first().lines().skip(1);
    let head = frames.next().unwrap_or("");
    let function = frames.next().unwrap_or("").trim();
    assert!(head.contains("tests/trace.rs:"), "unexpected head frame: {head}");
    assert_eq!(function, "inside trace::helpers_can_skip_their_own_frame");
}

#[test]
fn traces_render_under_their_label() {
    let mut r = RecordingReporter::new();
    expect(&mut r, 1, to_be(), args![2]);

    let indent = " ".repeat(" stacktrace: ".len());
    let mut lines = r.first().lines().skip(1);
    assert!(lines.next().is_some_and(|l| l.starts_with(" stacktrace: ")));
    assert!(lines.next().is_some_and(|l| l.starts_with(&format!("{indent}    inside "))));
}
