use std::fs;
use std::path::Path;

use lsstap_core::{Report, decode_csv_file};

fn load_expected_report(dir: &str) -> Report {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let expected_path = root.join(dir).join("expected_report.json");

    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let input = root.join(dir).join("input.csv");
    let expected = load_expected_report(dir);

    let mut actual = decode_csv_file(&input).expect("decode csv");
    actual.generated_at = expected.generated_at.clone();
    actual.input.path = expected.input.path.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_basic() {
    run_golden("tests/golden/basic");
}

#[test]
fn golden_errors() {
    run_golden("tests/golden/errors");
}

#[test]
fn golden_basic_summary_counts() {
    let report = load_expected_report("tests/golden/basic");
    let summary = report.capture_summary.expect("capture summary");
    assert_eq!(summary.bytes_total, 39);
    assert_eq!(summary.frames_total, 4);
    assert_eq!(summary.requests, 1);
    assert_eq!(summary.replies, 2);
    assert_eq!(summary.errors, 1);
}

#[test]
fn golden_errors_keep_stream_alive() {
    let report = load_expected_report("tests/golden/errors");
    let summary = report.capture_summary.expect("capture summary");
    assert_eq!(summary.errors, 3);
    // the packet after three failures still decodes as a request
    assert_eq!(summary.requests, 1);
    assert_eq!(report.frames.last().expect("frames").bytes, "#3L");
}
