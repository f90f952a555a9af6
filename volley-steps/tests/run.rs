mod common;

use std::sync::Mutex;

use common::{runner, MockHttpClient, URL};
use volley_steps::{
    expect, get, must_run_with, steps, test_with, Error, PanicReporter, RunnerConfig, TestReporter,
};

#[derive(Default)]
struct RecordingReporter {
    failures: Mutex<Vec<String>>,
}

impl TestReporter for RecordingReporter {
    fn fail(&self, error: &Error) {
        self.failures.lock().unwrap().push(error.to_string());
    }
}

#[tokio::test]
async fn passing_script_reports_nothing() {
    let reporter = RecordingReporter::default();
    let passed = test_with(
        &runner(MockHttpClient::json(200, "{}")),
        &reporter,
        steps![get(URL), expect().status().equal(200)],
    )
    .await;

    assert!(passed);
    assert!(reporter.failures.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failing_script_reports_once() {
    let reporter = RecordingReporter::default();
    let passed = test_with(
        &runner(MockHttpClient::json(404, "{}")),
        &reporter,
        steps![get(URL), expect().status().equal(200), expect().status().equal(201)],
    )
    .await;

    assert!(!passed);
    let failures = reporter.failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("expect().status().equal(200)"));
}

#[tokio::test]
async fn missing_request_is_reported() {
    let reporter = RecordingReporter::default();
    let passed = test_with(
        &runner(MockHttpClient::json(200, "{}")),
        &reporter,
        steps![expect().status().equal(200)],
    )
    .await;

    assert!(!passed);
    assert!(reporter.failures.lock().unwrap()[0].contains("no request was configured"));
}

#[tokio::test]
#[should_panic(expected = "expected status 200, got 503")]
async fn panic_reporter_panics_with_the_error() {
    test_with(
        &runner(MockHttpClient::json(503, "{}")),
        &PanicReporter,
        steps![get(URL), expect().status().equal(200)],
    )
    .await;
}

#[tokio::test]
#[should_panic(expected = "expect().status().equal(200)")]
async fn must_run_panics_on_failure() {
    must_run_with(
        &runner(MockHttpClient::json(500, "{}")),
        steps![get(URL), expect().status().equal(200)],
    )
    .await;
}

#[tokio::test]
async fn must_run_returns_the_outcome() {
    let outcome = must_run_with(
        &runner(MockHttpClient::json(204, "")),
        steps![get(URL), expect().status().equal(204)],
    )
    .await;

    assert_eq!(outcome.status(), Some(204));
}

#[test]
fn default_config() {
    let config = RunnerConfig::default();
    assert_eq!(config.max_combine_expansions, 10_000);
    assert_eq!(config.max_response_bytes, 4 * 1024 * 1024);
    assert_eq!(config.timeout.as_secs(), 30);
}
