mod common;

use common::{runner, MockHttpClient, SharedOutput, URL};
use serde_json::{json, Value};
use volley_steps::{debug, expect, get, post, send, steps, Step};

#[tokio::test]
async fn debug_prints_request_and_response() {
    let client = MockHttpClient::json(200, r#"{"ok": true}"#);
    let output = SharedOutput::default();

    runner(client)
        .run_with_output(
            steps![
                post(URL),
                send().body().string("ping"),
                debug(),
                expect().status().equal(200),
            ],
            Box::new(output.clone()),
        )
        .await
        .unwrap();

    let printed: Value = serde_json::from_str(&output.contents()).unwrap();
    assert_eq!(printed["request"]["method"], json!("POST"));
    assert_eq!(printed["request"]["url"], json!(URL));
    assert_eq!(printed["request"]["body"], json!("ping"));
    assert_eq!(printed["response"]["status"], json!(200));
    assert_eq!(printed["response"]["body"], json!({"ok": true}));
}

#[tokio::test]
async fn debug_request_only() {
    let client = MockHttpClient::new(500, &[], "boom");
    let output = SharedOutput::default();

    runner(client)
        .run_with_output(steps![get(URL), debug().request()], Box::new(output.clone()))
        .await
        .unwrap();

    let printed: Value = serde_json::from_str(&output.contents()).unwrap();
    assert_eq!(printed["request"]["method"], json!("GET"));
    assert!(printed.get("response").is_none());
}

#[tokio::test]
async fn debug_response_is_printed_before_expectations_fail() {
    let client = MockHttpClient::new(500, &[], "boom");
    let output = SharedOutput::default();

    let err = runner(client)
        .run_with_output(
            steps![get(URL), expect().status().equal(200), debug().response()],
            Box::new(output.clone()),
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("expected status 200, got 500"));
    let printed: Value = serde_json::from_str(&output.contents()).unwrap();
    assert_eq!(printed["response"]["body"], json!("boom"));
}

#[test]
fn debug_steps_are_addressed() {
    let step = Step::from(debug());
    assert_eq!(step.address().map(|a| a.render()).as_deref(), Some("debug()"));
}
