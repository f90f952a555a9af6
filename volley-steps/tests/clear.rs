mod common;

use common::{run, MockHttpClient, URL};
use serde_json::json;
use volley_steps::{clear, combine, expect, get, send, steps, Address, Error, Step};

#[test]
fn clear_builders_carry_the_same_addresses() {
    assert_eq!(
        clear().expect().status().address().render(),
        expect().status().address().render()
    );
    assert_eq!(
        Step::from(clear().expect().status())
            .address()
            .map(Address::render)
            .as_deref(),
        Some("clear().expect().status()")
    );
    assert_eq!(
        clear()
            .send()
            .header("Accept")
            .add("text/plain")
            .address()
            .map(Address::render)
            .as_deref(),
        Some(r#"clear().send().header("Accept").add("text/plain")"#)
    );
}

#[tokio::test]
async fn clear_exact_expectation_then_replace() {
    let client = MockHttpClient::json(404, "{}");
    let outcome = run(
        &client,
        steps![
            get(URL),
            expect().status().equal(200),
            clear().expect().status().equal(200),
            expect().status().equal(404),
        ],
    )
    .await
    .unwrap();

    assert_eq!(outcome.retracted_steps, 1);
}

#[tokio::test]
async fn clear_subtree_leaves_other_branches() {
    let client = MockHttpClient::json(200, r#"{"a": 1}"#);
    let err = run(
        &client,
        steps![
            get(URL),
            expect().body().json().equal(json!({"a": 2})),
            expect().body().json().path("$.a").equal(2),
            expect().body().string().contains("missing"),
            clear().expect().body().json(),
        ],
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains(r#"expect().body().string().contains("missing")"#));
}

#[tokio::test]
async fn clear_applies_to_steps_listed_after_it() {
    let client = MockHttpClient::json(200, "{}");
    let outcome = run(
        &client,
        steps![
            get(URL),
            clear().expect().status(),
            expect().status().equal(500),
            expect().status().one_of([404]),
        ],
    )
    .await
    .unwrap();

    assert_eq!(outcome.retracted_steps, 2);
}

#[tokio::test]
async fn clear_send_step_before_it_mutates_request() {
    let client = MockHttpClient::json(200, "{}");
    run(
        &client,
        steps![
            get(URL),
            send().header("X-Debug").add("1"),
            send().header("Accept").add("application/json"),
            clear().send().header("X-Debug"),
        ],
    )
    .await
    .unwrap();

    let req = client.last_request();
    assert!(req.headers.get("X-Debug").is_none());
    assert!(req.headers.contains_key("Accept"));
}

#[tokio::test]
async fn clear_without_match_is_a_miscatch() {
    let client = MockHttpClient::json(200, "{}");
    let err = run(
        &client,
        steps![get(URL), expect().status().equal(201), clear().expect().status().equal(200)],
    )
    .await
    .unwrap_err();

    let Error::RetractionMiscatch { source, .. } = err else {
        panic!("expected a miscatch");
    };
    assert_eq!(source.pattern, "expect().status().equal(200)");
    assert_eq!(
        source.present,
        vec![format!("get({URL:?})"), "expect().status().equal(201)".to_string()]
    );
}

#[tokio::test]
async fn clear_reaches_into_combined_steps() {
    let client = MockHttpClient::json(204, "");
    let standard = || {
        combine(steps![
            expect().status().equal(200),
            expect().header("Content-Type").contains("json"),
        ])
    };

    let outcome = run(
        &client,
        steps![
            get(URL),
            standard(),
            clear().expect().status().equal(200),
            expect().status().equal(204),
        ],
    )
    .await
    .unwrap();

    assert_eq!(outcome.retracted_steps, 1);

    let err = run(
        &client,
        steps![
            get(URL),
            standard(),
            clear().expect().status().equal(200),
            expect().status().equal(201),
        ],
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("expected status 201, got 204"));
}

#[tokio::test]
async fn subtree_clear_also_removes_replacements_listed_after_it() {
    let client = MockHttpClient::json(500, "{}");
    let outcome = run(
        &client,
        steps![
            get(URL),
            expect().status().equal(200),
            clear().expect().status(),
            expect().status().equal(404),
        ],
    )
    .await
    .unwrap();

    assert_eq!(outcome.retracted_steps, 2);
    assert_eq!(outcome.executed_steps, 2);
}

#[tokio::test]
async fn retraction_is_global_across_a_shared_template() {
    // A reusable template sets up expectations, a later caller clears one of them by its chain
    // and adds its own.
    let client = MockHttpClient::json(201, r#"{"id": 9}"#);
    let template = || {
        combine(steps![
            send().header("Content-Type").add("application/json"),
            expect().status().equal(200),
            expect().body().json().path("$.id").exists(),
        ])
    };

    let outcome = run(
        &client,
        steps![
            get(URL),
            template(),
            clear().expect().status().equal(200),
            expect().status().equal(201),
        ],
    )
    .await
    .unwrap();

    assert_eq!(outcome.status(), Some(201));
    assert_eq!(outcome.retracted_steps, 1);
}
