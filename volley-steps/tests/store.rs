mod common;

use common::{run, MockHttpClient, URL};
use serde::Deserialize;
use volley_steps::{get, steps, store, Slot};

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: u64,
    name: String,
}

#[tokio::test]
async fn store_status_header_and_body() {
    let client = MockHttpClient::new(202, &[("X-Request-Id", "abc")], "accepted");
    let status = Slot::new();
    let request_id = Slot::new();
    let body = Slot::new();

    run(
        &client,
        steps![
            get(URL),
            store().response().status().into_slot(&status),
            store().response().header("x-request-id").into_slot(&request_id),
            store().response().body().string().into_slot(&body),
        ],
    )
    .await
    .unwrap();

    assert_eq!(status.get(), Some(202));
    assert_eq!(request_id.take().as_deref(), Some("abc"));
    assert!(!request_id.is_set());
    assert_eq!(body.get().as_deref(), Some("accepted"));
}

#[tokio::test]
async fn store_json_into_typed_slot() {
    let client = MockHttpClient::json(200, r#"{"user": {"id": 3, "name": "ann"}, "total": 1}"#);
    let user: Slot<User> = Slot::new();
    let total: Slot<u32> = Slot::new();

    run(
        &client,
        steps![
            get(URL),
            store().response().body().json().path("$.user").into_slot(&user),
            store().response().body().json().path("$.total").into_slot(&total),
        ],
    )
    .await
    .unwrap();

    assert_eq!(user.take(), Some(User { id: 3, name: "ann".to_string() }));
    assert_eq!(total.get(), Some(1));
}

#[tokio::test]
async fn store_type_mismatch_fails() {
    let client = MockHttpClient::json(200, r#"{"total": "many"}"#);
    let total: Slot<u32> = Slot::new();

    let err = run(
        &client,
        steps![get(URL), store().response().body().json().path("$.total").into_slot(&total)],
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("unable to convert stored value"));
    assert!(!total.is_set());
}

#[tokio::test]
async fn store_missing_header_fails() {
    let client = MockHttpClient::new(200, &[], "");
    let slot = Slot::new();

    let err = run(
        &client,
        steps![get(URL), store().response().header("ETag").into_slot(&slot)],
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("response has no header ETag"));
}
