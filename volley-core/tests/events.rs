use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;
use volley_core::{CompositeEventSink, Event, EventSink, NoOpEventSink, Phase};

struct CollectingSink {
    seen: Arc<Mutex<Vec<serde_json::Value>>>,
}

#[async_trait]
impl EventSink for CollectingSink {
    async fn emit(&self, event: Event) {
        self.seen.lock().unwrap().push(event.to_json());
    }
}

#[tokio::test]
async fn test_composite_sink_fans_out_to_every_sink() {
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));

    let mut sink = CompositeEventSink::new();
    sink.add(Box::new(CollectingSink { seen: first.clone() }));
    sink.add(Box::new(NoOpEventSink));
    sink.add(Box::new(CollectingSink { seen: second.clone() }));

    sink.emit(Event::PhaseStarted {
        run_id: Uuid::nil(),
        phase: Phase::Clean,
    })
    .await;

    assert_eq!(first.lock().unwrap().len(), 1);
    assert_eq!(second.lock().unwrap().len(), 1);
    assert_eq!(first.lock().unwrap()[0]["phase"], "clean");
}

#[test]
fn test_step_failed_json_shape() {
    let event = Event::StepFailed {
        run_id: Uuid::nil(),
        phase: Phase::Expect,
        step: Some("expect().status().equal(200)".to_string()),
        message: "expected status 200, got 500".to_string(),
    };

    let v = event.to_json();
    assert_eq!(v["type"], "step.failed");
    assert_eq!(v["phase"], "expect");
    assert_eq!(v["step"], "expect().status().equal(200)");
    assert_eq!(v["run_id"], "00000000-0000-0000-0000-000000000000");
}

#[test]
fn test_unaddressed_step_serializes_null() {
    let event = Event::StepSucceeded {
        run_id: Uuid::nil(),
        phase: Phase::Combine,
        step: None,
    };

    assert!(event.to_json()["step"].is_null());
}
