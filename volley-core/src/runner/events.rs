use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::phase::Phase;

#[derive(Debug, Clone)]
pub enum Event {
    RunStarted {
        run_id: Uuid,
        steps: usize,
    },
    RunFinished {
        run_id: Uuid,
        succeeded: bool,
    },
    PhaseStarted {
        run_id: Uuid,
        phase: Phase,
    },
    StepSucceeded {
        run_id: Uuid,
        phase: Phase,
        step: Option<String>,
    },
    StepFailed {
        run_id: Uuid,
        phase: Phase,
        step: Option<String>,
        message: String,
    },
    ExchangeFinished {
        run_id: Uuid,
        status: u16,
    },
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RunStarted { .. } => "run.started",
            Event::RunFinished { .. } => "run.finished",
            Event::PhaseStarted { .. } => "phase.started",
            Event::StepSucceeded { .. } => "step.succeeded",
            Event::StepFailed { .. } => "step.failed",
            Event::ExchangeFinished { .. } => "exchange.finished",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let kind = self.as_str();
        match self {
            Event::RunStarted { run_id, steps } => {
                json!({ "type": kind, "run_id": run_id.to_string(), "steps": steps })
            }
            Event::RunFinished { run_id, succeeded } => {
                json!({ "type": kind, "run_id": run_id.to_string(), "succeeded": succeeded })
            }
            Event::PhaseStarted { run_id, phase } => {
                json!({ "type": kind, "run_id": run_id.to_string(), "phase": phase.as_str() })
            }
            Event::StepSucceeded { run_id, phase, step } => {
                json!({ "type": kind, "run_id": run_id.to_string(), "phase": phase.as_str(), "step": step })
            }
            Event::StepFailed { run_id, phase, step, message } => {
                json!({ "type": kind, "run_id": run_id.to_string(), "phase": phase.as_str(), "step": step, "message": message })
            }
            Event::ExchangeFinished { run_id, status } => {
                json!({ "type": kind, "run_id": run_id.to_string(), "status": status })
            }
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// Prints one JSON object per event.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        println!("{}", serde_json::to_string(&event.to_json()).unwrap_or_default());
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
