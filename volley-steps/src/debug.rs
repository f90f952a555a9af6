use std::io::Write;

use serde_json::{json, Value as JsonValue};
use volley_core::{ActionError, Address, HttpRequestParts, HttpResponseParts, Phase, Session, Step};

/// Prints the request and response as JSON to the session output.
///
/// Convert it into a step directly to print both once the response arrived, or narrow it with
/// [`DebugOutput::request`] or [`DebugOutput::response`].
pub fn debug() -> DebugOutput {
    DebugOutput {
        path: Address::root("debug"),
    }
}

pub struct DebugOutput {
    path: Address,
}

impl DebugOutput {
    /// Prints the request as it will be sent.
    #[track_caller]
    pub fn request(self) -> Step {
        Step::addressed(Phase::AfterSend, self.path.push("request", vec![]), |s| {
            let doc = json!({ "request": s.request().map(request_to_json) });
            write_json(s, &doc)
        })
    }

    #[track_caller]
    pub fn response(self) -> Step {
        Step::addressed(Phase::BeforeExpect, self.path.push("response", vec![]), |s| {
            let doc = json!({ "response": response_to_json(s.response()?) });
            write_json(s, &doc)
        })
    }
}

impl From<DebugOutput> for Step {
    #[track_caller]
    fn from(d: DebugOutput) -> Step {
        Step::addressed(Phase::BeforeExpect, d.path, |s| {
            let doc = json!({
                "request": s.request().map(request_to_json),
                "response": response_to_json(s.response()?),
            });
            write_json(s, &doc)
        })
    }
}

fn write_json(s: &mut Session, doc: &JsonValue) -> Result<(), ActionError> {
    serde_json::to_writer_pretty(&mut s.output, doc).map_err(ActionError::other)?;
    writeln!(s.output).map_err(ActionError::other)?;
    s.output.flush().map_err(ActionError::other)
}

fn body_to_json(body: &[u8]) -> JsonValue {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(body).to_string()))
}

fn request_to_json(r: &HttpRequestParts) -> JsonValue {
    json!({
        "method": r.method,
        "url": r.url.to_string(),
        "headers": r.headers,
        "body": body_to_json(&r.body),
    })
}

fn response_to_json(r: &HttpResponseParts) -> JsonValue {
    json!({
        "status": r.status,
        "headers": r.headers,
        "body": body_to_json(&r.body),
    })
}
