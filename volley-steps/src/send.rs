use serde::Serialize;
use serde_json::json;
use volley_core::{ActionError, Address, HttpRequestParts, Phase, Step};

use crate::mode::{builder, Check, Mode};

/// Starts a modification of the outgoing request.
pub fn send() -> SendRequest<Check> {
    SendRequest::at(Address::root("send"))
}

builder!(SendRequest {});
builder!(SendHeader { name: String });
builder!(SendQuery { name: String });
builder!(SendBody {});

impl<M: Mode> SendRequest<M> {
    pub fn header(self, name: impl Into<String>) -> SendHeader<M> {
        let name = name.into();
        SendHeader::at(self.path.push("header", vec![json!(name)]), name)
    }

    pub fn query(self, name: impl Into<String>) -> SendQuery<M> {
        let name = name.into();
        SendQuery::at(self.path.push("query", vec![json!(name)]), name)
    }

    pub fn body(self) -> SendBody<M> {
        SendBody::at(self.path.push("body", vec![]))
    }

    /// Runs `modify` against the request before it is sent.
    #[track_caller]
    pub fn custom<F>(self, modify: F) -> Step
    where
        F: FnOnce(&mut HttpRequestParts) -> Result<(), ActionError> + Send + 'static,
    {
        M::finish(self.path.push("custom", vec![]), Phase::Send, move |s| {
            modify(s.request_mut()?)
        })
    }
}

impl<M: Mode> SendHeader<M> {
    /// Adds a value; adding the same header twice folds both values into one.
    #[track_caller]
    pub fn add(self, value: impl Into<String>) -> Step {
        let value = value.into();
        let name = self.name;
        M::finish(self.path.push("add", vec![json!(value)]), Phase::Send, move |s| {
            s.request_mut()?.add_header(&name, &value);
            Ok(())
        })
    }
}

impl<M: Mode> SendQuery<M> {
    #[track_caller]
    pub fn add(self, value: impl Into<String>) -> Step {
        let value = value.into();
        let name = self.name;
        M::finish(self.path.push("add", vec![json!(value)]), Phase::Send, move |s| {
            s.request_mut()?.url.query_pairs_mut().append_pair(&name, &value);
            Ok(())
        })
    }
}

impl<M: Mode> SendBody<M> {
    #[track_caller]
    pub fn string(self, body: impl Into<String>) -> Step {
        let body = body.into();
        M::finish(self.path.push("string", vec![json!(body)]), Phase::Send, move |s| {
            s.request_mut()?.body = body.into_bytes();
            Ok(())
        })
    }

    #[track_caller]
    pub fn bytes(self, body: impl Into<Vec<u8>>) -> Step {
        let body = body.into();
        M::finish(self.path.push("bytes", vec![json!(body)]), Phase::Send, move |s| {
            s.request_mut()?.body = body;
            Ok(())
        })
    }

    /// Serializes `value` as the body and sets `Content-Type: application/json`.
    #[track_caller]
    pub fn json<T: Serialize>(self, value: T) -> Step {
        let encoded = serde_json::to_value(value);
        let arg = encoded.as_ref().cloned().unwrap_or(serde_json::Value::Null);
        M::finish(self.path.push("json", vec![arg]), Phase::Send, move |s| {
            let value = encoded.map_err(ActionError::other)?;
            let bytes = serde_json::to_vec(&value).map_err(ActionError::other)?;
            let req = s.request_mut()?;
            req.set_header("Content-Type", "application/json");
            req.body = bytes;
            Ok(())
        })
    }
}
