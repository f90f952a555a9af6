use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};
use volley_core::{ActionError, Address, Phase, Step};

use crate::json::{body_json, body_string, query_first};

/// Shared cell a store step writes into; read it after the run returns.
pub struct Slot<T> {
    inner: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Slot<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set(&self, value: T) {
        *self.lock() = Some(value);
    }

    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    pub fn is_set(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self) -> Option<T> {
        self.lock().clone()
    }
}

/// Starts copying a part of the response into a [`Slot`].
pub fn store() -> Store {
    Store {
        path: Address::root("store"),
    }
}

pub struct Store {
    path: Address,
}

pub struct StoreResponse {
    path: Address,
}

pub struct StoreStatus {
    path: Address,
}

pub struct StoreHeader {
    path: Address,
    name: String,
}

pub struct StoreBody {
    path: Address,
}

pub struct StoreBodyString {
    path: Address,
}

pub struct StoreBodyJson {
    path: Address,
}

pub struct StoreJsonPath {
    path: Address,
    expr: String,
}

#[track_caller]
fn store_step<F>(path: Address, write: F) -> Step
where
    F: FnOnce(&volley_core::HttpResponseParts) -> Result<(), ActionError> + Send + 'static,
{
    Step::addressed(Phase::Expect, path.push("into_slot", vec![]), move |s| {
        write(s.response()?)
    })
}

fn deserialize<T: DeserializeOwned>(value: JsonValue) -> Result<T, ActionError> {
    serde_json::from_value(value)
        .map_err(|e| ActionError::msg(format!("unable to convert stored value: {e}")))
}

impl Store {
    pub fn response(self) -> StoreResponse {
        StoreResponse {
            path: self.path.push("response", vec![]),
        }
    }
}

impl StoreResponse {
    pub fn status(self) -> StoreStatus {
        StoreStatus {
            path: self.path.push("status", vec![]),
        }
    }

    pub fn header(self, name: impl Into<String>) -> StoreHeader {
        let name = name.into();
        StoreHeader {
            path: self.path.push("header", vec![json!(name)]),
            name,
        }
    }

    pub fn body(self) -> StoreBody {
        StoreBody {
            path: self.path.push("body", vec![]),
        }
    }
}

impl StoreStatus {
    #[track_caller]
    pub fn into_slot(self, slot: &Slot<u16>) -> Step {
        let slot = slot.clone();
        store_step(self.path, move |resp| {
            slot.set(resp.status);
            Ok(())
        })
    }
}

impl StoreHeader {
    /// Fails when the response has no such header.
    #[track_caller]
    pub fn into_slot(self, slot: &Slot<String>) -> Step {
        let slot = slot.clone();
        let name = self.name;
        store_step(self.path, move |resp| {
            let value = resp
                .header(&name)
                .ok_or_else(|| ActionError::msg(format!("response has no header {name}")))?;
            slot.set(value.to_string());
            Ok(())
        })
    }
}

impl StoreBody {
    pub fn string(self) -> StoreBodyString {
        StoreBodyString {
            path: self.path.push("string", vec![]),
        }
    }

    pub fn json(self) -> StoreBodyJson {
        StoreBodyJson {
            path: self.path.push("json", vec![]),
        }
    }
}

impl StoreBodyString {
    #[track_caller]
    pub fn into_slot(self, slot: &Slot<String>) -> Step {
        let slot = slot.clone();
        store_step(self.path, move |resp| {
            slot.set(body_string(resp));
            Ok(())
        })
    }
}

impl StoreBodyJson {
    pub fn path(self, expr: impl Into<String>) -> StoreJsonPath {
        let expr = expr.into();
        StoreJsonPath {
            path: self.path.push("path", vec![json!(expr)]),
            expr,
        }
    }

    /// Deserializes the whole body into `T`.
    #[track_caller]
    pub fn into_slot<T>(self, slot: &Slot<T>) -> Step
    where
        T: DeserializeOwned + Send + 'static,
    {
        let slot = slot.clone();
        store_step(self.path, move |resp| {
            slot.set(deserialize(body_json(resp)?)?);
            Ok(())
        })
    }
}

impl StoreJsonPath {
    /// Deserializes the first node selected by the path into `T`.
    #[track_caller]
    pub fn into_slot<T>(self, slot: &Slot<T>) -> Step
    where
        T: DeserializeOwned + Send + 'static,
    {
        let slot = slot.clone();
        let expr = self.expr;
        store_step(self.path, move |resp| {
            let body = body_json(resp)?;
            slot.set(deserialize(query_first(&body, &expr)?)?);
            Ok(())
        })
    }
}
