use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use volley_core::{ActionError, Address, HttpResponseParts, Phase, Step};

use crate::json::{body_json, body_string, json_eq, query, query_first};
use crate::mode::{builder, Check, Mode};

/// Starts an expectation on the response.
pub fn expect() -> Expect<Check> {
    Expect::at(Address::root("expect"))
}

fn ensure(ok: bool, message: impl FnOnce() -> String) -> Result<(), ActionError> {
    if ok {
        Ok(())
    } else {
        Err(ActionError::msg(message()))
    }
}

/// Serializes an expected value up front; the error, if any, surfaces when the step runs.
fn expected_value<T: Serialize>(value: T) -> (JsonValue, Result<JsonValue, ActionError>) {
    match serde_json::to_value(value) {
        Ok(v) => (v.clone(), Ok(v)),
        Err(e) => (JsonValue::Null, Err(ActionError::other(e))),
    }
}

builder!(Expect {});
builder!(ExpectStatus {});
builder!(ExpectHeader { name: String });
builder!(ExpectBody {});
builder!(ExpectBodyString {});
builder!(ExpectBodyJson {});
builder!(ExpectJsonPath { expr: String });

impl<M: Mode> Expect<M> {
    pub fn status(self) -> ExpectStatus<M> {
        ExpectStatus::at(self.path.push("status", vec![]))
    }

    pub fn header(self, name: impl Into<String>) -> ExpectHeader<M> {
        let name = name.into();
        ExpectHeader::at(self.path.push("header", vec![json!(name)]), name)
    }

    pub fn body(self) -> ExpectBody<M> {
        ExpectBody::at(self.path.push("body", vec![]))
    }

    /// Runs `check` against the response.
    #[track_caller]
    pub fn custom<F>(self, check: F) -> Step
    where
        F: FnOnce(&HttpResponseParts) -> Result<(), ActionError> + Send + 'static,
    {
        M::finish(self.path.push("custom", vec![]), Phase::Expect, move |s| {
            check(s.response()?)
        })
    }
}

impl<M: Mode> ExpectStatus<M> {
    #[track_caller]
    pub fn equal(self, code: u16) -> Step {
        M::finish(self.path.push("equal", vec![json!(code)]), Phase::Expect, move |s| {
            let actual = s.response()?.status;
            ensure(actual == code, || format!("expected status {code}, got {actual}"))
        })
    }

    #[track_caller]
    pub fn not_equal(self, code: u16) -> Step {
        M::finish(self.path.push("not_equal", vec![json!(code)]), Phase::Expect, move |s| {
            let actual = s.response()?.status;
            ensure(actual != code, || format!("expected status other than {code}"))
        })
    }

    #[track_caller]
    pub fn one_of(self, codes: impl IntoIterator<Item = u16>) -> Step {
        let codes: Vec<u16> = codes.into_iter().collect();
        let args = codes.iter().map(|c| json!(c)).collect();
        M::finish(self.path.push("one_of", args), Phase::Expect, move |s| {
            let actual = s.response()?.status;
            ensure(codes.contains(&actual), || {
                format!("expected status to be one of {codes:?}, got {actual}")
            })
        })
    }

    /// Inclusive on both ends.
    #[track_caller]
    pub fn between(self, min: u16, max: u16) -> Step {
        M::finish(
            self.path.push("between", vec![json!(min), json!(max)]),
            Phase::Expect,
            move |s| {
                let actual = s.response()?.status;
                ensure((min..=max).contains(&actual), || {
                    format!("expected status between {min} and {max}, got {actual}")
                })
            },
        )
    }
}

impl<M: Mode> ExpectHeader<M> {
    #[track_caller]
    pub fn equal(self, value: impl Into<String>) -> Step {
        let value = value.into();
        let name = self.name;
        M::finish(self.path.push("equal", vec![json!(value)]), Phase::Expect, move |s| {
            let actual = s.response()?.header(&name);
            ensure(actual == Some(value.as_str()), || {
                format!("expected header {name} to be {value:?}, got {actual:?}")
            })
        })
    }

    #[track_caller]
    pub fn contains(self, needle: impl Into<String>) -> Step {
        let needle = needle.into();
        let name = self.name;
        M::finish(self.path.push("contains", vec![json!(needle)]), Phase::Expect, move |s| {
            let actual = s.response()?.header(&name);
            ensure(actual.is_some_and(|v| v.contains(&needle)), || {
                format!("expected header {name} to contain {needle:?}, got {actual:?}")
            })
        })
    }

    #[track_caller]
    pub fn exists(self) -> Step {
        let name = self.name;
        M::finish(self.path.push("exists", vec![]), Phase::Expect, move |s| {
            let present = s.response()?.header(&name).is_some();
            ensure(present, || format!("expected header {name} to be present"))
        })
    }
}

impl<M: Mode> ExpectBody<M> {
    pub fn string(self) -> ExpectBodyString<M> {
        ExpectBodyString::at(self.path.push("string", vec![]))
    }

    pub fn json(self) -> ExpectBodyJson<M> {
        ExpectBodyJson::at(self.path.push("json", vec![]))
    }
}

impl<M: Mode> ExpectBodyString<M> {
    #[track_caller]
    pub fn equal(self, expected: impl Into<String>) -> Step {
        let expected = expected.into();
        M::finish(self.path.push("equal", vec![json!(expected)]), Phase::Expect, move |s| {
            let actual = body_string(s.response()?);
            ensure(actual == expected, || {
                format!("expected body {expected:?}, got {actual:?}")
            })
        })
    }

    #[track_caller]
    pub fn contains(self, needle: impl Into<String>) -> Step {
        let needle = needle.into();
        M::finish(self.path.push("contains", vec![json!(needle)]), Phase::Expect, move |s| {
            let actual = body_string(s.response()?);
            ensure(actual.contains(&needle), || {
                format!("expected body to contain {needle:?}, got {actual:?}")
            })
        })
    }

    /// The body must match the regular expression `pattern` somewhere.
    #[track_caller]
    pub fn matches(self, pattern: impl Into<String>) -> Step {
        let pattern = pattern.into();
        M::finish(self.path.push("matches", vec![json!(pattern)]), Phase::Expect, move |s| {
            let re = Regex::new(&pattern).map_err(ActionError::other)?;
            let actual = body_string(s.response()?);
            ensure(re.is_match(&actual), || {
                format!("expected body to match /{pattern}/, got {actual:?}")
            })
        })
    }
}

impl<M: Mode> ExpectBodyJson<M> {
    #[track_caller]
    pub fn equal<T: Serialize>(self, expected: T) -> Step {
        let (arg, expected) = expected_value(expected);
        M::finish(self.path.push("equal", vec![arg]), Phase::Expect, move |s| {
            let expected = expected?;
            let actual = body_json(s.response()?)?;
            ensure(json_eq(&actual, &expected), || {
                format!("expected body {expected}, got {actual}")
            })
        })
    }

    /// Narrows the expectation to the nodes selected by a JSONPath expression.
    pub fn path(self, expr: impl Into<String>) -> ExpectJsonPath<M> {
        let expr = expr.into();
        ExpectJsonPath::at(self.path.push("path", vec![json!(expr)]), expr)
    }
}

impl<M: Mode> ExpectJsonPath<M> {
    /// Compares the first selected node.
    #[track_caller]
    pub fn equal<T: Serialize>(self, expected: T) -> Step {
        let (arg, expected) = expected_value(expected);
        let expr = self.expr;
        M::finish(self.path.push("equal", vec![arg]), Phase::Expect, move |s| {
            let expected = expected?;
            let body = body_json(s.response()?)?;
            let actual = query_first(&body, &expr)?;
            ensure(json_eq(&actual, &expected), || {
                format!("expected {expr} to be {expected}, got {actual}")
            })
        })
    }

    #[track_caller]
    pub fn exists(self) -> Step {
        let expr = self.expr;
        M::finish(self.path.push("exists", vec![]), Phase::Expect, move |s| {
            let body = body_json(s.response()?)?;
            let found = !query(&body, &expr)?.is_empty();
            ensure(found, || format!("expected {expr} to select at least one value"))
        })
    }
}
