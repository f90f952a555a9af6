#![forbid(unsafe_code)]

//! Step builders for declarative HTTP test scripts.
//!
//! ```no_run
//! use volley_steps::{expect, get, must_run, send, steps};
//!
//! # async fn demo() {
//! must_run(steps![
//!     get("https://example.com/users"),
//!     send().header("Accept").add("application/json"),
//!     expect().status().equal(200),
//!     expect().body().json().path("$.users").exists(),
//! ])
//! .await;
//! # }
//! ```
//!
//! Steps can be withdrawn before anything runs with [`clear()`], which takes the same builder
//! chain as [`expect()`] and [`send()`]. A clear applies to the whole script, including steps
//! listed after it, so replace a check by clearing it with its exact arguments:
//!
//! ```no_run
//! use volley_steps::{clear, expect, get, must_run, steps};
//!
//! # async fn demo() {
//! must_run(steps![
//!     get("https://example.com/missing"),
//!     expect().status().equal(200),
//!     clear().expect().status().equal(200),
//!     expect().status().equal(404),
//! ])
//! .await;
//! # }
//! ```
//!
//! A clear that stops partway, such as `clear().expect().status()`, removes every status
//! expectation in the script.

mod mode;

pub mod clear;
pub mod combine;
pub mod debug;
pub mod expect;
pub mod http;
pub mod json;
pub mod request;
pub mod run;
pub mod send;
pub mod store;

pub use volley_core::{
    ActionError, Address, Error, Event, EventSink, HttpClient, HttpError, HttpRequestParts,
    HttpResponseParts, MiscatchError, NoOpEventSink, Phase, RunOutcome, Runner, RunnerConfig,
    Session, Step, StdoutEventSink,
};

pub use crate::clear::{clear, ClearRoot};
pub use crate::combine::combine;
pub use crate::debug::{debug, DebugOutput};
pub use crate::expect::{
    expect, Expect, ExpectBody, ExpectBodyJson, ExpectBodyString, ExpectHeader, ExpectJsonPath,
    ExpectStatus,
};
pub use crate::http::ReqwestHttpClient;
pub use crate::mode::{Check, Clear, Mode};
pub use crate::request::{delete, description, get, head, http_client, method, options, patch, post, put};
pub use crate::run::{must_run, must_run_with, run, runner, test, test_with, PanicReporter, TestReporter};
pub use crate::send::{send, SendBody, SendHeader, SendQuery, SendRequest};
pub use crate::store::{
    store, Slot, Store, StoreBody, StoreBodyJson, StoreBodyString, StoreHeader, StoreJsonPath,
    StoreResponse, StoreStatus,
};

/// Builds a script from anything convertible into a [`Step`].
///
/// Terminal builder calls already return steps; intermediate `clear()` chains and `debug()`
/// convert on the way in.
#[macro_export]
macro_rules! steps {
    ($($step:expr),* $(,)?) => {
        ::std::vec![$($crate::Step::from($step)),*]
    };
}
