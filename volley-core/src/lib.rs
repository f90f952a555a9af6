#![forbid(unsafe_code)]

//! Execution core for declarative HTTP test scripts.
//!
//! A script is a flat list of [`Step`]s. The [`Runner`] expands combine steps, applies clear
//! steps against the whole list, then runs the remaining steps phase by phase around a single
//! request/response exchange.

pub mod address;
pub mod diagnostics;
pub mod error;
pub mod http;
pub mod phase;
pub mod retract;
pub mod runner;
pub mod session;
pub mod step;

pub use crate::address::{Address, Segment};
pub use crate::diagnostics::{Diagnostic, Origin};
pub use crate::error::{ActionError, Error, MiscatchError};
pub use crate::http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts};
pub use crate::phase::Phase;
pub use crate::retract::retract;
pub use crate::runner::{
    CompositeEventSink, Event, EventSink, NoOpEventSink, RunOutcome, Runner, RunnerConfig,
    StdoutEventSink,
};
pub use crate::session::Session;
pub use crate::step::{Action, Step, StepId};
