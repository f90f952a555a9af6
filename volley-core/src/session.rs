use std::collections::VecDeque;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use crate::address::Address;
use crate::diagnostics::Origin;
use crate::error::ActionError;
use crate::http::{HttpClient, HttpRequestParts, HttpResponseParts};
use crate::phase::Phase;
use crate::step::{Action, Step, StepId};

/// State of one run: the live step list plus everything step actions read and write.
///
/// A session is created by the runner for a single call and dropped when that call returns.
pub struct Session {
    steps: Vec<Step>,
    request: Option<HttpRequestParts>,
    response: Option<HttpResponseParts>,
    pub client: Arc<dyn HttpClient>,
    pub output: Box<dyn Write + Send>,
    pub description: String,
    removed: usize,
}

impl Session {
    pub fn new(steps: Vec<Step>, client: Arc<dyn HttpClient>, output: Box<dyn Write + Send>) -> Self {
        Self {
            steps,
            request: None,
            response: None,
            client,
            output,
            description: String::new(),
            removed: 0,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn append(&mut self, steps: impl IntoIterator<Item = Step>) {
        self.steps.extend(steps);
    }

    /// Removes the steps with the given identities and returns how many were removed.
    pub fn remove_by_identity(&mut self, ids: &[StepId]) -> usize {
        let before = self.steps.len();
        self.steps.retain(|s| !ids.contains(&s.id()));
        let removed = before - self.steps.len();
        self.removed += removed;
        removed
    }

    /// Total number of steps removed from this session so far.
    pub fn removed(&self) -> usize {
        self.removed
    }

    pub fn request(&self) -> Option<&HttpRequestParts> {
        self.request.as_ref()
    }

    pub fn request_mut(&mut self) -> Result<&mut HttpRequestParts, ActionError> {
        self.request
            .as_mut()
            .ok_or_else(|| ActionError::msg("no request configured; add get(), post() or method() first"))
    }

    pub fn set_request(&mut self, request: HttpRequestParts) {
        self.request = Some(request);
    }

    pub fn response(&self) -> Result<&HttpResponseParts, ActionError> {
        self.response
            .as_ref()
            .ok_or_else(|| ActionError::msg("no response available; the request has not been sent yet"))
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    pub fn set_response(&mut self, response: HttpResponseParts) {
        self.response = Some(response);
    }

    pub(crate) fn take_response(&mut self) -> Option<HttpResponseParts> {
        self.response.take()
    }

    /// Identities of not-yet-run steps tagged `phase`, in list order.
    pub(crate) fn pending_ids(&self, phase: Phase) -> VecDeque<StepId> {
        self.steps
            .iter()
            .filter(|s| s.phase() == phase && s.is_pending())
            .map(Step::id)
            .collect()
    }

    /// Takes the action out of the step with `id`, leaving the spent step in place.
    pub(crate) fn take_action(&mut self, id: StepId) -> Option<(Action, Origin, Option<Address>)> {
        let step = self.steps.iter_mut().find(|s| s.id() == id)?;
        let action = step.take_action()?;
        Some((action, step.origin(), step.address().cloned()))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("steps", &self.steps)
            .field("request", &self.request)
            .field("response", &self.response)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
