use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::address::Address;
use crate::diagnostics::Origin;
use crate::error::ActionError;
use crate::phase::Phase;
use crate::session::Session;

pub type Action = Box<dyn FnOnce(&mut Session) -> Result<(), ActionError> + Send>;

/// Process-unique step identity. Two steps built from identical calls are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepId(u64);

impl StepId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A deferred, phase-tagged action.
///
/// The action runs at most once; after it ran the step stays in the session as a spent entry.
pub struct Step {
    id: StepId,
    phase: Phase,
    address: Option<Address>,
    origin: Origin,
    action: Option<Action>,
}

impl Step {
    /// Builds a step that cannot be targeted by a clear.
    #[track_caller]
    pub fn new<F>(phase: Phase, action: F) -> Self
    where
        F: FnOnce(&mut Session) -> Result<(), ActionError> + Send + 'static,
    {
        Self {
            id: StepId::next(),
            phase,
            address: None,
            origin: Origin::capture(),
            action: Some(Box::new(action)),
        }
    }

    #[track_caller]
    pub fn addressed<F>(phase: Phase, address: Address, action: F) -> Self
    where
        F: FnOnce(&mut Session) -> Result<(), ActionError> + Send + 'static,
    {
        Self {
            id: StepId::next(),
            phase,
            address: Some(address),
            origin: Origin::capture(),
            action: Some(Box::new(action)),
        }
    }

    pub fn id(&self) -> StepId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_pending(&self) -> bool {
        self.action.is_some()
    }

    /// Runs a step that is not part of the session's step list.
    pub fn run(mut self, session: &mut Session) -> Result<(), ActionError> {
        match self.take_action() {
            Some(action) => action(session),
            None => Err(ActionError::msg("step already ran")),
        }
    }

    pub(crate) fn take_action(&mut self) -> Option<Action> {
        self.action.take()
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("address", &self.address.as_ref().map(Address::render))
            .field("origin", &self.origin.to_string())
            .field("pending", &self.is_pending())
            .finish()
    }
}
