use thiserror::Error;

use crate::diagnostics::Diagnostic;
use crate::http::HttpError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no request was configured before sending; add a request step such as get() or post()")]
    Configuration,
    #[error("http exchange failed: {0}")]
    Transport(#[from] HttpError),
    #[error("{context}: {source}")]
    Action {
        context: Diagnostic,
        #[source]
        source: ActionError,
    },
    #[error("{context}: {source}")]
    RetractionMiscatch {
        context: Diagnostic,
        #[source]
        source: MiscatchError,
    },
    #[error("combine expansion exceeded {limit} steps; a step group probably expands into itself")]
    ExpansionLimit { limit: usize },
}

impl Error {
    pub fn is_miscatch(&self) -> bool {
        matches!(self, Error::RetractionMiscatch { .. })
    }

    /// The diagnostic attached to step failures; system failures carry none.
    pub fn context(&self) -> Option<&Diagnostic> {
        match self {
            Error::Action { context, .. } | Error::RetractionMiscatch { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}

/// Failure reported by a single step action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0}")]
    Failed(String),
    #[error(transparent)]
    Miscatch(#[from] MiscatchError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ActionError {
    pub fn msg(message: impl Into<String>) -> Self {
        ActionError::Failed(message.into())
    }

    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        ActionError::Other(Box::new(err))
    }
}

/// A clear pattern matched none of the steps in the session.
#[derive(Debug, Clone, Error)]
#[error("unable to find a step matching {pattern}; steps present: [{}]", present.join(", "))]
pub struct MiscatchError {
    pub pattern: String,
    pub present: Vec<String>,
}

impl MiscatchError {
    pub fn new(pattern: impl Into<String>, present: Vec<String>) -> Self {
        Self {
            pattern: pattern.into(),
            present,
        }
    }
}
