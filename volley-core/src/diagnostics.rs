use std::fmt;
use std::panic::Location;

use crate::address::Address;
use crate::error::{ActionError, Error};

/// Where in user code a step was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    location: &'static Location<'static>,
}

impl Origin {
    #[track_caller]
    pub fn capture() -> Self {
        Self {
            location: Location::caller(),
        }
    }

    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    pub fn line(&self) -> u32 {
        self.location.line()
    }

    pub fn column(&self) -> u32 {
        self.location.column()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file(), self.line(), self.column())
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub origin: Origin,
    pub step: Option<String>,
    pub description: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)?;
        if let Some(step) = &self.step {
            write!(f, ": {step}")?;
        }
        if let Some(desc) = &self.description {
            write!(f, " ({desc})")?;
        }
        Ok(())
    }
}

/// Attaches the failing step's origin, address and the run description to a raw action error.
pub fn decorate(
    origin: Origin,
    address: Option<&Address>,
    description: &str,
    err: ActionError,
) -> Error {
    let context = Diagnostic {
        origin,
        step: address.map(Address::render),
        description: (!description.is_empty()).then(|| description.to_string()),
    };
    match err {
        ActionError::Miscatch(source) => Error::RetractionMiscatch { context, source },
        source => Error::Action { context, source },
    }
}
