use crate::address::Address;
use crate::error::MiscatchError;
use crate::phase::Phase;
use crate::session::Session;
use crate::step::{Step, StepId};

/// Removes every step in the session whose address has `pattern` as a prefix.
///
/// The whole step list is searched, so steps appended after the clear are eligible too.
/// Matching nothing is an error; the error lists the addresses a clear could have targeted.
pub fn retract(session: &mut Session, pattern: &Address) -> Result<usize, MiscatchError> {
    let ids: Vec<StepId> = session
        .steps()
        .iter()
        .filter(|s| s.address().is_some_and(|a| a.matches(pattern)))
        .map(Step::id)
        .collect();

    if ids.is_empty() {
        let present = session
            .steps()
            .iter()
            .filter(|s| s.phase() != Phase::Clean)
            .filter_map(Step::address)
            .map(Address::render)
            .collect();
        return Err(MiscatchError::new(pattern.render(), present));
    }

    let removed = session.remove_by_identity(&ids);
    tracing::debug!(pattern = %pattern, removed, "retracted steps");
    Ok(removed)
}
