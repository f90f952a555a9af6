use volley_core::{Phase, Step};

/// Groups steps into one; the group expands into its members before anything else runs.
///
/// Members may themselves be groups. Members can be cleared like any other step.
#[track_caller]
pub fn combine(steps: impl IntoIterator<Item = Step>) -> Step {
    let members: Vec<Step> = steps.into_iter().collect();
    Step::new(Phase::Combine, move |s| {
        s.append(members);
        Ok(())
    })
}
