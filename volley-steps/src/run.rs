use std::sync::Arc;

use volley_core::{Error, NoOpEventSink, RunOutcome, Runner, RunnerConfig, Step};

use crate::http::ReqwestHttpClient;

/// A runner with the default configuration, a reqwest client and no event sink.
pub fn runner() -> Runner {
    Runner::new(
        RunnerConfig::default(),
        Arc::new(ReqwestHttpClient::default()),
        Arc::new(NoOpEventSink),
    )
}

/// Runs a script with [`runner()`].
pub async fn run(steps: impl IntoIterator<Item = Step>) -> Result<RunOutcome, Error> {
    runner().run(steps).await
}

/// Like [`run`], but panics with the decorated error.
pub async fn must_run(steps: impl IntoIterator<Item = Step>) -> RunOutcome {
    must_run_with(&runner(), steps).await
}

pub async fn must_run_with(runner: &Runner, steps: impl IntoIterator<Item = Step>) -> RunOutcome {
    match runner.run(steps).await {
        Ok(outcome) => outcome,
        Err(err) => panic!("{err}"),
    }
}

/// Receives the failure of a script run through [`test`].
pub trait TestReporter {
    fn fail(&self, error: &Error);
}

/// Reports failures by panicking, which fails the surrounding `#[test]`.
pub struct PanicReporter;

impl TestReporter for PanicReporter {
    fn fail(&self, error: &Error) {
        panic!("{error}");
    }
}

/// Runs a script and hands any failure to `reporter`; returns whether the script passed.
pub async fn test(reporter: &dyn TestReporter, steps: impl IntoIterator<Item = Step>) -> bool {
    test_with(&runner(), reporter, steps).await
}

pub async fn test_with(
    runner: &Runner,
    reporter: &dyn TestReporter,
    steps: impl IntoIterator<Item = Step>,
) -> bool {
    match runner.run(steps).await {
        Ok(_) => true,
        Err(err) => {
            reporter.fail(&err);
            false
        }
    }
}
