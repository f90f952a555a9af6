use std::io::Write;
use std::sync::Arc;

use uuid::Uuid;

use crate::address::Address;
use crate::diagnostics::decorate;
use crate::error::Error;
use crate::http::HttpClient;
use crate::phase::Phase;
use crate::runner::events::{Event, EventSink};
use crate::runner::result::RunOutcome;
use crate::runner::types::RunnerConfig;
use crate::session::Session;
use crate::step::Step;

/// Drives a script through the pre-passes, the six execution phases and the single exchange.
pub struct Runner {
    config: RunnerConfig,
    http: Arc<dyn HttpClient>,
    event_sink: Arc<dyn EventSink>,
}

impl Runner {
    pub fn new(config: RunnerConfig, http: Arc<dyn HttpClient>, event_sink: Arc<dyn EventSink>) -> Self {
        Self { config, http, event_sink }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Runs `steps` in a fresh session whose output goes to stdout.
    pub async fn run(&self, steps: impl IntoIterator<Item = Step>) -> Result<RunOutcome, Error> {
        self.run_with_output(steps, Box::new(std::io::stdout())).await
    }

    pub async fn run_with_output(
        &self,
        steps: impl IntoIterator<Item = Step>,
        output: Box<dyn Write + Send>,
    ) -> Result<RunOutcome, Error> {
        let run_id = Uuid::new_v4();
        let steps: Vec<Step> = steps.into_iter().collect();
        self.emit_run_started(run_id, steps.len()).await;

        let mut session = Session::new(steps, self.http.clone(), output);
        let result = self.drive(run_id, &mut session).await;

        self.emit_run_finished(run_id, result.is_ok()).await;
        result
    }

    async fn drive(&self, run_id: Uuid, session: &mut Session) -> Result<RunOutcome, Error> {
        let mut executed = 0;

        for phase in Phase::PRE_PASSES {
            executed += self.run_phase(run_id, session, phase).await?;
        }

        for phase in Phase::BEFORE_EXCHANGE {
            executed += self.run_phase(run_id, session, phase).await?;
            if phase == Phase::BeforeSend && session.request().is_none() {
                return Err(Error::Configuration);
            }
        }

        self.exchange(run_id, session).await?;

        for phase in Phase::AFTER_EXCHANGE {
            executed += self.run_phase(run_id, session, phase).await?;
        }

        Ok(RunOutcome {
            executed_steps: executed,
            retracted_steps: session.removed(),
            response: session.take_response(),
        })
    }

    /// Runs every pending step tagged `phase`, including steps enqueued while the phase runs.
    ///
    /// The pending queue is a snapshot of step identities. Whenever a step changes the length
    /// of the step list the queue is rebuilt from the live list, so newly appended steps of
    /// this phase run after the already scheduled ones and spent steps are never re-run.
    async fn run_phase(&self, run_id: Uuid, session: &mut Session, phase: Phase) -> Result<usize, Error> {
        self.event_sink.emit(Event::PhaseStarted { run_id, phase }).await;

        let mut pending = session.pending_ids(phase);
        let mut executed = 0;

        while let Some(id) = pending.pop_front() {
            if phase == Phase::Combine && executed >= self.config.max_combine_expansions {
                tracing::warn!(limit = self.config.max_combine_expansions, "combine expansion limit reached");
                return Err(Error::ExpansionLimit {
                    limit: self.config.max_combine_expansions,
                });
            }

            let len_before = session.len();
            let Some((action, origin, address)) = session.take_action(id) else {
                continue;
            };
            let step = address.as_ref().map(Address::render);
            tracing::debug!(%phase, step = step.as_deref().unwrap_or("-"), %origin, "running step");

            let result = action(session);
            executed += 1;

            match result {
                Ok(()) => {
                    self.event_sink
                        .emit(Event::StepSucceeded { run_id, phase, step })
                        .await;
                }
                Err(err) => {
                    self.event_sink
                        .emit(Event::StepFailed {
                            run_id,
                            phase,
                            step,
                            message: err.to_string(),
                        })
                        .await;
                    return Err(decorate(origin, address.as_ref(), &session.description, err));
                }
            }

            if session.len() != len_before {
                pending = session.pending_ids(phase);
            }
        }

        Ok(executed)
    }

    async fn exchange(&self, run_id: Uuid, session: &mut Session) -> Result<(), Error> {
        let request = session.request().cloned().ok_or(Error::Configuration)?;
        let client = session.client.clone();
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = client
            .send(request, self.config.timeout, self.config.max_response_bytes)
            .await?;

        self.event_sink
            .emit(Event::ExchangeFinished {
                run_id,
                status: response.status,
            })
            .await;
        session.set_response(response);
        Ok(())
    }

    async fn emit_run_started(&self, run_id: Uuid, steps: usize) {
        self.event_sink
            .emit(Event::RunStarted { run_id, steps })
            .await;
    }

    async fn emit_run_finished(&self, run_id: Uuid, succeeded: bool) {
        self.event_sink
            .emit(Event::RunFinished { run_id, succeeded })
            .await;
    }
}
