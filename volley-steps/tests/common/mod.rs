#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use volley_steps::{
    Error, HttpClient, HttpError, HttpRequestParts, HttpResponseParts, NoOpEventSink, RunOutcome,
    Runner, RunnerConfig, Step,
};

pub const URL: &str = "http://example.test/users";

// Mock HTTP client that keeps the last request it was asked to send
pub struct MockHttpClient {
    response: HttpResponseParts,
    last: Mutex<Option<HttpRequestParts>>,
}

impl MockHttpClient {
    pub fn new(status: u16, headers: &[(&str, &str)], body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: HttpResponseParts {
                status,
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<BTreeMap<_, _>>(),
                body: body.as_bytes().to_vec(),
            },
            last: Mutex::new(None),
        })
    }

    pub fn json(status: u16, body: &str) -> Arc<Self> {
        Self::new(status, &[("content-type", "application/json")], body)
    }

    pub fn last_request(&self) -> HttpRequestParts {
        self.last
            .lock()
            .unwrap()
            .clone()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
        _max_response_bytes: usize,
    ) -> Result<HttpResponseParts, HttpError> {
        *self.last.lock().unwrap() = Some(req);
        Ok(self.response.clone())
    }
}

// Writer whose contents can be read back after the run dropped its handle
#[derive(Clone, Default)]
pub struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn runner(client: Arc<MockHttpClient>) -> Runner {
    Runner::new(RunnerConfig::default(), client, Arc::new(NoOpEventSink))
}

pub async fn run(client: &Arc<MockHttpClient>, steps: Vec<Step>) -> Result<RunOutcome, Error> {
    runner(client.clone())
        .run_with_output(steps, Box::new(io::sink()))
        .await
}
