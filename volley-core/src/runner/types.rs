use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Passed to the HTTP client for the exchange.
    pub timeout: Duration,
    pub max_response_bytes: usize,
    /// Upper bound on combine steps executed in one run.
    pub max_combine_expansions: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_response_bytes: 4 * 1024 * 1024,
            max_combine_expansions: 10_000,
        }
    }
}
