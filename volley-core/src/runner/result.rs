use crate::http::HttpResponseParts;

#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub executed_steps: usize,
    pub retracted_steps: usize,
    pub response: Option<HttpResponseParts>,
}

impl RunOutcome {
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }
}
