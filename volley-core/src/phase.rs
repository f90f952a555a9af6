use std::fmt;

/// When a step runs relative to the single network exchange.
///
/// `Combine` and `Clean` are pre-passes that run before any request is built. The remaining
/// six phases are ordered; the exchange happens between `AfterSend` and `BeforeExpect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Combine,
    Clean,
    BeforeSend,
    Send,
    AfterSend,
    BeforeExpect,
    Expect,
    AfterExpect,
}

impl Phase {
    pub const PRE_PASSES: [Phase; 2] = [Phase::Combine, Phase::Clean];
    pub const BEFORE_EXCHANGE: [Phase; 3] = [Phase::BeforeSend, Phase::Send, Phase::AfterSend];
    pub const AFTER_EXCHANGE: [Phase; 3] =
        [Phase::BeforeExpect, Phase::Expect, Phase::AfterExpect];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Combine => "combine",
            Phase::Clean => "clean",
            Phase::BeforeSend => "before_send",
            Phase::Send => "send",
            Phase::AfterSend => "after_send",
            Phase::BeforeExpect => "before_expect",
            Phase::Expect => "expect",
            Phase::AfterExpect => "after_expect",
        }
    }

    pub fn is_pre_pass(&self) -> bool {
        matches!(self, Phase::Combine | Phase::Clean)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
