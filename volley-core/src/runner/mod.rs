pub mod events;
mod result;
mod scheduler;
mod types;

pub use events::{CompositeEventSink, Event, EventSink, NoOpEventSink, StdoutEventSink};
pub use result::RunOutcome;
pub use scheduler::Runner;
pub use types::RunnerConfig;
