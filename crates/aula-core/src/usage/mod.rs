//! Usage accounting for successful engine calls
//!
//! Events are handed to a [`UsageSink`] on a detached task. The caller never
//! waits for the sink and never sees its errors.

mod event;
mod sink;
mod tracker;

pub use event::{UsageEvent, UsageSummary};
pub use sink::{MemoryUsageSink, TracingUsageSink, UsageSink};
pub use tracker::UsageTracker;

#[cfg(test)]
pub use sink::MockUsageSink;
