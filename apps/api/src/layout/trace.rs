//! Diagnostic hook for distribution runs.
//!
//! The distributor reports its progress as `TraceEvent`s to an optional
//! `DistributionTrace`. `TracingTrace` forwards them to `tracing` at debug level.

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStage {
    Start,
    ZonesPartitioned,
    SectionSkipped,
    SectionPlaced,
    PageFlushed,
    Truncated,
    Complete,
}

/// Number of sections assigned to each column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneCounts {
    pub main: usize,
    pub sidebar: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceEvent<'a> {
    pub stage: TraceStage,
    /// Section ids involved in this stage (all sections for Start/Complete).
    pub sections: &'a [Uuid],
    pub zones: Option<ZoneCounts>,
}

pub trait DistributionTrace {
    fn record(&self, event: &TraceEvent<'_>);
}

/// Writes every event to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTrace;

impl DistributionTrace for TracingTrace {
    fn record(&self, event: &TraceEvent<'_>) {
        match event.zones {
            Some(z) => debug!(
                stage = ?event.stage,
                sections = event.sections.len(),
                main = z.main,
                sidebar = z.sidebar,
                "Page distribution"
            ),
            None => debug!(
                stage = ?event.stage,
                sections = ?event.sections,
                "Page distribution"
            ),
        }
    }
}
