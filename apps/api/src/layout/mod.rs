// CV page layout: height estimation, section splitting, page distribution.
// Pure and synchronous; handlers run it inside tokio::task::spawn_blocking.

pub mod distributor;
pub mod estimator;
pub mod handlers;
pub mod metrics;
pub mod page_fill;
pub mod splitter;
pub mod trace;

// Re-export the public API consumed by other modules (config, state).
pub use distributor::DEFAULT_MAX_PAGES;
pub use metrics::LayoutMetrics;
