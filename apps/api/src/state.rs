use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Carries the page limit, trace switch and layout metrics used by every run.
    pub config: Config,
}
