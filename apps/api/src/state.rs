use crate::config::Config;
use crate::sonar_client::SonarClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sonar: SonarClient,
    pub config: Config,
}
