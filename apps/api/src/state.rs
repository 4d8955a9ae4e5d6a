use std::sync::Arc;

use crate::auth::CredentialVerifier;
use crate::query::QueryExecutor;

/// Shared application state injected into the gate and handler via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Statement runner over the process-wide pool. The only shared resource.
    pub executor: Arc<dyn QueryExecutor>,
    pub verifier: Arc<dyn CredentialVerifier>,
}
