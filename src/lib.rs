pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {
    domain::backend::OptimizationBackend, infra::sqlite::audit_repo::AuditStore, std::sync::Arc,
};

#[derive(Clone)]
pub struct AppState {
    pub store: AuditStore,
    pub backend: Arc<dyn OptimizationBackend>,
}
