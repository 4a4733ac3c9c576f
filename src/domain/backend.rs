use {
    super::error::BackendError,
    std::{future::Future, pin::Pin},
};

/// A 2xx reply from the optimization backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    pub status: u16,
    pub body: serde_json::Value,
}

/// The external computation service. Stateless; no retries.
pub trait OptimizationBackend: Send + Sync {
    fn submit<'a>(
        &'a self,
        payload: &'a serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<BackendReply, BackendError>> + Send + 'a>>;
}
