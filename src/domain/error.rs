use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("optimization backend unreachable: {message}")]
    Unreachable { message: String, timed_out: bool },

    #[error("optimization backend rejected request with status {status}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },

    #[error("optimization backend returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl BackendError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "unreachable",
            Self::Rejected { .. } => "rejected",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }

    /// Human-readable message for the caller.
    pub fn client_message(&self) -> String {
        match self {
            Self::Unreachable { timed_out: true, .. } => {
                "Optimization backend timed out".to_string()
            }
            Self::Unreachable { .. } => "Optimization backend unreachable".to_string(),
            Self::Rejected { status, body } => rejection_message(*status, body),
            Self::MalformedResponse(_) => {
                "Optimization backend returned a malformed response".to_string()
            }
        }
    }
}

/// Prefer the backend's own `error` or `detail` string, fall back to the status.
pub fn rejection_message(status: u16, body: &serde_json::Value) -> String {
    ["error", "detail"]
        .iter()
        .find_map(|key| body.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("backend rejected request with status {status}"))
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o: {0}")]
    Io(#[from] sqlx::Error),

    #[error("store serialization: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request body: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
