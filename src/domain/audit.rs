use {
    super::error::{BackendError, StoreError},
    super::id::RecordId,
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::fmt,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Succeeded,
    BackendError,
    GatewayError,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::BackendError => "backend_error",
            Self::GatewayError => "gateway_error",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for AuditStatus {
    type Error = StoreError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "succeeded" => Ok(Self::Succeeded),
            "backend_error" => Ok(Self::BackendError),
            "gateway_error" => Ok(Self::GatewayError),
            other => Err(StoreError::Serialization(format!(
                "unknown audit status: {other}"
            ))),
        }
    }
}

/// One optimization request and its outcome. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: RecordId,
    /// Submission time. The store may move it forward on append so that
    /// timestamps never decrease in storage order; read it back via `recent`.
    pub created_at: DateTime<Utc>,
    pub payload: serde_json::Value,
    pub response: serde_json::Value,
    pub status: AuditStatus,
}

impl AuditRecord {
    pub fn succeeded(
        id: RecordId,
        created_at: DateTime<Utc>,
        payload: serde_json::Value,
        response: serde_json::Value,
    ) -> Self {
        Self {
            id,
            created_at,
            payload,
            response,
            status: AuditStatus::Succeeded,
        }
    }

    pub fn backend_failed(
        id: RecordId,
        created_at: DateTime<Utc>,
        payload: serde_json::Value,
        err: &BackendError,
    ) -> Self {
        Self {
            id,
            created_at,
            payload,
            response: error_descriptor(err),
            status: AuditStatus::BackendError,
        }
    }
}

/// What gets stored in `response` when the backend call failed.
pub fn error_descriptor(err: &BackendError) -> serde_json::Value {
    let mut descriptor = serde_json::json!({
        "error": err.kind(),
        "message": err.to_string(),
    });
    if let BackendError::Rejected { status, body } = err {
        descriptor["status"] = serde_json::json!(status);
        descriptor["body"] = body.clone();
    }
    descriptor
}
