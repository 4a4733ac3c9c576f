use crate::domain::error::{BackendError, GatewayError, StoreError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

// Newtype so the domain errors can be turned into axum responses.
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        Self(GatewayError::Backend(err))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(GatewayError::Store(err))
    }
}

/// Caller-visible status for a failed backend call.
pub fn backend_status(err: &BackendError) -> StatusCode {
    match err {
        BackendError::Rejected { .. } => StatusCode::BAD_REQUEST,
        BackendError::Unreachable {
            timed_out: true, ..
        } => StatusCode::GATEWAY_TIMEOUT,
        BackendError::Unreachable { .. } | BackendError::MalformedResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            GatewayError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": "Invalid request body", "detail": msg }),
            ),
            GatewayError::Backend(err) => {
                let detail = match err {
                    BackendError::Rejected { body, .. } => body.clone(),
                    other => serde_json::Value::String(other.to_string()),
                };
                (
                    backend_status(err),
                    serde_json::json!({ "error": err.client_message(), "detail": detail }),
                )
            }
            GatewayError::Store(err) => {
                tracing::error!("audit store error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "Audit store unavailable", "detail": err.to_string() }),
                )
            }
            GatewayError::Internal(msg) => {
                tracing::error!("internal gateway error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "Gateway error", "detail": msg }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
