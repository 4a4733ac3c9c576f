use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{audit::AuditRecord, error::GatewayError},
        services::gateway,
    },
    axum::{
        Json, Router,
        extract::{DefaultBodyLimit, State, rejection::JsonRejection},
        http::{HeaderValue, StatusCode},
        response::{IntoResponse, Response},
        routing::{get, post},
    },
    tower_http::{cors::CorsLayer, trace::TraceLayer},
};

/// Optimization requests are a handful of stops; 1 MiB is generous.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Response header carrying the id of the audit record for `/optimize`.
pub const RECORD_ID_HEADER: &str = "x-audit-record-id";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/optimize", post(optimize))
        .route("/history", get(history))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn optimize(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = body.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    if !payload.is_object() {
        return Err(GatewayError::InvalidRequest("expected a JSON object".into()).into());
    }

    let submission = gateway::spawn_submission(state.store, state.backend, payload).await?;
    let record_id = HeaderValue::from_str(submission.id.as_str())
        .map_err(|e| GatewayError::Internal(e.to_string()))?;

    let mut response = match submission.outcome {
        Ok(reply) => {
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
            (status, Json(reply.body)).into_response()
        }
        Err(err) => ApiError::from(err).into_response(),
    };
    response.headers_mut().insert(RECORD_ID_HEADER, record_id);
    Ok(response)
}

pub async fn history(State(state): State<AppState>) -> Result<Json<Vec<AuditRecord>>, ApiError> {
    let records = gateway::history(&state.store).await?;
    Ok(Json(records))
}
