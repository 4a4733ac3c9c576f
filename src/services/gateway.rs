use {
    crate::domain::{
        audit::{AuditRecord, AuditStatus},
        backend::{BackendReply, OptimizationBackend},
        error::{BackendError, GatewayError, StoreError},
        id::RecordId,
    },
    crate::infra::sqlite::audit_repo::AuditStore,
    chrono::Utc,
    std::sync::Arc,
};

/// Upper bound on records returned by the history query.
pub const HISTORY_LIMIT: usize = 20;

/// Result of one forwarded optimization request.
#[derive(Debug)]
pub struct Submission {
    pub id: RecordId,
    pub status: AuditStatus,
    /// Whether the audit record made it to the store.
    pub recorded: bool,
    pub outcome: Result<BackendReply, BackendError>,
}

/// Forward `payload` to the backend, then append the outcome to the audit log.
///
/// A store failure never masks the backend's answer: it is logged and the
/// submission is reported with `recorded == false`.
pub async fn process_optimization(
    store: &AuditStore,
    backend: &dyn OptimizationBackend,
    payload: serde_json::Value,
) -> Submission {
    let id = RecordId::generate();
    let created_at = Utc::now();

    tracing::debug!(record_id = %id, "forwarding optimization request");
    let outcome = backend.submit(&payload).await;

    let record = match &outcome {
        Ok(reply) => AuditRecord::succeeded(id.clone(), created_at, payload, reply.body.clone()),
        Err(err) => {
            tracing::warn!(record_id = %id, kind = err.kind(), error = %err, "backend call failed");
            AuditRecord::backend_failed(id.clone(), created_at, payload, err)
        }
    };

    match store.append(&record).await {
        Ok(()) => {
            tracing::info!(record_id = %id, status = %record.status, "audit record appended");
            Submission {
                id,
                status: record.status,
                recorded: true,
                outcome,
            }
        }
        Err(err) => {
            // Backend succeeded but the write did not: the outcome is gateway_error.
            let status = match record.status {
                AuditStatus::Succeeded => AuditStatus::GatewayError,
                other => other,
            };
            tracing::error!(
                record_id = %id,
                status = %status,
                error = %err,
                "failed to append audit record"
            );
            Submission {
                id,
                status,
                recorded: false,
                outcome,
            }
        }
    }
}

/// Runs [`process_optimization`] on its own task so a caller disconnect
/// cannot abort the backend call or the audit append.
pub async fn spawn_submission(
    store: AuditStore,
    backend: Arc<dyn OptimizationBackend>,
    payload: serde_json::Value,
) -> Result<Submission, GatewayError> {
    tokio::spawn(async move { process_optimization(&store, &*backend, payload).await })
        .await
        .map_err(|e| GatewayError::Internal(e.to_string()))
}

pub async fn history(store: &AuditStore) -> Result<Vec<AuditRecord>, StoreError> {
    store.recent(HISTORY_LIMIT).await
}
