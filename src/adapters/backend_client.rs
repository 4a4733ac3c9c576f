use {
    crate::domain::{
        backend::{BackendReply, OptimizationBackend},
        error::BackendError,
    },
    std::{future::Future, pin::Pin, time::Duration},
};

/// Forwards optimization requests to `{base_url}/optimize` over HTTP.
pub struct HttpBackendClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/optimize", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl OptimizationBackend for HttpBackendClient {
    fn submit<'a>(
        &'a self,
        payload: &'a serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<BackendReply, BackendError>> + Send + 'a>> {
        Box::pin(async move { self.submit_inner(payload).await })
    }
}

impl HttpBackendClient {
    async fn submit_inner(&self, payload: &serde_json::Value) -> Result<BackendReply, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;

        if status.is_success() {
            let body = serde_json::from_slice(&bytes)
                .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;
            Ok(BackendReply {
                status: status.as_u16(),
                body,
            })
        } else {
            // Only a structured error body counts as a rejection.
            let body = serde_json::from_slice(&bytes).map_err(|e| {
                BackendError::MalformedResponse(format!("status {}: {e}", status.as_u16()))
            })?;
            Err(BackendError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn transport_error(err: reqwest::Error) -> BackendError {
    BackendError::Unreachable {
        timed_out: err.is_timeout(),
        message: err.to_string(),
    }
}
