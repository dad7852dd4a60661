//! Test doubles shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::api::{ApiError, ApiRequest, ApiResponse, Transport};

type Handler = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, ApiError> + Send + Sync>;

/// In-process server: answers each request with `handler` and keeps a log
/// of everything it was sent.
pub(crate) struct ScriptedTransport {
    handler: Handler,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(
        handler: impl Fn(&ApiRequest) -> Result<ApiResponse, ApiError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, path: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|r| r.path == path).count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        // Let concurrent callers interleave the way real I/O would
        tokio::task::yield_now().await;
        (self.handler)(request)
    }
}

pub(crate) fn json_response(status: u16, body: serde_json::Value) -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse::with_status(status, body.to_string()))
}

pub(crate) fn user_json() -> serde_json::Value {
    json!({"id": 1, "email": "alice@example.com", "role": "user"})
}
