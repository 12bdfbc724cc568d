//! Inbound request identification.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID when the caller did not send one
//! - Read the request ID back for log correlation
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The incoming request is otherwise ignored by the handler

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId as TowerRequestId};
use uuid::Uuid;

/// Header carrying the request ID, in and out.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates a fresh UUID v4 per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<TowerRequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(TowerRequestId::new)
    }
}

/// Access to the request ID of a request.
pub trait RequestIdExt {
    /// The request ID, or `"unknown"` when absent or not valid UTF-8.
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(&X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}
