//! Response construction for the issue handler.
//!
//! # Responsibilities
//! - Relay the upstream body byte-for-byte
//! - Map forwarder failures to a response according to the failure mode
//!
//! # Design Decisions
//! - No content-type or other header is added to relayed bodies
//! - Silent mode answers failures with an empty body and the default status
//! - Surface mode answers failures with 502 and a small JSON error object

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;

use crate::config::FailureMode;
use crate::forwarder::ForwardError;

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    kind: &'a str,
    message: String,
}

/// Relay an upstream body.
///
/// In silent mode the status stays at the default; in surface mode the
/// upstream status is relayed with it.
pub fn relay(body: Bytes, upstream_status: StatusCode, mode: FailureMode) -> Response {
    let mut response = Response::new(Body::from(body));
    if mode == FailureMode::Surface {
        *response.status_mut() = upstream_status;
    }
    response
}

/// Build the caller-facing response for a forwarder failure.
pub fn failure(err: &ForwardError, mode: FailureMode) -> Response {
    match mode {
        FailureMode::Silent => Response::new(Body::empty()),
        FailureMode::Surface => {
            let body = ErrorBody {
                error: ErrorDetail {
                    kind: err.kind(),
                    message: err.to_string(),
                },
            };
            let bytes = serde_json::to_vec(&body).unwrap_or_default();
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = StatusCode::BAD_GATEWAY;
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            response
        }
    }
}
