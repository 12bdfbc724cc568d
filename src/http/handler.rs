//! The issue handler: one inbound request, one outbound GitHub call.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::Response;
use std::time::Instant;

use crate::http::request::RequestIdExt;
use crate::http::response::{failure, relay};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Forward to GitHub and relay the body.
///
/// Method, path, headers and body of the incoming request are ignored.
/// The repository triple comes from the configuration injected at startup.
pub async fn issues_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request.request_id().to_owned();
    let github = &state.github;

    tracing::debug!(
        request_id = %request_id,
        org = %github.org,
        repo = %github.repo,
        "Pulling issues"
    );

    match state
        .forwarder
        .fetch(&github.org, &github.repo, &github.token)
        .await
    {
        Ok(upstream) => {
            metrics::record_upstream(upstream.status.as_u16(), start);
            if !upstream.status.is_success() {
                tracing::debug!(
                    request_id = %request_id,
                    status = %upstream.status,
                    "Relaying non-success upstream body"
                );
            }
            relay(upstream.body, upstream.status, state.failure_mode)
        }
        Err(e) => {
            metrics::record_failure(e.kind(), start);
            tracing::error!(
                request_id = %request_id,
                kind = e.kind(),
                error = %e,
                "Failed to pull issues"
            );
            failure(&e, state.failure_mode)
        }
    }
}
