//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router; every method and path reaches the issue handler
//! - Wire up middleware (request ID, tracing, optional timeout)
//! - Serve on a listener until the shutdown signal fires

use axum::{http::StatusCode, routing::any, Router};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, oneshot};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{FailureMode, GitHubConfig, PullerConfig};
use crate::forwarder::{ForwardResult, IssueForwarder};
use crate::http::handler::issues_handler;
use crate::http::request::UuidRequestId;

/// Application state injected into handlers.
///
/// Immutable after startup; cloning it per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: IssueForwarder,
    pub github: Arc<GitHubConfig>,
    pub failure_mode: FailureMode,
}

/// HTTP server for the issue puller.
pub struct HttpServer {
    router: Router,
    config: PullerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: PullerConfig) -> ForwardResult<Self> {
        let forwarder = IssueForwarder::new(&config.github, &config.timeouts)?;

        let state = AppState {
            forwarder,
            github: Arc::new(config.github.clone()),
            failure_mode: config.failure_mode,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &PullerConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/", any(issues_handler))
            .route("/{*path}", any(issues_handler))
            .with_state(state);

        let router = match config.timeouts.request_secs {
            Some(secs) => router.layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(secs),
            )),
            None => router,
        };

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// Run the server on `listener` until `shutdown` fires.
    ///
    /// In-flight requests get `timeouts.shutdown_grace_secs` to finish;
    /// after that they are abandoned and `run` returns anyway.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        tracing::info!(
            address = %addr,
            org = %self.config.github.org,
            repo = %self.config.github.repo,
            failure_mode = ?self.config.failure_mode,
            "HTTP server starting"
        );

        let (draining_tx, draining) = oneshot::channel();
        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
                let _ = draining_tx.send(());
            })
            .into_future();

        tokio::select! {
            result = serve => result?,
            _ = async {
                match draining.await {
                    Ok(()) => tokio::time::sleep(grace).await,
                    Err(_) => std::future::pending().await,
                }
            } => {
                tracing::warn!(
                    grace_secs = grace.as_secs(),
                    "Drain grace period elapsed; abandoning in-flight requests"
                );
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
