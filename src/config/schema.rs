//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults so an empty file (or no file) is valid.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration for the issue puller.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PullerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream GitHub repository and credentials.
    pub github: GitHubConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// How handler failures are reported to callers.
    pub failure_mode: FailureMode,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Issue watcher settings (`watch` subcommand).
    pub watcher: WatcherConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// The repository whose issues are pulled, and the token used to pull them.
///
/// None of these values are validated. Empty strings are substituted into
/// the URL and the `Authorization` header as they are.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Organization or user owning the repository.
    pub org: String,

    /// Repository name.
    pub repo: String,

    /// Bearer token.
    pub token: String,

    /// API root the issue path is appended to.
    pub api_base_url: String,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` for the outbound call.
    pub use_system_proxy: bool,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            org: String::new(),
            repo: String::new(),
            token: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            use_system_proxy: true,
        }
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("org", &self.org)
            .field("repo", &self.repo)
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("api_base_url", &self.api_base_url)
            .field("use_system_proxy", &self.use_system_proxy)
            .finish()
    }
}

/// Public GitHub REST API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Timeout configuration.
///
/// The request timeouts are off unless set: a hung upstream stalls only the
/// invocation waiting on it. The shutdown grace period always applies, so
/// such an invocation cannot keep the process alive after shutdown.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for the outbound GitHub call, in seconds.
    pub upstream_secs: Option<u64>,

    /// Total time allowed for an inbound request, in seconds.
    pub request_secs: Option<u64>,

    /// How long in-flight requests may drain after shutdown, in seconds.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_secs: None,
            request_secs: None,
            shutdown_grace_secs: 10,
        }
    }
}

/// Failure reporting policy of the handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Log the error and answer with an empty body and the default status.
    /// The remote status code is never relayed.
    #[default]
    Silent,

    /// Answer transport failures with `502` and a JSON error body, and relay
    /// the remote status code alongside the remote body.
    Surface,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when `RUST_LOG` is not set (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: SocketAddr,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: SocketAddr::from(([0, 0, 0, 0], 9090)),
        }
    }
}

/// Issue watcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Puller endpoint to poll.
    pub source_url: String,

    /// Polling period in milliseconds.
    pub period_ms: u64,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` for polling and labeling.
    pub use_system_proxy: bool,

    /// Add a label to new or modified issues whose body carries a
    /// `/kind <name>` command. Uses `github.token`.
    pub label_issues: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            source_url: "http://127.0.0.1:8080".to_string(),
            period_ms: 30_000,
            use_system_proxy: true,
            label_issues: false,
        }
    }
}
