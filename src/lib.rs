//! Issue puller: relays a repository's GitHub issue listing over HTTP.

pub mod config;
pub mod forwarder;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod watcher;

pub use config::PullerConfig;
pub use forwarder::IssueForwarder;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
