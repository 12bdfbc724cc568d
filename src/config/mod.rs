//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (overlay GITHUB_* environment variables)
//!     → validation.rs (semantic checks)
//!     → PullerConfig (validated, immutable)
//!     → injected into the HTTP server state at startup
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup; handlers never read the environment
//! - All fields have defaults to allow minimal configs
//! - The repository triple is passed through unvalidated

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    FailureMode, GitHubConfig, ListenerConfig, LogFormat, ObservabilityConfig, PullerConfig,
    TimeoutConfig, WatcherConfig,
};
