//! Outbound GitHub issue-listing call.
//!
//! # Data Flow
//! ```text
//! (org, repo, token)
//!     → client.rs (URL template, two headers, one GET)
//!     → raw response bytes, status untouched
//!     → types.rs (UpstreamResponse / ForwardError)
//! ```
//!
//! # Design Decisions
//! - No retries, no pagination, no payload parsing
//! - The remote status is reported but never turned into an error here
//! - Every failure before a complete body is a transport error

pub mod client;
pub mod types;

pub use client::{bearer, issues_url, IssueForwarder, GITHUB_MEDIA_TYPE};
pub use types::{ForwardError, ForwardResult, UpstreamResponse};
