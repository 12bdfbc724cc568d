//! Issue watcher: polls a puller endpoint and reports new or modified issues.
//!
//! # Data Flow
//! ```text
//! timer (period)
//!     → monitor.rs (GET source URL)
//!     → cache.rs (split JSON array, compare updated_at per issue number)
//!     → IssueChange::New / IssueChange::Modified → log
//!     → inspector.rs (`/kind <name>` in the body → AddLabelRequest)
//!     → labeler.rs (POST the label, only when `watcher.label_issues`)
//! ```
//!
//! # Design Decisions
//! - The cache lives in the polling task only; nothing is persisted
//! - A failed poll is logged and the next tick tries again
//! - An empty payload counts as zero issues
//! - Shutdown abandons a poll or label call that is still in flight

pub mod cache;
pub mod inspector;
pub mod labeler;
pub mod monitor;
pub mod types;

pub use cache::IssueCache;
pub use inspector::inspect;
pub use labeler::IssueLabeler;
pub use monitor::IssueWatcher;
pub use types::{AddLabelRequest, IssueChange, IssueSummary, WatchError, WatchResult};
