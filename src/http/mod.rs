//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handler.rs (one outbound call via the forwarder)
//!     → response.rs (relay body or map the failure)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
