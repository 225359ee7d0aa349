//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (attach request ID)
//!     → routing registry (resolve path)
//!     → page.rs (named render target)
//!     → JSON envelope | 307 redirect | 404
//! ```

pub mod page;
pub mod request;
pub mod server;

pub use page::{build_registry, PageTarget};
pub use request::{RequestId, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
