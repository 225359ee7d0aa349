//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route table (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → registry built once, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table never changes at
//!   runtime (restart to change routes)
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ListenerConfig;
pub use schema::PageConfig;
pub use schema::RedirectConfig;
pub use schema::RouterConfig;
