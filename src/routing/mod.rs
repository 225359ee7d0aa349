//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Declarations (at startup):
//!     pattern strings
//!     → pattern.rs (parse into literal/param segments)
//!     → registry.rs (duplicate + ambiguity checks)
//!     → Freeze as immutable RouteRegistry
//!
//! Incoming path:
//!     → registry.rs (longest-specific-match lookup)
//!     → guard.rs (pre-resolution check, may redirect)
//!     → Return: Matched | Redirect | NotFound
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Duplicate and ambiguous patterns rejected at registration, so
//!   resolution never tie-breaks
//! - Render targets are opaque: the registry stores and returns them,
//!   never inspects them
//! - Deterministic: same input always resolves the same way

pub mod guard;
pub mod pattern;
pub mod registry;

pub use guard::{Guard, GuardDecision, RedirectGuard};
pub use pattern::{Params, PatternError, RoutePattern};
pub use registry::{
    RegistryError, Resolution, ResolveError, RouteEntry, RouteRegistry, DEFAULT_MAX_REDIRECT_HOPS,
};
