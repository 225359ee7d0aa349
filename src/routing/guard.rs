//! Pre-resolution guards.
//!
//! A guard runs after a route matches but before its target is returned,
//! and may short-circuit the resolution into a redirect. Guards are
//! attached per entry and boxed as trait objects, so hosts can supply
//! their own logic alongside the built-in static redirect.

use std::fmt;

use crate::routing::pattern::Params;

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Resolution proceeds to the matched target.
    Continue,
    /// Resolution short-circuits into a redirect.
    Redirect {
        /// Target path; must resolve against the same registry.
        to: String,
        /// Query payload carried to the target.
        query: Option<String>,
    },
}

/// A pre-resolution check attached to a route entry.
pub trait Guard: Send + Sync + fmt::Debug {
    /// Decide whether resolution continues or redirects.
    fn check(&self, path: &str, params: &Params) -> GuardDecision;

    /// Statically-known redirect target, if any.
    ///
    /// Used at registration time to reject redirects into unregistered
    /// patterns. Guards with dynamic targets return `None` and fall back
    /// to a not-found result at runtime.
    fn static_target(&self) -> Option<&str> {
        None
    }
}

/// Unconditional redirect to a fixed path, optionally carrying a query
/// payload. This is how legacy routes stay registered while sending
/// traffic to their replacement.
#[derive(Debug, Clone)]
pub struct RedirectGuard {
    to: String,
    query: Option<String>,
}

impl RedirectGuard {
    /// Redirect to `to`, preserving the incoming query.
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            query: None,
        }
    }

    /// Redirect to `to`, replacing the incoming query with `query`.
    pub fn with_query(to: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            query: Some(query.into()),
        }
    }
}

impl Guard for RedirectGuard {
    fn check(&self, _path: &str, _params: &Params) -> GuardDecision {
        GuardDecision::Redirect {
            to: self.to.clone(),
            query: self.query.clone(),
        }
    }

    fn static_target(&self) -> Option<&str> {
        Some(&self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_guard_always_redirects() {
        let guard = RedirectGuard::with_query("/dashboard/earn", "tab=yield");
        let decision = guard.check("/dashboard/yield", &Params::new());
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                to: "/dashboard/earn".to_string(),
                query: Some("tab=yield".to_string()),
            }
        );
        assert_eq!(guard.static_target(), Some("/dashboard/earn"));
    }
}
