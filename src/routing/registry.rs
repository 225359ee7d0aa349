//! Route registration and resolution.
//!
//! # Responsibilities
//! - Store route entries built once at startup
//! - Resolve an incoming path to exactly one render target
//! - Evaluate guards and follow their redirects within a hop bound
//! - Return explicit not-found rather than a silent default
//!
//! # Design Decisions
//! - Registration fails eagerly: duplicate and ambiguous patterns never
//!   enter the table
//! - Immutable after construction (thread-safe without locks)
//! - Longest-specific-match: a literal segment outranks a parameter at
//!   the same position
//! - Redirects are a first-class result variant, not control flow; the
//!   hop bound applies only when the registry follows them itself

use std::cmp::Ordering;
use thiserror::Error;

use crate::routing::guard::{Guard, GuardDecision};
use crate::routing::pattern::{normalize_path, Params, PatternError, RoutePattern};

/// Default bound on guard redirect hops for a single resolution.
pub const DEFAULT_MAX_REDIRECT_HOPS: usize = 8;

/// Errors raised while building the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate route pattern {0:?}")]
    DuplicatePath(String),

    #[error("route pattern {0:?} is ambiguous with {1:?}")]
    AmbiguousMatch(String, String),

    #[error("guard on {pattern:?} redirects to unregistered path {target:?}")]
    DanglingRedirect { pattern: String, target: String },

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Errors raised while resolving a path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("redirect chain starting at {path:?} exceeded {max_hops} hops")]
    RedirectLoop { path: String, max_hops: usize },
}

/// Result of resolving a path.
///
/// `NotFound` is a normal variant the caller must handle, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a, T> {
    /// The path resolved to a render target.
    Matched {
        target: &'a T,
        /// Concrete path that matched, after any followed redirects.
        path: String,
        params: Params,
        query: Option<String>,
    },
    /// A guard short-circuited resolution; the caller decides whether to
    /// follow (or lets `resolve` follow for it).
    Redirect { to: String, query: Option<String> },
    /// No registered pattern matched.
    NotFound,
}

/// One registered route.
pub struct RouteEntry<T> {
    pattern: RoutePattern,
    target: T,
    guard: Option<Box<dyn Guard>>,
}

impl<T> RouteEntry<T> {
    /// The normalized pattern this entry was registered under.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// The guard's statically-known redirect target, if any.
    pub fn guard_target(&self) -> Option<&str> {
        self.guard.as_ref().and_then(|g| g.static_target())
    }
}

/// Immutable table mapping path patterns to render targets.
///
/// All registration happens during single-threaded startup; afterwards
/// the registry is shared read-only and `resolve` is a pure computation
/// safe under arbitrary concurrency.
pub struct RouteRegistry<T> {
    entries: Vec<RouteEntry<T>>,
    max_redirect_hops: usize,
}

impl<T> Default for RouteRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteRegistry<T> {
    pub fn new() -> Self {
        Self::with_max_redirect_hops(DEFAULT_MAX_REDIRECT_HOPS)
    }

    pub fn with_max_redirect_hops(max_redirect_hops: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_redirect_hops,
        }
    }

    /// Register a pattern with its render target.
    pub fn register(&mut self, pattern: &str, target: T) -> Result<(), RegistryError> {
        self.insert(pattern, target, None)
    }

    /// Register a pattern with a guard evaluated before the target resolves.
    pub fn register_guarded(
        &mut self,
        pattern: &str,
        target: T,
        guard: Box<dyn Guard>,
    ) -> Result<(), RegistryError> {
        self.insert(pattern, target, Some(guard))
    }

    fn insert(
        &mut self,
        pattern: &str,
        target: T,
        guard: Option<Box<dyn Guard>>,
    ) -> Result<(), RegistryError> {
        let pattern = RoutePattern::parse(pattern)?;

        for existing in &self.entries {
            if existing.pattern.segments() == pattern.segments() {
                return Err(RegistryError::DuplicatePath(pattern.as_str().to_string()));
            }
            if existing.pattern.same_shape(&pattern) {
                return Err(RegistryError::AmbiguousMatch(
                    pattern.as_str().to_string(),
                    existing.pattern.as_str().to_string(),
                ));
            }
        }

        self.entries.push(RouteEntry {
            pattern,
            target,
            guard,
        });
        Ok(())
    }

    /// Check every guard with a statically-known redirect target against
    /// the registered table. Call once after the final `register`.
    pub fn validate_guards(&self) -> Result<(), RegistryError> {
        for entry in &self.entries {
            if let Some(target) = entry.guard_target() {
                if self.lookup(&normalize_path(target)).is_none() {
                    return Err(RegistryError::DanglingRedirect {
                        pattern: entry.pattern().to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolve a single step: match, evaluate the guard, and surface any
    /// redirect as an instruction instead of following it.
    ///
    /// `path` may carry a query string; the query rides along into the
    /// result. A guard redirect's payload replaces the incoming query;
    /// without a payload the incoming query is preserved.
    pub fn resolve_once<'s>(&'s self, path: &str) -> Resolution<'s, T> {
        let (path, query) = split_query(path);
        let path = normalize_path(path);

        let Some((entry, params)) = self.lookup(&path) else {
            return Resolution::NotFound;
        };

        if let Some(guard) = &entry.guard {
            if let GuardDecision::Redirect { to, query: payload } = guard.check(&path, &params) {
                return Resolution::Redirect {
                    to,
                    query: payload.or_else(|| query.map(str::to_string)),
                };
            }
        }

        Resolution::Matched {
            target: &entry.target,
            path,
            params,
            query: query.map(str::to_string),
        }
    }

    /// Resolve a path, following guard redirects against this registry.
    ///
    /// A chain longer than the configured hop bound fails that resolution
    /// attempt only; the registry itself is untouched and later calls
    /// proceed normally.
    pub fn resolve<'s>(&'s self, path: &str) -> Result<Resolution<'s, T>, ResolveError> {
        let mut current = path.to_string();
        let mut hops = 0;

        loop {
            match self.resolve_once(&current) {
                Resolution::Redirect { to, query } if hops < self.max_redirect_hops => {
                    hops += 1;
                    tracing::debug!(from = %current, to = %to, hops, "Following guard redirect");
                    current = match query {
                        Some(q) => format!("{to}?{q}"),
                        None => to,
                    };
                }
                Resolution::Redirect { to, .. } => {
                    tracing::warn!(
                        path = %path,
                        next = %to,
                        max_hops = self.max_redirect_hops,
                        "Redirect chain exceeded hop bound"
                    );
                    return Err(ResolveError::RedirectLoop {
                        path: path.to_string(),
                        max_hops: self.max_redirect_hops,
                    });
                }
                done => return Ok(done),
            }
        }
    }

    /// Find the most specific entry matching `path`.
    ///
    /// Ambiguity is rejected at registration, so at most one entry can
    /// hold the top specificity rank for any path.
    fn lookup(&self, path: &str) -> Option<(&RouteEntry<T>, Params)> {
        let mut best: Option<(&RouteEntry<T>, Params)> = None;

        for entry in &self.entries {
            if let Some(params) = entry.pattern.match_path(path) {
                let more_specific = match &best {
                    Some((current, _)) => {
                        entry.pattern.cmp_specificity(&current.pattern) == Ordering::Greater
                    }
                    None => true,
                };
                if more_specific {
                    best = Some((entry, params));
                }
            }
        }

        best
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry<T>> {
        self.entries.iter()
    }
}

/// Split an incoming path into path and query parts.
fn split_query(input: &str) -> (&str, Option<&str>) {
    match input.split_once('?') {
        Some((path, query)) if !query.is_empty() => (path, Some(query)),
        Some((path, _)) => (path, None),
        None => (input, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::guard::RedirectGuard;

    fn registry() -> RouteRegistry<&'static str> {
        let mut r = RouteRegistry::new();
        r.register("/", "landing").unwrap();
        r.register("/login", "login").unwrap();
        r.register("/dashboard/earn", "earn").unwrap();
        r.register("/dashboard/portfolios/$id", "portfolio-detail")
            .unwrap();
        r
    }

    #[test]
    fn test_resolve_matches_registered_target() {
        let r = registry();
        match r.resolve("/login").unwrap() {
            Resolution::Matched { target, .. } => assert_eq!(*target, "login"),
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_extracts_params() {
        let r = registry();
        match r.resolve("/dashboard/portfolios/42").unwrap() {
            Resolution::Matched { target, params, .. } => {
                assert_eq!(*target, "portfolio-detail");
                assert_eq!(params.get("id").map(String::as_str), Some("42"));
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_unregistered_path_is_not_found() {
        let r = registry();
        assert_eq!(r.resolve("/does/not/exist").unwrap(), Resolution::NotFound);
    }

    #[test]
    fn test_duplicate_pattern_rejected() {
        let mut r = registry();
        assert!(matches!(
            r.register("/login", "login-again"),
            Err(RegistryError::DuplicatePath(_))
        ));
    }

    #[test]
    fn test_same_shape_rejected_as_ambiguous() {
        let mut r = registry();
        assert!(matches!(
            r.register("/dashboard/portfolios/$portfolioId", "other"),
            Err(RegistryError::AmbiguousMatch(_, _))
        ));
    }

    #[test]
    fn test_literal_wins_over_param() {
        let mut r = registry();
        r.register("/dashboard/portfolios/new", "portfolio-new")
            .unwrap();
        match r.resolve("/dashboard/portfolios/new").unwrap() {
            Resolution::Matched { target, params, .. } => {
                assert_eq!(*target, "portfolio-new");
                assert!(params.is_empty());
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_guard_redirect_is_surfaced_then_followed() {
        let mut r = registry();
        r.register_guarded(
            "/dashboard/yield",
            "yield-legacy",
            Box::new(RedirectGuard::with_query("/dashboard/earn", "tab=yield")),
        )
        .unwrap();
        r.validate_guards().unwrap();

        // Single step surfaces the instruction.
        match r.resolve_once("/dashboard/yield") {
            Resolution::Redirect { to, query } => {
                assert_eq!(to, "/dashboard/earn");
                assert_eq!(query.as_deref(), Some("tab=yield"));
            }
            other => panic!("expected redirect, got {other:?}"),
        }

        // Following lands on the target, never on the legacy page.
        match r.resolve("/dashboard/yield").unwrap() {
            Resolution::Matched { target, query, .. } => {
                assert_eq!(*target, "earn");
                assert_eq!(query.as_deref(), Some("tab=yield"));
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_redirect_without_payload_preserves_query() {
        let mut r = registry();
        r.register_guarded(
            "/signin",
            "signin-legacy",
            Box::new(RedirectGuard::new("/login")),
        )
        .unwrap();

        match r.resolve("/signin?next=%2Fdashboard").unwrap() {
            Resolution::Matched { target, query, .. } => {
                assert_eq!(*target, "login");
                assert_eq!(query.as_deref(), Some("next=%2Fdashboard"));
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_self_redirect_fails_with_redirect_loop() {
        let mut r = RouteRegistry::with_max_redirect_hops(4);
        r.register_guarded(
            "/loop",
            "loop",
            Box::new(RedirectGuard::new("/loop")),
        )
        .unwrap();

        assert_eq!(
            r.resolve("/loop"),
            Err(ResolveError::RedirectLoop {
                path: "/loop".to_string(),
                max_hops: 4,
            })
        );
    }

    #[test]
    fn test_conditional_guard_can_continue() {
        /// Redirects drafts to the list page, lets everything else through.
        #[derive(Debug)]
        struct DraftGuard;

        impl Guard for DraftGuard {
            fn check(&self, _path: &str, params: &Params) -> GuardDecision {
                if params.get("id").map(String::as_str) == Some("draft") {
                    GuardDecision::Redirect {
                        to: "/dashboard/portfolios".to_string(),
                        query: None,
                    }
                } else {
                    GuardDecision::Continue
                }
            }
        }

        let mut r = RouteRegistry::new();
        r.register("/dashboard/portfolios", "portfolios").unwrap();
        r.register_guarded(
            "/dashboard/portfolios/$id",
            "portfolio-detail",
            Box::new(DraftGuard),
        )
        .unwrap();

        match r.resolve("/dashboard/portfolios/42").unwrap() {
            Resolution::Matched { target, .. } => assert_eq!(*target, "portfolio-detail"),
            other => panic!("expected match, got {other:?}"),
        }
        match r.resolve("/dashboard/portfolios/draft").unwrap() {
            Resolution::Matched { target, .. } => assert_eq!(*target, "portfolios"),
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_redirect_detected() {
        let mut r = registry();
        r.register_guarded(
            "/dashboard/yield",
            "yield-legacy",
            Box::new(RedirectGuard::new("/dashboard/gone")),
        )
        .unwrap();

        assert!(matches!(
            r.validate_guards(),
            Err(RegistryError::DanglingRedirect { .. })
        ));
    }

    #[test]
    fn test_dynamic_redirect_to_unregistered_path_is_not_found() {
        let mut r = registry();
        r.register_guarded(
            "/dashboard/yield",
            "yield-legacy",
            Box::new(RedirectGuard::new("/nowhere")),
        )
        .unwrap();

        // Skipping validate_guards: the chain ends in NotFound, not a panic.
        assert_eq!(r.resolve("/dashboard/yield").unwrap(), Resolution::NotFound);
    }
}
