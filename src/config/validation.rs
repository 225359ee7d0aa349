//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check pattern well-formedness and uniqueness
//! - Detect ambiguous patterns and dangling redirect targets
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::pattern::{normalize_path, PatternError, RoutePattern};

/// A single semantic problem in a route table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("page with path {path:?} has an empty name")]
    EmptyPageName { path: String },

    #[error("page name {name:?} is declared more than once")]
    DuplicatePageName { name: String },

    #[error("page {name:?}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: PatternError,
    },

    #[error("path {path:?} is declared more than once")]
    DuplicatePath { path: String },

    #[error("path {path:?} is ambiguous with {other:?}")]
    AmbiguousPath { path: String, other: String },

    #[error("page {name:?} redirects to {target:?}, which no page covers")]
    DanglingRedirect { name: String, target: String },

    #[error("limits.max_redirect_hops must be at least 1")]
    ZeroRedirectHops,
}

/// Validate a route table, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.limits.max_redirect_hops == 0 {
        errors.push(ValidationError::ZeroRedirectHops);
    }

    let mut seen_names = HashSet::new();
    for page in &config.pages {
        if page.name.is_empty() {
            errors.push(ValidationError::EmptyPageName {
                path: page.path.clone(),
            });
        } else if !seen_names.insert(page.name.as_str()) {
            errors.push(ValidationError::DuplicatePageName {
                name: page.name.clone(),
            });
        }
    }

    // Parse what parses; report what doesn't. Later checks run on the
    // parseable subset so one bad pattern doesn't hide other problems.
    let mut patterns: Vec<(&str, RoutePattern)> = Vec::new();
    for page in &config.pages {
        match RoutePattern::parse(&page.path) {
            Ok(pattern) => patterns.push((page.name.as_str(), pattern)),
            Err(source) => errors.push(ValidationError::InvalidPattern {
                name: page.name.clone(),
                source,
            }),
        }
    }

    for (i, (_, pattern)) in patterns.iter().enumerate() {
        for (_, earlier) in &patterns[..i] {
            if earlier.segments() == pattern.segments() {
                errors.push(ValidationError::DuplicatePath {
                    path: pattern.as_str().to_string(),
                });
            } else if earlier.same_shape(pattern) {
                errors.push(ValidationError::AmbiguousPath {
                    path: pattern.as_str().to_string(),
                    other: earlier.as_str().to_string(),
                });
            }
        }
    }

    for page in &config.pages {
        if let Some(redirect) = &page.redirect {
            let target = normalize_path(&redirect.to);
            let covered = patterns
                .iter()
                .any(|(_, pattern)| pattern.match_path(&target).is_some());
            if !covered {
                errors.push(ValidationError::DanglingRedirect {
                    name: page.name.clone(),
                    target: redirect.to.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{PageConfig, RedirectConfig};

    fn page(name: &str, path: &str) -> PageConfig {
        PageConfig {
            name: name.to_string(),
            path: path.to_string(),
            redirect: None,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let mut config = RouterConfig::default();
        config.pages = vec![
            page("landing", "/"),
            page("portfolio-detail", "/dashboard/portfolios/$id"),
        ];
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_all_errors_reported_at_once() {
        let mut config = RouterConfig::default();
        config.limits.max_redirect_hops = 0;
        config.pages = vec![
            page("", "/a"),
            page("dup", "/b"),
            page("dup", "/c"),
            page("bad", "no-slash"),
            page("b-again", "/b"),
            PageConfig {
                name: "legacy".to_string(),
                path: "/old".to_string(),
                redirect: Some(RedirectConfig {
                    to: "/new".to_string(),
                    query: None,
                }),
            },
        ];
        let errors = validate_config(&config).unwrap_err();

        assert!(errors.contains(&ValidationError::ZeroRedirectHops));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::EmptyPageName { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::DuplicatePageName { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidPattern { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::DuplicatePath { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::DanglingRedirect { .. })));
    }

    #[test]
    fn test_ambiguous_paths_detected() {
        let mut config = RouterConfig::default();
        config.pages = vec![
            page("a", "/payment/$orderId"),
            page("b", "/payment/$id"),
        ];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::AmbiguousPath { .. })));
    }

    #[test]
    fn test_redirect_to_parameterized_page_is_covered() {
        let mut config = RouterConfig::default();
        config.pages = vec![
            page("portfolio-detail", "/dashboard/portfolios/$id"),
            PageConfig {
                name: "legacy".to_string(),
                path: "/portfolio-default".to_string(),
                redirect: Some(RedirectConfig {
                    to: "/dashboard/portfolios/default".to_string(),
                    query: None,
                }),
            },
        ];
        assert!(validate_config(&config).is_ok());
    }
}
