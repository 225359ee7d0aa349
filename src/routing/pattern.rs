//! Path pattern parsing and matching.
//!
//! # Responsibilities
//! - Parse declared patterns into literal and parameter segments
//! - Match concrete paths and extract parameter bindings
//! - Rank overlapping patterns by specificity
//!
//! # Design Decisions
//! - A segment starting with `$` is a named parameter (`/payment/$orderId`)
//! - A parameter matches exactly one segment; there is no catch-all
//! - Literal segments outrank parameter segments at the same position
//! - Parameter values are extracted as plain strings; validation belongs
//!   to the render target
//! - No regex to guarantee O(n) matching

use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

/// Parameter bindings extracted from a matched path.
pub type Params = HashMap<String, String>;

/// Errors raised while parsing a path pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern {0:?} must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern {0:?} contains an empty segment")]
    EmptySegment(String),

    #[error("pattern {0:?} has a parameter with no name")]
    EmptyParamName(String),

    #[error("pattern {0:?} declares parameter {1:?} more than once")]
    DuplicateParam(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed path pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern string. Trailing slashes are normalized away.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        if !pattern.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
        }

        let normalized = normalize_path(pattern);
        let mut segments = Vec::new();

        for part in split_segments(&normalized) {
            if part.is_empty() {
                return Err(PatternError::EmptySegment(pattern.to_string()));
            }
            if let Some(name) = part.strip_prefix('$') {
                if name.is_empty() {
                    return Err(PatternError::EmptyParamName(pattern.to_string()));
                }
                if segments.iter().any(|s| matches!(s, Segment::Param(n) if n.as_str() == name)) {
                    return Err(PatternError::DuplicateParam(
                        pattern.to_string(),
                        name.to_string(),
                    ));
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: normalized,
            segments,
        })
    }

    /// The normalized pattern string as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a concrete path against this pattern.
    ///
    /// Returns the parameter bindings on a match, `None` otherwise.
    /// The path must not carry a query string.
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let path = normalize_path(path);
        let parts = split_segments(&path);
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(params)
    }

    /// Rank two patterns that matched the same path.
    ///
    /// Walks segments position by position; a literal outranks a parameter.
    /// `Greater` means `self` is the more specific pattern.
    pub fn cmp_specificity(&self, other: &RoutePattern) -> Ordering {
        for (a, b) in self.segments.iter().zip(other.segments.iter()) {
            match (a, b) {
                (Segment::Literal(_), Segment::Param(_)) => return Ordering::Greater,
                (Segment::Param(_), Segment::Literal(_)) => return Ordering::Less,
                _ => {}
            }
        }
        Ordering::Equal
    }

    /// True when both patterns could match the same path with equal
    /// specificity: same segment count, same literal/parameter shape,
    /// equal literals. Parameter names are ignored.
    pub fn same_shape(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(a, b)| match (a, b) {
                    (Segment::Literal(x), Segment::Literal(y)) => x == y,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Strip trailing slashes; the root path stays `/`.
pub(crate) fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Split a normalized path into segments. The root path has none.
/// Empty segments (from `//`) are kept so callers can reject them.
fn split_segments(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}
