//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the page router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Page declarations mapping path patterns to render targets.
    pub pages: Vec<PageConfig>,

    /// Resolution limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// One page declaration: a path pattern bound to a named render target.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageConfig {
    /// Page identifier surfaced to the render layer.
    pub name: String,

    /// Path pattern; a `$name` segment binds a parameter.
    pub path: String,

    /// Optional redirect guard evaluated before the page resolves.
    pub redirect: Option<RedirectConfig>,
}

/// A declared redirect guard.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedirectConfig {
    /// Target path; must be covered by a registered pattern.
    pub to: String,

    /// Query payload attached to the redirect, replacing the incoming
    /// query (e.g., "tab=yield").
    pub query: Option<String>,
}

/// Resolution limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum guard redirect hops for a single resolution.
    pub max_redirect_hops: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_redirect_hops: crate::routing::DEFAULT_MAX_REDIRECT_HOPS,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
