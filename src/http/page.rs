//! Page render targets for the HTTP host.

use crate::config::schema::RouterConfig;
use crate::routing::{RedirectGuard, RegistryError, RouteRegistry};

/// Render target token: a named page.
///
/// The registry never constructs or inspects this; it is handed back to
/// the render layer, which decides what a page name means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTarget {
    pub name: String,
}

/// Build the route registry from validated configuration.
///
/// Registration order follows the config file. Errors here mean a table
/// that slipped past `validate_config`; startup treats them as fatal.
pub fn build_registry(config: &RouterConfig) -> Result<RouteRegistry<PageTarget>, RegistryError> {
    let mut registry = RouteRegistry::with_max_redirect_hops(config.limits.max_redirect_hops);

    for page in &config.pages {
        let target = PageTarget {
            name: page.name.clone(),
        };
        match &page.redirect {
            Some(rule) => {
                let guard = match &rule.query {
                    Some(query) => RedirectGuard::with_query(&rule.to, query),
                    None => RedirectGuard::new(&rule.to),
                };
                registry.register_guarded(&page.path, target, Box::new(guard))?;
            }
            None => registry.register(&page.path, target)?,
        }
    }

    registry.validate_guards()?;
    Ok(registry)
}
