// File: src/config.rs
// Purpose: Per-invocation loader configuration

use std::env;
use std::path::PathBuf;

/// Environment variable the template-cache default is derived from
pub const ENV_VAR: &str = "SITEWIRE_ENV";

/// Configuration owned by one loader invocation
///
/// Built when the loader is constructed and shared with every fallback view
/// it creates. Two loaders over different roots carry independent configs.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Root directory all route prefixes are computed against
    pub base_dir: PathBuf,

    /// Whether compiled templates are reused across renders
    pub cache_templates: bool,
}

impl SiteConfig {
    /// Create a config for `base_dir`, with the cache flag taken from the environment
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            cache_templates: cache_default(env::var(ENV_VAR).ok().as_deref()),
        }
    }

    /// Override the env-derived template cache flag
    pub fn with_template_cache(mut self, cache_templates: bool) -> Self {
        self.cache_templates = cache_templates;
        self
    }
}

/// Unset or "development" leaves the cache off; anything else turns it on
fn cache_default(env: Option<&str>) -> bool {
    env.unwrap_or("development") != "development"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_default() {
        assert!(!cache_default(None));
        assert!(!cache_default(Some("development")));
        assert!(cache_default(Some("production")));
        assert!(cache_default(Some("staging")));
    }

    #[test]
    fn test_with_template_cache_overrides() {
        let config = SiteConfig::new("site").with_template_cache(true);
        assert!(config.cache_templates);
        assert_eq!(config.base_dir, PathBuf::from("site"));

        let config = config.with_template_cache(false);
        assert!(!config.cache_templates);
    }
}
