// File: src/declaration.rs
// Purpose: Parses per-directory router.json declaration files

use anyhow::{anyhow, Context, Result};
use axum::routing::MethodFilter;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// File name that marks a directory as route-bearing
pub const DECLARATION_FILE: &str = "router.json";

/// Parsed contents of one declaration file
///
/// A JSON object mapping `"METHOD /suffix"` keys to handler or template names.
#[derive(Debug, Clone, Default)]
pub struct RouteDeclaration {
    entries: BTreeMap<String, String>,
}

impl RouteDeclaration {
    /// Read and parse a declaration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read declaration file {}", path.display()))?;

        let entries = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse declaration file {}", path.display()))?;

        Ok(Self { entries })
    }

    /// Declared (key, target) pairs
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One parsed `"METHOD /suffix"` declaration key
#[derive(Debug, Clone)]
pub struct RouteKey {
    /// Method filter the route registers under
    pub filter: MethodFilter,

    /// Normalized method token, for logging
    pub method: String,

    /// Declared path suffix, always starting with `/`
    pub suffix: String,
}

impl RouteKey {
    /// Split a declaration key into a validated method and path suffix
    ///
    /// Method tokens are case-insensitive. Unknown verbs and keys without a
    /// single-space separator are rejected here, before anything registers.
    pub fn parse(key: &str) -> Result<Self> {
        let (method, suffix) = key
            .split_once(' ')
            .ok_or_else(|| anyhow!("route key {key:?} is not of the form \"METHOD /suffix\""))?;

        let method = method.to_ascii_uppercase();
        let filter = method_filter(&method)
            .ok_or_else(|| anyhow!("route key {key:?} uses unknown HTTP method {method:?}"))?;

        if !suffix.starts_with('/') {
            return Err(anyhow!("route key {key:?} has a suffix that does not start with '/'"));
        }

        Ok(Self {
            filter,
            method,
            suffix: suffix.to_string(),
        })
    }

    /// Join the suffix onto a directory prefix
    ///
    /// A suffix of `/` means the directory's own route, not a sub-path. The
    /// prefix is empty for the root directory, so root-level suffixes pass
    /// through unchanged.
    pub fn route_path(&self, prefix: &str) -> String {
        if self.suffix == "/" {
            if prefix.is_empty() {
                "/".to_string()
            } else {
                prefix.to_string()
            }
        } else {
            format!("{}{}", prefix, self.suffix)
        }
    }
}

fn method_filter(method: &str) -> Option<MethodFilter> {
    match method {
        "GET" => Some(MethodFilter::GET),
        "POST" => Some(MethodFilter::POST),
        "PUT" => Some(MethodFilter::PUT),
        "PATCH" => Some(MethodFilter::PATCH),
        "DELETE" => Some(MethodFilter::DELETE),
        "HEAD" => Some(MethodFilter::HEAD),
        "OPTIONS" => Some(MethodFilter::OPTIONS),
        "TRACE" => Some(MethodFilter::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case("GET /", "GET", "/")]
    #[case("POST /new", "POST", "/new")]
    #[case("delete /posts", "DELETE", "/posts")]
    fn test_route_key_parse(#[case] key: &str, #[case] method: &str, #[case] suffix: &str) {
        let route = RouteKey::parse(key).unwrap();
        assert_eq!(route.method, method);
        assert_eq!(route.suffix, suffix);
    }

    #[rstest]
    #[case("GET")] // no separator
    #[case("TRACK /")] // unknown verb
    #[case(" /new")] // empty method token
    #[case("GET new")] // suffix without leading slash
    fn test_route_key_rejects_malformed(#[case] key: &str) {
        assert!(RouteKey::parse(key).is_err());
    }

    #[test]
    fn test_route_path_joins_prefix() {
        let own = RouteKey::parse("GET /").unwrap();
        assert_eq!(own.route_path(""), "/");
        assert_eq!(own.route_path("/blog"), "/blog");

        let sub = RouteKey::parse("GET /new").unwrap();
        assert_eq!(sub.route_path(""), "/new");
        assert_eq!(sub.route_path("/blog"), "/blog/new");
    }

    #[test]
    fn test_load_declaration() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"GET /": "index", "POST /new": "create"}}"#).unwrap();

        let declaration = RouteDeclaration::load(file.path()).unwrap();
        assert_eq!(declaration.len(), 2);

        let entries: Vec<_> = declaration.entries().collect();
        assert!(entries.contains(&("GET /", "index")));
        assert!(entries.contains(&("POST /new", "create")));
    }

    #[test]
    fn test_load_declaration_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = RouteDeclaration::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse declaration file"));
    }
}
