// File: src/request_context.rs
// Purpose: Request context handed to route handlers and fallback views

use axum::http::{HeaderMap, Method};
use std::collections::HashMap;

/// Request context passed to route handlers
#[derive(Clone)]
pub struct RequestContext {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: Method,

    /// Request path
    pub path: String,

    /// Query parameters from URL (?key=value)
    pub query: QueryParams,

    /// Request headers
    pub headers: HeaderMap,
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish()
    }
}

impl RequestContext {
    pub fn new(method: Method, path: String, query: QueryParams, headers: HeaderMap) -> Self {
        Self {
            method,
            path,
            query,
            headers,
        }
    }

    /// Get a header value
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Check if request accepts JSON
    pub fn accepts_json(&self) -> bool {
        if let Some(accept) = self.get_header("accept") {
            accept.contains("application/json") || accept.contains("json")
        } else {
            false
        }
    }
}

/// Query parameters from URL
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Create from HashMap
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Get a query parameter value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a query parameter as a specific type
    pub fn get_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.params.get(key)?.parse().ok()
    }

    /// Check if a parameter exists
    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Get as HashMap
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_basic() {
        let mut params = HashMap::new();
        params.insert("page".to_string(), "1".to_string());
        params.insert("filter".to_string(), "active".to_string());

        let query = QueryParams::new(params);

        assert!(query.has("page"));
        assert!(query.has("filter"));
        assert!(!query.has("sort"));
        assert_eq!(query.get("page"), Some(&"1".to_string()));
    }

    #[test]
    fn test_query_params_get_as() {
        let mut params = HashMap::new();
        params.insert("page".to_string(), "2".to_string());
        params.insert("limit".to_string(), "50".to_string());

        let query = QueryParams::new(params);

        assert_eq!(query.get_as::<i32>("page"), Some(2));
        assert_eq!(query.get_as::<i32>("limit"), Some(50));
        assert_eq!(query.get_as::<i32>("nonexistent"), None);
    }

    #[test]
    fn test_request_context_accepts_json() {
        let mut headers = HeaderMap::new();
        headers.insert("accept", "application/json".parse().unwrap());

        let ctx = RequestContext::new(
            Method::GET,
            "/".to_string(),
            QueryParams::default(),
            headers,
        );

        assert!(ctx.accepts_json());
        assert_eq!(ctx.get_header("accept"), Some("application/json"));
        assert_eq!(ctx.get_header("x-missing"), None);
    }
}
