//! Route registration and lookup.
//!
//! # Responsibilities
//! - Keep one trie per HTTP method, created on first registration
//! - Store handlers keyed by method and pattern
//! - Resolve a request path to the best registered route plus its params
//!
//! # Design Decisions
//! - Immutable after startup (thread-safe without locks)
//! - Handlers are keyed by the matched node's pattern, not the request path
//! - Explicit `None` for no-match rather than an error value

use axum::http::Method;
use std::collections::HashMap;

use crate::routing::pattern::parse_pattern;
use crate::routing::trie::Node;

/// Path parameters extracted from a matched route.
pub type Params = HashMap<String, String>;

/// Composite key identifying a registered route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: Method,
    pub pattern: String,
}

impl RouteKey {
    pub fn new(method: Method, pattern: impl Into<String>) -> Self {
        Self {
            method,
            pattern: pattern.into(),
        }
    }
}

/// Method-aware router over trie nodes.
///
/// `T` is whatever the caller wants to get back for a matched route; the
/// engine stores its handler entries here.
#[derive(Debug, Clone)]
pub struct Router<T> {
    roots: HashMap<Method, Node>,
    handlers: HashMap<RouteKey, T>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self {
            roots: HashMap::new(),
            handlers: HashMap::new(),
        }
    }
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` and `pattern`.
    ///
    /// Registering the same method and pattern again replaces the previous
    /// handler. A pattern that lands on the node of a differently spelled one
    /// (`/a` and `/a/`) takes that node over and the old entry is dropped.
    pub fn add_route(&mut self, method: Method, pattern: &str, handler: T) {
        let segments = parse_pattern(pattern);
        let replaced = self
            .roots
            .entry(method.clone())
            .or_default()
            .insert(pattern, &segments, 0);
        if let Some(old) = replaced.filter(|old| old != pattern) {
            self.handlers.remove(&RouteKey::new(method.clone(), old));
        }
        self.handlers.insert(RouteKey::new(method, pattern), handler);
    }

    /// Find the node matching `path` and extract its params.
    pub fn get_route(&self, method: &Method, path: &str) -> Option<(&Node, Params)> {
        let search = parse_pattern(path);
        let root = self.roots.get(method)?;
        let node = root.search(&search, 0)?;
        let pattern = node.pattern()?;
        Some((node, extract_params(pattern, &search)))
    }

    /// Resolve `path` to its registered handler and params.
    pub fn route(&self, method: &Method, path: &str) -> Option<(&T, Params)> {
        let (node, params) = self.get_route(method, path)?;
        let key = RouteKey::new(method.clone(), node.pattern()?);
        self.handlers.get(&key).map(|handler| (handler, params))
    }

    /// All terminal nodes registered for `method`.
    pub fn get_routes(&self, method: &Method) -> Vec<&Node> {
        let mut nodes = Vec::new();
        if let Some(root) = self.roots.get(method) {
            root.travel(&mut nodes);
        }
        nodes
    }

    /// Methods that have at least one route.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.roots.keys()
    }
}

/// Replay `pattern` against the request segments to bind named params.
fn extract_params(pattern: &str, search: &[&str]) -> Params {
    let mut params = Params::new();
    for (index, part) in parse_pattern(pattern).into_iter().enumerate() {
        if let Some(name) = part.strip_prefix(':') {
            if let Some(value) = search.get(index) {
                params.insert(name.to_string(), value.to_string());
            }
        } else if let Some(name) = part.strip_prefix('*') {
            if !name.is_empty() {
                let rest = search.get(index..).unwrap_or_default();
                params.insert(name.to_string(), rest.join("/"));
            }
            break;
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_test_router() -> Router<&'static str> {
        let mut r = Router::new();
        r.add_route(Method::GET, "/", "index");
        r.add_route(Method::GET, "/hello/:name", "hello");
        r.add_route(Method::GET, "/hello/b/c", "hello-b-c");
        r.add_route(Method::GET, "/hi/:name", "hi");
        r.add_route(Method::GET, "/assets/*filepath", "assets");
        r
    }

    #[test]
    fn test_get_route_param() {
        let r = new_test_router();
        let (node, params) = r.get_route(&Method::GET, "/hello/tgin").unwrap();
        assert_eq!(node.pattern(), Some("/hello/:name"));
        assert_eq!(params.get("name").map(String::as_str), Some("tgin"));
    }

    #[test]
    fn test_get_route_wildcard() {
        let r = new_test_router();
        let (handler, params) = r.route(&Method::GET, "/assets/css/app.css").unwrap();
        assert_eq!(*handler, "assets");
        assert_eq!(params.get("filepath").map(String::as_str), Some("css/app.css"));
    }

    #[test]
    fn test_static_route_has_no_params() {
        let r = new_test_router();
        let (handler, params) = r.route(&Method::GET, "/hello/b/c").unwrap();
        assert_eq!(*handler, "hello-b-c");
        assert!(params.is_empty());

        let (handler, params) = r.route(&Method::GET, "/").unwrap();
        assert_eq!(*handler, "index");
        assert!(params.is_empty());
    }

    #[test]
    fn test_segment_count_mismatch() {
        let r = new_test_router();
        assert!(r.route(&Method::GET, "/hello").is_none());
        assert!(r.route(&Method::GET, "/hello/a/b/c").is_none());
        assert!(r.route(&Method::GET, "/nope").is_none());
    }

    #[test]
    fn test_unknown_method() {
        let r = new_test_router();
        assert!(r.route(&Method::POST, "/").is_none());
        assert!(r.get_route(&Method::DELETE, "/hello/tgin").is_none());
    }

    #[test]
    fn test_handler_keyed_by_pattern_not_path() {
        let mut r = Router::new();
        r.add_route(Method::GET, "/user/:id", 1);
        let (handler, _) = r.route(&Method::GET, "/user/7").unwrap();
        assert_eq!(*handler, 1);
        let patterns: Vec<_> = r
            .get_routes(&Method::GET)
            .iter()
            .filter_map(|n| n.pattern())
            .collect();
        assert_eq!(patterns, vec!["/user/:id"]);
    }

    #[test]
    fn test_reregistration_replaces_handler() {
        let mut r = Router::new();
        r.add_route(Method::GET, "/x", "old");
        r.add_route(Method::GET, "/x", "new");
        assert_eq!(r.get_routes(&Method::GET).len(), 1);
        assert_eq!(*r.route(&Method::GET, "/x").unwrap().0, "new");
    }

    #[test]
    fn test_respelled_pattern_drops_stale_handler() {
        let mut r = Router::new();
        r.add_route(Method::GET, "/a", "plain");
        r.add_route(Method::GET, "/a/", "slash");
        assert_eq!(r.handlers.len(), 1);
        assert!(!r.handlers.contains_key(&RouteKey::new(Method::GET, "/a")));
        assert_eq!(*r.route(&Method::GET, "/a").unwrap().0, "slash");
    }

    #[test]
    fn test_decoded_path_segments() {
        let mut r = Router::new();
        r.add_route(Method::GET, "/hello/:name", "hello");
        r.add_route(Method::GET, "/assets/*filepath", "assets");

        let (_, params) = r.route(&Method::GET, "/hello/t gin").unwrap();
        assert_eq!(params.get("name").map(String::as_str), Some("t gin"));

        let (_, params) = r.route(&Method::GET, "/assets/my docs/a b.css").unwrap();
        assert_eq!(params.get("filepath").map(String::as_str), Some("my docs/a b.css"));
    }

    #[test]
    fn test_methods() {
        let mut r = Router::new();
        r.add_route(Method::GET, "/", 1);
        r.add_route(Method::POST, "/", 2);
        let mut methods: Vec<_> = r.methods().map(Method::as_str).collect();
        methods.sort_unstable();
        assert_eq!(methods, vec!["GET", "POST"]);
    }

    #[test]
    fn test_methods_are_isolated() {
        let mut r = Router::new();
        r.add_route(Method::GET, "/item/:id", "get");
        r.add_route(Method::POST, "/item/:id", "post");
        assert_eq!(*r.route(&Method::GET, "/item/1").unwrap().0, "get");
        assert_eq!(*r.route(&Method::POST, "/item/1").unwrap().0, "post");
        assert!(r.route(&Method::PUT, "/item/1").is_none());
    }

    #[test]
    fn test_first_registered_param_name_wins() {
        let mut r = Router::new();
        r.add_route(Method::GET, "/user/:id", "by-id");
        r.add_route(Method::GET, "/user/:name", "by-name");
        let (handler, params) = r.route(&Method::GET, "/user/alice").unwrap();
        assert_eq!(*handler, "by-id");
        assert_eq!(params.get("id").map(String::as_str), Some("alice"));
        assert!(!params.contains_key("name"));
    }

    #[test]
    fn test_bare_wildcard_binds_nothing() {
        let mut r = Router::new();
        r.add_route(Method::GET, "/static/*", "static");
        let (handler, params) = r.route(&Method::GET, "/static/a/b").unwrap();
        assert_eq!(*handler, "static");
        assert!(params.is_empty());
    }

    #[test]
    fn test_mixed_params() {
        let mut r = Router::new();
        r.add_route(Method::GET, "/:lang/doc/*path", "doc");
        let (_, params) = r.route(&Method::GET, "/rust/doc/std/vec/index.html").unwrap();
        assert_eq!(params.get("lang").map(String::as_str), Some("rust"));
        assert_eq!(params.get("path").map(String::as_str), Some("std/vec/index.html"));
    }

    #[test]
    fn test_get_routes() {
        let r = new_test_router();
        assert_eq!(r.get_routes(&Method::GET).len(), 5);
        assert!(r.get_routes(&Method::POST).is_empty());
    }
}
