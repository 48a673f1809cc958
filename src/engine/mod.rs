//! Engine: route registry and request dispatch.
//!
//! # Data Flow
//! ```text
//! Registration (startup, single-threaded):
//!     engine / group → full pattern (group prefix + pattern)
//!     → routing::Router (trie insert, handler stored with its group)
//!
//! Dispatch (per request, concurrent):
//!     request → Context
//!     → routing::Router::route (handler + params, or None)
//!     → chain = root..group middleware + handler  |  not-found handler
//!     → Context::next → response
//! ```
//!
//! # Design Decisions
//! - No process-wide default engine; callers own the value
//! - Read-only while serving, shared via Arc without locks
//! - Middleware is resolved through the route's group lineage, so a group's
//!   middleware never leaks into sibling groups or the root scope

pub mod group;

use axum::body::Bytes;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::http::context::{Context, HandlerFunc};
use crate::http::middleware::{logger, recovery};
use crate::http::response::not_found;
use crate::routing::{RouteKey, Router};

pub use group::{GroupId, RouterGroup};
use group::GroupData;

/// A registered route handler and the group it was declared in.
struct RouteEntry {
    group: GroupId,
    handler: HandlerFunc,
}

/// Top-level route registry; also acts as the root group.
pub struct Engine {
    router: Router<RouteEntry>,
    groups: Vec<GroupData>,
}

impl Engine {
    /// Create an engine with no middleware.
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            groups: vec![GroupData::root()],
        }
    }

    /// Create an engine with the logger and recovery middleware installed.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.use_middleware(logger()).use_middleware(recovery());
        engine
    }

    /// Create a group directly under the root scope.
    pub fn group(&mut self, prefix: &str) -> RouterGroup<'_> {
        let id = self.new_group(GroupId::ROOT, prefix);
        RouterGroup::new(self, id)
    }

    /// Append middleware that applies to every route.
    pub fn use_middleware<F>(&mut self, middleware: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.push_middleware(GroupId::ROOT, Arc::new(middleware));
        self
    }

    pub fn add_route<F>(&mut self, method: Method, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.register(GroupId::ROOT, method, pattern, Arc::new(handler));
        self
    }

    pub fn get<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::GET, pattern, handler)
    }

    pub fn post<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::POST, pattern, handler)
    }

    pub fn put<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::PUT, pattern, handler)
    }

    pub fn patch<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::PATCH, pattern, handler)
    }

    pub fn delete<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::DELETE, pattern, handler)
    }

    /// Registered routes, sorted by pattern then method.
    pub fn routes(&self) -> Vec<RouteKey> {
        let mut routes: Vec<RouteKey> = self
            .router
            .methods()
            .flat_map(|method| {
                self.router
                    .get_routes(method)
                    .into_iter()
                    .filter_map(|node| node.pattern())
                    .map(move |pattern| RouteKey::new(method.clone(), pattern))
            })
            .collect();
        routes.sort_by(|a, b| {
            a.pattern
                .cmp(&b.pattern)
                .then_with(|| a.method.as_str().cmp(b.method.as_str()))
        });
        routes
    }

    /// Run `request` through its handler chain and return the finished context.
    pub fn handle(&self, request: Request<Bytes>) -> Context {
        let mut c = Context::new(request);

        let chain = match self.router.route(c.method(), c.path()) {
            Some((entry, params)) => {
                c.set_params(params);
                self.chain_for(entry)
            }
            None => {
                tracing::debug!(method = %c.method(), path = %c.path(), "No route matched");
                vec![Arc::new(not_found) as HandlerFunc]
            }
        };

        c.set_handlers(chain);
        c.next();
        c
    }

    /// Dispatch entry point used by the HTTP server.
    pub fn dispatch(&self, request: Request<Bytes>) -> Response {
        self.handle(request).into_response()
    }

    // --- Group plumbing ---

    pub(crate) fn new_group(&mut self, parent: GroupId, prefix: &str) -> GroupId {
        let full_prefix = format!("{}{}", self.groups[parent.0].prefix, prefix);
        tracing::debug!(prefix = %full_prefix, "Group created");

        let id = GroupId(self.groups.len());
        self.groups.push(GroupData::new(full_prefix, parent));
        id
    }

    pub(crate) fn group_prefix(&self, group: GroupId) -> &str {
        &self.groups[group.0].prefix
    }

    pub(crate) fn push_middleware(&mut self, group: GroupId, middleware: HandlerFunc) {
        self.groups[group.0].middleware.push(middleware);
    }

    pub(crate) fn register(
        &mut self,
        group: GroupId,
        method: Method,
        pattern: &str,
        handler: HandlerFunc,
    ) {
        let full_pattern = format!("{}{}", self.groups[group.0].prefix, pattern);
        tracing::debug!(method = %method, pattern = %full_pattern, "Route registered");
        self.router
            .add_route(method, &full_pattern, RouteEntry { group, handler });
    }

    /// Middleware of every group from the root down to the route's group,
    /// followed by the route handler.
    fn chain_for(&self, entry: &RouteEntry) -> Vec<HandlerFunc> {
        let mut lineage = Vec::new();
        let mut current = Some(entry.group);
        while let Some(id) = current {
            lineage.push(id);
            current = self.groups[id.0].parent;
        }

        let mut chain: Vec<HandlerFunc> = lineage
            .iter()
            .rev()
            .flat_map(|id| self.groups[id.0].middleware.iter().cloned())
            .collect();
        chain.push(Arc::clone(&entry.handler));
        chain
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
