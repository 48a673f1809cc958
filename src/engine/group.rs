//! Route groups.
//!
//! A group adds a path prefix and a middleware list to every route declared
//! through it. Groups form a tree rooted at the engine; the full prefix is
//! fixed when the group is created.

use axum::http::Method;
use std::sync::Arc;

use crate::engine::Engine;
use crate::http::context::{Context, HandlerFunc};

/// Index of a group inside its engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub(crate) usize);

impl GroupId {
    /// The engine-level scope.
    pub const ROOT: GroupId = GroupId(0);
}

/// Registration-time data of a group.
pub(crate) struct GroupData {
    pub(crate) prefix: String,
    pub(crate) parent: Option<GroupId>,
    pub(crate) middleware: Vec<HandlerFunc>,
}

impl GroupData {
    pub(crate) fn root() -> Self {
        Self {
            prefix: String::new(),
            parent: None,
            middleware: Vec::new(),
        }
    }

    pub(crate) fn new(prefix: String, parent: GroupId) -> Self {
        Self {
            prefix,
            parent: Some(parent),
            middleware: Vec::new(),
        }
    }
}

/// Handle for registering routes and middleware under a group.
pub struct RouterGroup<'e> {
    engine: &'e mut Engine,
    id: GroupId,
}

impl<'e> RouterGroup<'e> {
    pub(crate) fn new(engine: &'e mut Engine, id: GroupId) -> Self {
        Self { engine, id }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Full prefix, including every ancestor's prefix.
    pub fn prefix(&self) -> &str {
        self.engine.group_prefix(self.id)
    }

    /// Create a nested group.
    pub fn group(&mut self, prefix: &str) -> RouterGroup<'_> {
        let id = self.engine.new_group(self.id, prefix);
        RouterGroup {
            engine: &mut *self.engine,
            id,
        }
    }

    /// Append middleware for this group and its descendants.
    pub fn use_middleware<F>(&mut self, middleware: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.engine.push_middleware(self.id, Arc::new(middleware));
        self
    }

    pub fn add_route<F>(&mut self, method: Method, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.engine.register(self.id, method, pattern, Arc::new(handler));
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
}
