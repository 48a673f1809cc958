//! tgin: a small HTTP web framework.
//!
//! Routes are registered on an [`Engine`] (or a [`RouterGroup`] carved out of
//! it) with static, `:param` and trailing `*wildcard` patterns. Each request
//! runs through the middleware of its route's group lineage and then the
//! route handler, all sharing one [`Context`].

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use engine::{Engine, RouterGroup};
pub use error::ServerError;
pub use http::{Context, HandlerFunc, HttpServer};
pub use lifecycle::Shutdown;
