//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers, body buffering)
//!     → request.rs (request ID, query/form decoding)
//!     → engine (route lookup, chain assembly)
//!     → context.rs (handler chain execution, response writers)
//!     → response.rs (content types, not-found handler)
//!     → Send to client
//! ```

pub mod context;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use context::{Context, HandlerFunc};
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
