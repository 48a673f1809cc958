//! Built-in middleware.
//!
//! Middleware are ordinary handlers that call `Context::next` to run the rest
//! of the chain and may act again once it returns.

pub mod logger;
pub mod recovery;

pub use logger::logger;
pub use recovery::recovery;
