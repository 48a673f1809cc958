//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Engine, middleware and server produce:
//!     → logging.rs (structured log events via tracing)
//!     → tower_http TraceLayer (per-request spans)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows through the logger middleware

pub mod logging;
