//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     method + pattern
//!     → pattern.rs (split into segments, stop after wildcard)
//!     → trie.rs (insert into the method's trie)
//!     → router.rs (store handler under (method, pattern))
//!
//! Incoming Request (method, path)
//!     → router.rs (pick the method's trie)
//!     → trie.rs (segment-by-segment search, insertion-order tie-break)
//!     → router.rs (replay matched pattern to extract params)
//!     → Return: handler + params, or None
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, read-only while serving
//! - No regex patterns: static, `:param` and trailing `*wildcard` only
//! - Deterministic: the first inserted candidate that matches wins

pub mod pattern;
pub mod router;
pub mod trie;

pub use pattern::parse_pattern;
pub use router::{Params, RouteKey, Router};
pub use trie::Node;
