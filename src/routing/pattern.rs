//! Route pattern parsing.
//!
//! Patterns and request paths share one grammar: `/`-delimited segments where
//! `:name` binds a single segment and `*name` binds everything that remains.

/// Split a pattern (or request path) into its non-empty segments.
///
/// Empty segments are dropped, so leading, trailing and doubled slashes are
/// tolerated. Parsing stops right after the first wildcard segment: anything
/// written after `*name` can never be matched.
pub fn parse_pattern(pattern: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in pattern.split('/').filter(|s| !s.is_empty()) {
        segments.push(segment);
        if is_catch_all(segment) {
            break;
        }
    }
    segments
}

/// Returns true for `:name` and `*name` segments.
pub fn is_wild(segment: &str) -> bool {
    segment.starts_with(':') || is_catch_all(segment)
}

/// Returns true for `*name` segments.
pub fn is_catch_all(segment: &str) -> bool {
    segment.starts_with('*')
}
