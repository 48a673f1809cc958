//! Segment trie used by the router.
//!
//! One trie exists per HTTP method. Each node stands for one path segment and
//! remembers the full pattern when a registered route ends on it. Handlers are
//! not stored on nodes; the router keys them by method and pattern.

use crate::routing::pattern::is_wild;

/// A single segment in the route trie.
#[derive(Debug, Default, Clone)]
pub struct Node {
    /// Full pattern of the route terminating here, `None` for intermediate nodes.
    pattern: Option<String>,
    /// Literal segment text, e.g. `users`, `:id` or `*rest`.
    segment: String,
    /// Children in insertion order. Lookup tries them in this order.
    children: Vec<Node>,
    is_wild: bool,
}

impl Node {
    /// Create an empty root node.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_segment(segment: &str) -> Self {
        Self {
            pattern: None,
            segment: segment.to_string(),
            children: Vec::new(),
            is_wild: is_wild(segment),
        }
    }

    /// Pattern of the route ending at this node, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn is_wild(&self) -> bool {
        self.is_wild
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns true if a registered pattern ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.pattern.is_some()
    }

    /// Insert `pattern` whose parsed segments are `segments`, starting at `depth`.
    ///
    /// Children are reused only when their segment text is identical, so `:id`
    /// and `:name` at the same depth become distinct siblings. Re-inserting a
    /// pattern that ends on an existing node overwrites the stored pattern,
    /// and the pattern it replaced is returned.
    pub fn insert(&mut self, pattern: &str, segments: &[&str], depth: usize) -> Option<String> {
        if depth == segments.len() {
            return self.pattern.replace(pattern.to_string());
        }

        let segment = segments[depth];
        let index = match self.children.iter().position(|child| child.segment == segment) {
            Some(index) => index,
            None => {
                self.children.push(Node::with_segment(segment));
                self.children.len() - 1
            }
        };
        self.children[index].insert(pattern, segments, depth + 1)
    }

    /// Find the terminal node matching the request `segments`, starting at `depth`.
    ///
    /// A child is a candidate when its text equals the request segment or when
    /// it is a param/wildcard. Candidates are tried in insertion order and the
    /// first one whose subtree yields a terminal node wins.
    pub fn search(&self, segments: &[&str], depth: usize) -> Option<&Node> {
        if depth == segments.len() || self.segment.starts_with('*') {
            return self.is_terminal().then_some(self);
        }

        let segment = segments[depth];
        self.children
            .iter()
            .filter(|child| child.segment == segment || child.is_wild)
            .find_map(|child| child.search(segments, depth + 1))
    }

    /// Collect every node below (and including) this one that terminates a pattern.
    pub fn travel<'a>(&'a self, out: &mut Vec<&'a Node>) {
        if self.is_terminal() {
            out.push(self);
        }
        for child in &self.children {
            child.travel(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::pattern::parse_pattern;

    fn build(patterns: &[&str]) -> Node {
        let mut root = Node::new();
        for pattern in patterns {
            root.insert(pattern, &parse_pattern(pattern), 0);
        }
        root
    }

    fn lookup<'a>(root: &'a Node, path: &str) -> Option<&'a str> {
        root.search(&parse_pattern(path), 0).and_then(Node::pattern)
    }

    #[test]
    fn test_shared_prefix_reuses_nodes() {
        let root = build(&["/v1/users", "/v1/users/list", "/v1/orders"]);
        assert_eq!(root.children().len(), 1);
        let v1 = &root.children()[0];
        assert_eq!(v1.segment(), "v1");
        assert!(!v1.is_terminal());
        assert_eq!(v1.children().len(), 2);
    }

    #[test]
    fn test_static_match() {
        let root = build(&["/", "/hello", "/hello/world"]);
        assert_eq!(lookup(&root, "/"), Some("/"));
        assert_eq!(lookup(&root, "/hello"), Some("/hello"));
        assert_eq!(lookup(&root, "/hello/world"), Some("/hello/world"));
        assert_eq!(lookup(&root, "/hello/there"), None);
    }

    #[test]
    fn test_intermediate_nodes_do_not_match() {
        let root = build(&["/a/b/c"]);
        assert_eq!(lookup(&root, "/a"), None);
        assert_eq!(lookup(&root, "/a/b"), None);
        assert_eq!(lookup(&root, "/a/b/c/d"), None);
    }

    #[test]
    fn test_param_matches_any_single_segment() {
        let root = build(&["/hello/:name"]);
        assert_eq!(lookup(&root, "/hello/tgin"), Some("/hello/:name"));
        assert_eq!(lookup(&root, "/hello"), None);
        assert_eq!(lookup(&root, "/hello/a/b"), None);
    }

    #[test]
    fn test_wildcard_matches_remainder() {
        let root = build(&["/assets/*filepath"]);
        assert_eq!(lookup(&root, "/assets/app.css"), Some("/assets/*filepath"));
        assert_eq!(lookup(&root, "/assets/css/app.css"), Some("/assets/*filepath"));
        // a wildcard consumes at least one segment
        assert_eq!(lookup(&root, "/assets"), None);
    }

    #[test]
    fn test_backtracks_into_later_siblings() {
        let root = build(&["/a/:x/c", "/a/b/d"]);
        assert_eq!(lookup(&root, "/a/b/d"), Some("/a/b/d"));
        assert_eq!(lookup(&root, "/a/b/c"), Some("/a/:x/c"));
    }

    #[test]
    fn test_insertion_order_breaks_ties() {
        let root = build(&["/p/:lang", "/p/go"]);
        assert_eq!(lookup(&root, "/p/go"), Some("/p/:lang"));

        let root = build(&["/p/go", "/p/:lang"]);
        assert_eq!(lookup(&root, "/p/go"), Some("/p/go"));
        assert_eq!(lookup(&root, "/p/rust"), Some("/p/:lang"));
    }

    #[test]
    fn test_distinct_param_names_are_siblings() {
        let root = build(&["/user/:id", "/user/:name"]);
        let user = &root.children()[0];
        assert_eq!(user.children().len(), 2);
        assert_eq!(user.children()[0].segment(), ":id");
        assert_eq!(user.children()[1].segment(), ":name");
        assert!(user.children().iter().all(Node::is_wild));
        assert_eq!(lookup(&root, "/user/42"), Some("/user/:id"));
    }

    #[test]
    fn test_reinsert_overwrites_pattern() {
        let root = build(&["/a", "/a/"]);
        assert_eq!(lookup(&root, "/a"), Some("/a/"));

        let mut root = Node::new();
        assert_eq!(root.insert("/a", &parse_pattern("/a"), 0), None);
        assert_eq!(
            root.insert("/a/", &parse_pattern("/a/"), 0),
            Some("/a".to_string())
        );
    }

    #[test]
    fn test_travel_lists_terminals() {
        let root = build(&["/", "/a/:b", "/a/c/*d"]);
        let mut nodes = Vec::new();
        root.travel(&mut nodes);
        let mut patterns: Vec<_> = nodes.iter().filter_map(|n| n.pattern()).collect();
        patterns.sort_unstable();
        assert_eq!(patterns, vec!["/", "/a/:b", "/a/c/*d"]);
    }
}
