//! Response helpers shared by the context writers.

use serde::Serialize;

use crate::http::context::Context;
use axum::http::StatusCode;

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const TEXT_HTML: &str = "text/html; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json";

/// Body written by `Context::fail`.
#[derive(Debug, Serialize)]
pub struct ErrorMessage<'a> {
    pub message: &'a str,
}

/// Terminal handler used when no route matches.
pub fn not_found(c: &mut Context) {
    let path = c.path().to_string();
    c.string(StatusCode::NOT_FOUND, format_args!("404 NOT FOUND: {}\n", path));
}
