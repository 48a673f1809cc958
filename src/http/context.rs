//! Per-request handler context.
//!
//! A `Context` is created for every inbound request, owns the buffered request
//! and the response under construction, and carries the handler chain together
//! with the cursor that `next` advances.

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use percent_encoding::percent_decode_str;
use std::fmt;
use std::sync::Arc;

use crate::http::request::{parse_form, parse_query, X_REQUEST_ID};
use crate::http::response::{ErrorMessage, APPLICATION_JSON, TEXT_HTML, TEXT_PLAIN};
use crate::routing::Params;

/// A link in the handler chain: middleware or route handler.
///
/// Handlers are synchronous. The server runs each chain on tokio's blocking
/// pool, so blocking I/O inside a handler does not stall the async workers.
pub type HandlerFunc = Arc<dyn Fn(&mut Context) + Send + Sync>;

pub struct Context {
    request: Request<Bytes>,
    method: Method,
    path: String,
    params: Params,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,

    handlers: Vec<HandlerFunc>,
    /// Number of handlers entered so far.
    index: usize,

    status_code: StatusCode,
    headers: axum::http::HeaderMap,
    body: Vec<u8>,
}

impl Context {
    /// Build a context for `request`, with an empty chain.
    pub fn new(request: Request<Bytes>) -> Self {
        let method = request.method().clone();
        let path = percent_decode_str(request.uri().path())
            .decode_utf8_lossy()
            .into_owned();
        let query = parse_query(request.uri().query());
        let form = parse_form(request.headers(), request.body());

        Self {
            request,
            method,
            path,
            params: Params::new(),
            query,
            form,
            handlers: Vec::new(),
            index: 0,
            status_code: StatusCode::OK,
            headers: axum::http::HeaderMap::new(),
            body: Vec::new(),
        }
    }

    pub(crate) fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    pub(crate) fn set_handlers(&mut self, handlers: Vec<HandlerFunc>) {
        self.handlers = handlers;
        self.index = 0;
    }

    // --- Flow control ---

    /// Run the rest of the chain, returning once it has finished.
    ///
    /// Each handler decides whether the chain continues: a handler that
    /// returns without calling `next` ends the chain there, and nothing after
    /// it runs. Code placed after `next` in a middleware runs once everything
    /// downstream has returned. Calling `next` on an exhausted chain is a no-op.
    pub fn next(&mut self) {
        let Some(handler) = self.handlers.get(self.index).cloned() else {
            return;
        };
        let position = self.index;
        self.index += 1;
        handler(self);

        if self.index == position + 1 {
            self.abort();
        }
    }

    /// Skip every handler that has not started yet.
    pub fn abort(&mut self) {
        self.index = self.handlers.len();
    }

    /// Returns true once no handler is left to run.
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.handlers.len()
    }

    // --- Request accessors ---

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Percent-decoded request path. The raw form stays on `request().uri()`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path parameter bound by the matched route.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// First query-string value for `key`.
    pub fn query(&self, key: &str) -> Option<&str> {
        lookup(&self.query, key)
    }

    /// First urlencoded form value for `key`.
    pub fn post_form(&self, key: &str) -> Option<&str> {
        lookup(&self.form, key)
    }

    /// Request header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    pub fn request_id(&self) -> Option<&str> {
        self.header(X_REQUEST_ID)
    }

    pub fn request(&self) -> &Request<Bytes> {
        &self.request
    }

    // --- Response writers ---

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn status(&mut self, code: StatusCode) {
        self.status_code = code;
    }

    /// Set a response header. Invalid names or values are logged and skipped.
    pub fn set_header(&mut self, name: &str, value: &str) {
        match (HeaderName::try_from(name), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                tracing::warn!(header = %name, "Ignoring invalid response header");
            }
        }
    }

    fn set_content_type(&mut self, content_type: &'static str) {
        self.headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }

    /// Write a plain-text body.
    pub fn string(&mut self, code: StatusCode, text: impl fmt::Display) {
        self.set_content_type(TEXT_PLAIN);
        self.status(code);
        self.body.extend_from_slice(text.to_string().as_bytes());
    }

    /// Write `value` serialized as JSON. Serialization failures become a 500.
    pub fn json<T: Serialize + ?Sized>(&mut self, code: StatusCode, value: &T) {
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                self.set_content_type(APPLICATION_JSON);
                self.status(code);
                self.body.extend_from_slice(&bytes);
            }
            Err(e) => {
                tracing::error!(error = %e, path = %self.path, "Failed to serialize JSON response");
                self.body.clear();
                self.string(StatusCode::INTERNAL_SERVER_ERROR, e);
            }
        }
    }

    /// Write an HTML body.
    pub fn html(&mut self, code: StatusCode, html: impl Into<String>) {
        self.set_content_type(TEXT_HTML);
        self.status(code);
        self.body.extend_from_slice(html.into().as_bytes());
    }

    /// Write raw bytes without touching the content type.
    pub fn data(&mut self, code: StatusCode, data: impl AsRef<[u8]>) {
        self.status(code);
        self.body.extend_from_slice(data.as_ref());
    }

    /// Stop the chain and answer with `{"message": ...}`.
    pub fn fail(&mut self, code: StatusCode, message: &str) {
        self.abort();
        self.json(code, &ErrorMessage { message });
    }

    /// Drop everything written to the response so far.
    pub(crate) fn reset(&mut self) {
        self.status_code = StatusCode::OK;
        self.headers.clear();
        self.body.clear();
    }

    /// Response body written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn response_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl IntoResponse for Context {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status_code;
        *response.headers_mut() = self.headers;
        response
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("params", &self.params)
            .field("handlers", &self.handlers.len())
            .field("index", &self.index)
            .field("status_code", &self.status_code)
            .finish()
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
