//! Request logging middleware.

use std::time::Instant;

use crate::http::context::Context;

/// Log method, path, final status and latency of every request it wraps.
pub fn logger() -> impl Fn(&mut Context) + Send + Sync + 'static {
    |c: &mut Context| {
        let start = Instant::now();
        c.next();

        tracing::info!(
            request_id = c.request_id().unwrap_or("-"),
            method = %c.method(),
            path = %c.path(),
            status = c.status_code().as_u16(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Request handled"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use crate::http::context::HandlerFunc;

    #[test]
    fn test_logger_passes_through() {
        let req = Request::builder().uri("/ping").body(Bytes::new()).unwrap();
        let mut c = Context::new(req);
        c.set_handlers(vec![
            Arc::new(logger()) as HandlerFunc,
            Arc::new(|c: &mut Context| c.string(StatusCode::OK, "pong")) as HandlerFunc,
        ]);
        c.next();

        assert_eq!(c.status_code(), StatusCode::OK);
        assert_eq!(c.body(), b"pong");
    }
}
