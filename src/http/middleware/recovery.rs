//! Panic recovery middleware.
//!
//! Converts a panic raised anywhere downstream into a `500 Internal Server
//! Error` so one faulty handler cannot take the connection task down with it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use axum::http::StatusCode;

use crate::http::context::Context;

/// Catch downstream panics, log them and answer with a 500.
pub fn recovery() -> impl Fn(&mut Context) + Send + Sync + 'static {
    |c: &mut Context| {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| c.next())) {
            tracing::error!(
                request_id = c.request_id().unwrap_or("-"),
                method = %c.method(),
                path = %c.path(),
                panic = %panic_message(payload.as_ref()),
                "Handler panicked"
            );
            c.abort();
            c.reset();
            c.string(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
