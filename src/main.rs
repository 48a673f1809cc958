//! tgin demo server.
//!
//! ```text
//!     Client Request
//!         → http::server (request ID, trace, body limit, timeout)
//!         → engine (route lookup, group middleware chain)
//!         → handler (writes into Context)
//!     Client Response
//! ```

use axum::http::StatusCode;
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;

use tgin::config::load_config;
use tgin::lifecycle::signals::wait_for_shutdown_signal;
use tgin::observability::logging::init_logging;
use tgin::{Context, Engine, HttpServer, ServerConfig, ServerError, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "tgin", version, about = "tgin demo HTTP server")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    let engine = build_engine();
    for route in engine.routes() {
        tracing::info!(method = %route.method, pattern = %route.pattern, "Route registered");
    }

    let listener = HttpServer::bind(&config.listener).await?;
    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move { wait_for_shutdown_signal(&shutdown).await });

    HttpServer::new(engine, config).run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_engine() -> Engine {
    let mut engine = Engine::with_defaults();

    engine.get("/", |c| {
        let path = c.path().to_string();
        c.html(StatusCode::OK, format!("<h1>Hello tgin</h1><p>URL.Path = {path}</p>"));
    });
    engine.get("/hello", echo_headers);
    engine.get("/hello/:name", |c| {
        let name = c.param("name").unwrap_or_default().to_string();
        let path = c.path().to_string();
        c.string(StatusCode::OK, format_args!("hello {name}, you're at {path}\n"));
    });
    engine.get("/assets/*filepath", |c| {
        let filepath = c.param("filepath").unwrap_or_default().to_string();
        c.json(StatusCode::OK, &json!({ "filepath": filepath }));
    });
    engine.post("/login", login);

    {
        let mut v1 = engine.group("/v1");
        v1.get("/", |c| c.html(StatusCode::OK, "<h1>Hello tgin v1</h1>"));
        v1.get("/hello", |c| {
            let name = c.query("name").unwrap_or("stranger").to_string();
            let path = c.path().to_string();
            c.string(StatusCode::OK, format_args!("hello {name}, you're at {path}\n"));
        });
    }

    {
        let mut v2 = engine.group("/v2");
        v2.use_middleware(v2_timer);
        v2.get("/hello/:name", |c| {
            let name = c.param("name").unwrap_or_default().to_string();
            let path = c.path().to_string();
            c.string(StatusCode::OK, format_args!("hello {name}, you're at {path}\n"));
        });
        v2.post("/login", login);
    }

    engine
}

fn echo_headers(c: &mut Context) {
    let mut lines: Vec<String> = c
        .request()
        .headers()
        .iter()
        .map(|(name, value)| format!("Header[{:?}] = {:?}\n", name.as_str(), value))
        .collect();
    lines.sort();
    c.string(StatusCode::OK, lines.concat());
}

fn login(c: &mut Context) {
    let username = c.post_form("username").unwrap_or_default().to_string();
    let password = c.post_form("password").unwrap_or_default().to_string();
    c.json(
        StatusCode::OK,
        &json!({ "username": username, "password": password }),
    );
}

/// Group-scoped middleware for `/v2`: times the rest of the chain.
fn v2_timer(c: &mut Context) {
    let started = std::time::Instant::now();
    c.next();
    let elapsed = started.elapsed();
    tracing::info!(
        status = c.status_code().as_u16(),
        path = %c.path(),
        elapsed_us = elapsed.as_micros() as u64,
        "v2 group request"
    );
}
