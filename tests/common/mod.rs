//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tgin::{Engine, HttpServer, ServerConfig, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server running on a loopback port for the duration of a test.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the serve loop to return.
    #[allow(dead_code)]
    pub async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked");
    }
}

/// Serve `engine` on `addr` with the default config.
pub async fn start_server(addr: SocketAddr, engine: Engine) -> TestServer {
    start_server_with(addr, engine, ServerConfig::default()).await
}

/// Serve `engine` on `addr` with `config`.
pub async fn start_server_with(
    addr: SocketAddr,
    engine: Engine,
    mut config: ServerConfig,
) -> TestServer {
    config.listener.bind_address = addr.to_string();
    let listener = TcpListener::bind(addr).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::new(engine, config);

    let handle = tokio::spawn(async move {
        server.run(listener, receiver).await.unwrap();
    });

    // Give the accept loop a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        shutdown,
        handle,
    }
}
