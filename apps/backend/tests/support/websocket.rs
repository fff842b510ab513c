// WebSocket test utilities

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use pablo_backend::middleware::structured_logger::StructuredLogger;
use pablo_backend::ws::hub::WsRegistry;
use pablo_backend::{routes, AppState, MatchRegistry, ServerConfig};

pub struct TestServer {
    pub handle: actix_web::dev::ServerHandle,
    pub addr: std::net::SocketAddr,
    pub join: tokio::task::JoinHandle<Result<(), std::io::Error>>,
    pub registry: Arc<WsRegistry>,
    /// Lets tests lay out a table under a running server.
    pub matches: Arc<MatchRegistry>,
}

impl TestServer {
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
        let _ = self.join.await;
    }
}

/// Start a real HTTP server on a random port with the production routes.
///
/// Each test gets its own `AppState`, so registries never leak between
/// tests running concurrently. A fixed deck seed keeps deals reproducible.
pub async fn start_test_server() -> Result<TestServer, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let config = ServerConfig {
        deck_seed: Some(7),
        ..ServerConfig::default()
    };
    let state_data = web::Data::new(AppState::new(config));
    let registry = state_data.websocket_registry();
    let matches = state_data.match_registry();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .wrap(StructuredLogger)
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let handle = server.handle();
    let join = tokio::spawn(server);

    Ok(TestServer {
        handle,
        addr,
        join,
        registry,
        matches,
    })
}

pub async fn wait_for_connections(
    registry: &WsRegistry,
    expected: usize,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = tokio::time::Instant::now();
    loop {
        if registry.connection_count() == expected {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(format!(
                "timeout waiting for connection_count == {expected} (got {})",
                registry.connection_count()
            )
            .into());
        }
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
