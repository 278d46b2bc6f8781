//! Server bind/serve and the dedicated API thread.

use std::net::SocketAddr;
use std::thread::{self, JoinHandle};

use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};

use crate::create_router;

/// Serve the API until the shutdown signal flips.
///
/// Intended to run on a tokio runtime; blocks until the server is shut
/// down or fails to bind.
pub async fn run_server(
    port: u16,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<(), std::io::Error> {
    // The showcase window and any local dashboard are different origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router().layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("API server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            log::info!("API server shutting down gracefully");
        })
        .await
}

/// Handle for the background API thread.
pub struct ApiHandle {
    shutdown_tx: watch::Sender<bool>,
    thread: Option<JoinHandle<()>>,
}

impl ApiHandle {
    /// Signal shutdown and wait for the server thread to drain.
    pub fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Spawn the API server on its own thread with a private runtime, keeping
/// the windowed event loop free of the async executor.
pub fn spawn(port: u16) -> ApiHandle {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let thread = thread::Builder::new()
        .name("waitlist-api".into())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("Failed to build API runtime");
            if let Err(error) = runtime.block_on(run_server(port, shutdown_rx)) {
                log::error!("API server exited with error: {error}");
            }
        })
        .expect("Failed to spawn API thread");
    ApiHandle {
        shutdown_tx,
        thread: Some(thread),
    }
}
