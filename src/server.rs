//! The listener loop.
//!
//! Bind once, then accept forever. Every accepted connection gets its own
//! tokio task running [`connection::handle`]; there is no pool, no
//! connection limit and no shutdown signal. A failed `accept()` is logged
//! and the loop carries on. The only fatal condition is failing to bind,
//! and even that is returned to the caller rather than ending the process
//! here.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::connection::{self, Limits};
use crate::error::Error;
use crate::router::Router;

/// The HTTP server.
pub struct Server {
    addr: String,
    limits: Limits,
}

impl Server {
    /// Configures the server to bind to `addr` (a `host:port` string, e.g.
    /// `"0.0.0.0:6969"` or `"localhost:8080"`) when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust,no_run
    /// use myhttp::Server;
    /// let server = Server::bind("0.0.0.0:6969");
    /// ```
    pub fn bind(addr: impl Into<String>) -> Self {
        Self { addr: addr.into(), limits: Limits::default() }
    }

    /// Bytes requested per socket read. Defaults to 1024.
    pub fn read_chunk_size(mut self, bytes: usize) -> Self {
        self.limits.read_chunk_size = bytes.max(1);
        self
    }

    /// Largest request (head plus body) accepted before replying `413`.
    /// Defaults to 8 KiB.
    pub fn max_request_size(mut self, bytes: usize) -> Self {
        self.limits.max_request_size = bytes.max(1);
        self
    }

    /// Binds the listener and serves `router` forever.
    ///
    /// Returns only if binding fails. Callers typically treat that as fatal:
    ///
    /// ```rust,no_run
    /// # async fn run(app: myhttp::Router) {
    /// if let Err(e) = myhttp::Server::bind("0.0.0.0:6969").serve(app).await {
    ///     eprintln!("{e}");
    ///     std::process::exit(1);
    /// }
    /// # }
    /// ```
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .map_err(|source| Error::Bind { addr: self.addr.clone(), source })?;
        self.run(listener, router).await
    }

    /// Serves `router` on an already-bound listener. Never returns.
    ///
    /// Useful for binding port 0 and reading the real address back first.
    pub async fn run(self, listener: TcpListener, router: Router) -> Result<(), Error> {
        // Shared read-only by every connection task.
        let router = Arc::new(router);
        let limits = self.limits;

        match listener.local_addr() {
            Ok(addr) => info!(%addr, routes = router.len(), "myhttp listening"),
            Err(_) => info!(addr = %self.addr, routes = router.len(), "myhttp listening"),
        }

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(v) => v,
                Err(e) => {
                    error!("{}", Error::Accept(e));
                    continue;
                }
            };
            debug!(%peer, "connection accepted");

            let router = Arc::clone(&router);
            tokio::spawn(async move {
                match connection::handle(stream, &router, limits).await {
                    Ok(()) => debug!(%peer, "response sent"),
                    Err(Error::EmptyRead) => debug!(%peer, "{}", Error::EmptyRead),
                    Err(e) => warn!(%peer, "{e}"),
                }
            });
        }
    }
}
