//! Local HTTP server.
//!
//! Each connection is served on its own task. Requests are buffered,
//! routed, converted to events and run through the matching pipeline. On
//! shutdown the listener stops accepting, open connections finish their
//! current request, and the server waits for them up to a grace period.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use things_core::{ApiResponse, Envelope, ErrorBody};
use things_service::ThingsApi;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::convert::{self, HttpResponse};
use crate::error::ServerError;
use crate::router;
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// Error code for requests that match no route.
pub const ROUTE_NOT_FOUND: &str = "ROUTE_NOT_FOUND";

/// Default time open connections get to finish after shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Serves the Things API over HTTP/1.
#[derive(Debug, Clone)]
pub struct LocalServer {
    api: Arc<ThingsApi>,
    addr: SocketAddr,
    shutdown_timeout: Duration,
}

impl LocalServer {
    /// Creates a server for `api` bound to `addr` when run.
    pub fn new(api: ThingsApi, addr: SocketAddr) -> Self {
        Self {
            api: Arc::new(api),
            addr,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    /// Sets how long open connections may run after shutdown.
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Returns the configured address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Runs until Ctrl-C or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_with_shutdown(ShutdownSignal::with_os_signals()).await
    }

    /// Binds and serves until `shutdown` is triggered.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| ServerError::Bind { addr: self.addr, source })?;
        self.serve(listener, shutdown).await
    }

    /// Serves connections from an already bound listener. After shutdown it
    /// waits up to the shutdown timeout for open connections to close.
    pub async fn serve(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        info!(addr = %listener.local_addr()?, "Server listening");
        let server = Arc::new(self);
        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            let server = Arc::clone(&server);
                            let shutdown = shutdown.clone();
                            let guard = tracker.acquire();
                            tokio::spawn(async move {
                                if let Err(e) = server.handle_connection(stream, remote_addr, shutdown).await {
                                    error!(remote_addr = %remote_addr, error = %e, "Connection error");
                                }
                                drop(guard);
                            });
                        }
                        Err(e) => error!(error = %e, "Failed to accept connection"),
                    }
                }

                () = shutdown.recv() => {
                    info!("Shutdown signal received, stopping server");
                    break;
                }
            }
        }

        drop(listener);
        info!(
            connections = tracker.active(),
            timeout = ?server.shutdown_timeout,
            "Waiting for open connections"
        );
        if tokio::time::timeout(server.shutdown_timeout, tracker.drained()).await.is_err() {
            warn!(connections = tracker.active(), "Shutdown timeout reached with connections open");
        }

        info!("Server stopped");
        Ok(())
    }

    async fn handle_connection(
        self: &Arc<Self>,
        stream: tokio::net::TcpStream,
        remote_addr: SocketAddr,
        shutdown: ShutdownSignal,
    ) -> Result<(), hyper::Error> {
        let server = Arc::clone(self);
        let service = service_fn(move |req: Request<Incoming>| {
            let server = Arc::clone(&server);
            async move { server.handle_request(req, remote_addr).await }
        });

        let conn = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
        tokio::pin!(conn);

        tokio::select! {
            result = conn.as_mut() => return result,
            () = shutdown.recv() => {
                debug!(remote_addr = %remote_addr, "Draining connection");
                conn.as_mut().graceful_shutdown();
            }
        }

        conn.await
    }

    async fn handle_request(&self, req: Request<Incoming>, remote_addr: SocketAddr) -> Result<HttpResponse, Infallible> {
        let (parts, body) = req.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(error = %e, "Failed to read request body");
                return Ok(convert::to_http(ApiResponse::new(StatusCode::BAD_REQUEST)));
            }
        };

        let response = self.dispatch_from(Request::from_parts(parts, body), Some(remote_addr)).await;
        Ok(convert::to_http(response))
    }

    /// Routes a buffered request and runs it through its pipeline.
    pub async fn dispatch(&self, request: Request<Bytes>) -> ApiResponse {
        self.dispatch_from(request, None).await
    }

    async fn dispatch_from(&self, request: Request<Bytes>, remote_addr: Option<SocketAddr>) -> ApiResponse {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        debug!(method = %method, path = %path, "Dispatching request");

        let Some(route) = router::route(&method, &path) else {
            return route_not_found(&method, &path);
        };

        let event = convert::to_event(&request, route.thing_id.as_deref(), remote_addr);
        convert::surface(self.api.invoke(route.operation, event).await)
    }
}

fn route_not_found(method: &http::Method, path: &str) -> ApiResponse {
    let envelope = Envelope::<()>::Failure(ErrorBody {
        code: ROUTE_NOT_FOUND.to_string(),
        message: format!("No route for {method} {path}"),
        details: None,
    });

    ApiResponse::json(StatusCode::NOT_FOUND, &envelope)
        .unwrap_or_else(|_| ApiResponse::new(StatusCode::NOT_FOUND))
}
