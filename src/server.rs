//! HTTP server and graceful shutdown.
//!
//! # Graceful shutdown and Kubernetes
//!
//! When Kubernetes terminates a pod it sends **SIGTERM** and waits
//! `terminationGracePeriodSeconds` (default 30 s) before sending SIGKILL.
//!
//! The server reacts by:
//! 1. Immediately stopping `listener.accept()` — no new connections are made.
//! 2. Letting every in-flight connection task run to completion.
//! 3. Returning from [`Server::serve`], which lets `main` exit cleanly.
//!
//! The store is dropped with the process; it was never meant to outlive it.

use std::net::SocketAddr;
use std::sync::Arc;

use http::StatusCode;
use http_body_util::BodyExt;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Error;
use crate::handler::ErasedHandler;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::store::UserStore;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not a valid `host:port` string.
    pub fn bind(addr: &str) -> Self {
        let addr: SocketAddr = addr.parse().expect("invalid socket address");
        Self { addr }
    }

    /// Starts accepting connections and dispatching them through `router`,
    /// with `store` shared across every handler.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve(self, router: Router, store: UserStore) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;

        // Arcs let the routing table and the store be shared across concurrent
        // connection tasks without copying either.
        let router = Arc::new(router);
        let store = Arc::new(store);

        info!(addr = %self.addr, "roster listening");

        // JoinSet tracks every spawned connection task so we can wait for
        // them all to finish during graceful shutdown.
        let mut tasks = tokio::task::JoinSet::new();

        // Pin the shutdown future so we can poll it in a loop.
        // Futures in Rust must not move in memory after the first poll — that
        // is what `Pin` enforces. `tokio::pin!` pins the future on the stack.
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // `biased` makes select! check arms top-to-bottom instead of
                // randomly. We check shutdown first so a SIGTERM immediately
                // stops accepting new connections, even if more are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let store = Arc::clone(&store);
                    // TokioIo adapts tokio's AsyncRead/AsyncWrite to the hyper
                    // IO traits.
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // `service_fn` turns a plain async function into a
                        // hyper `Service`. The closure is called once per
                        // request on the connection, not once per connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            let store = Arc::clone(&store);
                            async move { dispatch(router, store, req).await }
                        });

                        // `auto::Builder` transparently handles both HTTP/1.1
                        // and HTTP/2 — whatever the client negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        // Drain: wait for every in-flight connection to finish before we return.
        while tasks.join_next().await.is_some() {}

        info!("roster stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Core hot path: routes one request, runs its handler against the store, and
/// produces one response.
///
/// The error type is [`Infallible`](std::convert::Infallible) — all failures
/// are handled internally (404, 422, …) so hyper never sees an error.
async fn dispatch(
    router: Arc<Router>,
    store: Arc<UserStore>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<http_body_util::Full<bytes::Bytes>>, std::convert::Infallible> {
    let (parts, body) = req.into_parts();
    let method = parts.method;
    let path = parts.uri.path().to_owned();

    let response = match router.lookup(&method, &path) {
        Some((handler, params)) => match body.collect().await {
            Ok(collected) => {
                let req = Request::new(
                    method.clone(),
                    path.clone(),
                    parts.headers,
                    collected.to_bytes(),
                    params,
                );
                handler.call(store, req).await
            }
            // The client went away mid-body; nothing to validate, nothing
            // mutated.
            Err(_) => Response::status(StatusCode::BAD_REQUEST),
        },
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .json(br#"{"detail":"Not Found"}"#.to_vec()),
    };

    info!(
        method = %method,
        path = %path,
        status = response.status_code().as_u16(),
        "request"
    );

    Ok(response.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** (sent by `kubectl` and the
/// Kubernetes control plane) and **SIGINT** (Ctrl-C, for local dev).
/// On Windows only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    // `pending()` is a future that never resolves — on non-Unix platforms
    // the SIGTERM arm is effectively disabled.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
