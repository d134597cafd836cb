//! The server shell: one handler, one accept loop, nothing in between.
//!
//! [`Server`] has two states. Constructed — the handler is bound, nothing
//! listens. Running — [`run`](Server::run) has bound the listener and serves
//! until the process is told to stop. There is no way back from running to
//! constructed; termination is external (SIGTERM from the orchestrator,
//! Ctrl-C locally). On the first signal the loop stops accepting and drains
//! in-flight connections before returning, so an orchestrator's grace period
//! (Kubernetes defaults to 30 s) is enough for clean rollouts.

use std::convert::Infallible;
use std::sync::Arc;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Rendered;

/// The HTTP server: a single stored handler plus the machinery to feed it.
///
/// There is no router. The handler receives every request and dispatches
/// however it likes — conventionally a `match` on
/// `(method, path_segments)`:
///
/// ```rust,no_run
/// use plinth::{Request, Rendered, Response, Server};
///
/// #[tokio::main]
/// async fn main() {
///     Server::new(handle).run("0.0.0.0", 3000).await.unwrap();
/// }
///
/// async fn handle(req: Request) -> Rendered {
///     let method = req.method().to_owned();
///     let path: Vec<String> = req.path_segments().iter().map(|s| s.to_string()).collect();
///     let segments: Vec<&str> = path.iter().map(String::as_str).collect();
///
///     match (method.as_str(), segments.as_slice()) {
///         ("GET", ["ping"]) => Response::ok_with(|r| { r.text("pong"); }).render(),
///         _ => Response::new(404).render(),
///     }
/// }
/// ```
pub struct Server {
    handler: BoxedHandler,
}

impl Server {
    /// Stores `handler` as the sole per-request entry point.
    pub fn new(handler: impl Handler) -> Self {
        Self { handler: handler.into_boxed_handler() }
    }

    /// Wraps a raw hyper request and invokes the handler.
    ///
    /// Returns exactly what the handler returns, converted to the wire type.
    /// The hosting runtime calls this once per request; nothing stops you
    /// calling it yourself when embedding the server elsewhere.
    pub async fn call(&self, raw: http::Request<hyper::body::Incoming>) -> Rendered {
        self.dispatch(Request::from_hyper(raw)).await
    }

    async fn dispatch(&self, req: Request) -> Rendered {
        self.handler.call(req).await
    }

    /// Binds `host:port` and serves until the process receives SIGTERM or
    /// Ctrl-C, then drains in-flight connections and returns.
    pub async fn run(self, host: &str, port: u16) -> Result<(), Error> {
        let listener = TcpListener::bind((host, port)).await?;
        let addr = listener.local_addr()?;
        let server = Arc::new(self);

        info!(addr = %addr, "plinth listening");

        // Every connection task lands in the JoinSet so the drain below can
        // wait for all of them.
        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check shutdown before accept so a signal stops new
                // connections even when more are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let server = Arc::clone(&server);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // service_fn runs once per request on the
                        // connection, not once per connection.
                        let svc = service_fn(move |raw| {
                            let server = Arc::clone(&server);
                            async move { Ok::<_, Infallible>(server.call(raw).await) }
                        });

                        // The auto builder speaks whichever of HTTP/1.1 and
                        // HTTP/2 the client negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished tasks so the set stays bounded on
                // long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("plinth stopped");
        Ok(())
    }
}

/// Resolves on the first shutdown signal: SIGTERM or SIGINT on Unix,
/// Ctrl-C only elsewhere.
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

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{IntoResponse, Response};
    use bytes::Bytes;
    use http_body_util::BodyExt;

    fn wrapped(method: &str, uri: &str, body: &str) -> Request {
        let (parts, ()) = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        Request::from_parts(parts, Bytes::copy_from_slice(body.as_bytes()))
    }

    #[tokio::test]
    async fn handler_receives_the_wrapped_request() {
        let server = Server::new(|req: Request| async move {
            assert_eq!(req.method(), "GET");
            assert_eq!(req.path_segments(), ["users", "42"]);
            Response::ok_with(|r| {
                r.text("seen");
            })
            .render()
        });

        let rendered = server.dispatch(wrapped("GET", "/users/42", "")).await;
        assert_eq!(rendered.status(), 200);
    }

    #[tokio::test]
    async fn call_returns_exactly_what_the_handler_returns() {
        let server = Server::new(|_req: Request| async move {
            let mut response = Response::new(418);
            response.header("x-kettle", "on").text("short and stout");
            response.render()
        });

        let rendered = server.dispatch(wrapped("GET", "/teapot", "")).await;
        assert_eq!(rendered.status(), 418);
        assert_eq!(rendered.headers().get("x-kettle").unwrap(), "on");
        let body = rendered.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, "short and stout".as_bytes());
    }

    #[tokio::test]
    async fn handlers_may_return_anything_into_response() {
        let server = Server::new(|_req: Request| async move { "plain" });

        let rendered = server.dispatch(wrapped("GET", "/", "")).await;
        assert_eq!(rendered.status(), 200);
        assert_eq!(
            rendered.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn dispatch_by_matching_method_and_segments() {
        let server = Server::new(|mut req: Request| async move {
            let method = req.method().to_owned();
            let path: Vec<String> = req.path_segments().iter().map(|s| s.to_string()).collect();
            let segments: Vec<&str> = path.iter().map(String::as_str).collect();

            match (method.as_str(), segments.as_slice()) {
                ("GET", ["users", id]) => {
                    Response::ok_with(|r| {
                        r.json(&serde_json::json!({ "id": id }));
                    })
                    .render()
                }
                ("POST", ["users"]) => {
                    let params = req.params().await;
                    let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("?");
                    let mut response = Response::new(201);
                    response.json(&serde_json::json!({ "name": name }));
                    response.render()
                }
                _ => Response::new(404).into_response(),
            }
        });

        let ok = server.dispatch(wrapped("GET", "/users/7", "")).await;
        assert_eq!(ok.status(), 200);

        let created = server
            .dispatch(wrapped("POST", "/users", r#"{"name":"alice"}"#))
            .await;
        assert_eq!(created.status(), 201);

        let missing = server.dispatch(wrapped("DELETE", "/users/7", "")).await;
        assert_eq!(missing.status(), 404);
    }
}
