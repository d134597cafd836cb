//! # plinth
//!
//! A single-handler HTTP microframework. Three pieces, nothing else:
//!
//! - [`Request`] — a normalized, read-only view over the inbound hyper
//!   request: method, path segments, query parameters, headers, and a
//!   lazily-read body with lenient JSON decoding.
//! - [`Response`] — a builder that accumulates status, headers, and body,
//!   then [`render`](Response::render)s into the wire type hyper transmits.
//! - [`Server`] — stores exactly one handler, wraps each raw request, and
//!   hands the handler's response back to the runtime.
//!
//! ## The contract
//!
//! There is no routing engine, no middleware pipeline, no protocol code.
//! hyper and tokio own the event loop, the TCP listener, and HTTP framing;
//! plinth owns the thirty lines between "a request arrived" and "your
//! function ran". Dispatch is your job, and a `match` on
//! `(method, path_segments)` does it without a framework in the way:
//!
//! ```rust,no_run
//! use plinth::{health, Request, Rendered, Response, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     Server::new(handle).run("0.0.0.0", 3000).await.unwrap();
//! }
//!
//! async fn handle(mut req: Request) -> Rendered {
//!     let method = req.method().to_owned();
//!     let path: Vec<String> = req.path_segments().iter().map(|s| s.to_string()).collect();
//!     let segments: Vec<&str> = path.iter().map(String::as_str).collect();
//!
//!     match (method.as_str(), segments.as_slice()) {
//!         ("GET", ["users", id]) => {
//!             Response::ok_with(|r| {
//!                 r.json(&serde_json::json!({ "id": id, "name": "alice" }));
//!             })
//!             .render()
//!         }
//!         ("POST", ["users"]) => {
//!             let params = req.params().await;
//!             match params.get("name") {
//!                 Some(name) => {
//!                     let mut r = Response::new(201);
//!                     r.json(&serde_json::json!({ "name": name }));
//!                     r.render()
//!                 }
//!                 None => Response::new(422).render(),
//!             }
//!         }
//!         ("GET", ["healthz"]) => health::liveness(),
//!         _ => Response::new(404).render(),
//!     }
//! }
//! ```
//!
//! ## What plinth will not do
//!
//! Route patterns, middleware, timeouts, body-size limits, TLS. Pattern
//! routing is a `match`; the rest belongs to the fronting proxy or to
//! hyper's and tokio's defaults. Every feature plinth skips is one the
//! layer above already ships.

mod error;
mod handler;
mod request;
mod response;
mod server;

pub mod health;

pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Rendered, Response};
pub use server::Server;
