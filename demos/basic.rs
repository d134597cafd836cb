//! Minimal plinth example — CRUD-style JSON endpoints and health checks,
//! dispatched by one `match`.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/users/42
//!   curl 'http://localhost:3000/users/42?fields=name&verbose'
//!   curl -X POST http://localhost:3000/users \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"alice"}'
//!   curl -X DELETE http://localhost:3000/users/42
//!   curl http://localhost:3000/healthz

use plinth::{health, Rendered, Request, Response, Server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    Server::new(handle)
        .run("0.0.0.0", 3000)
        .await
        .expect("server error");
}

async fn handle(mut req: Request) -> Rendered {
    let method = req.method().to_owned();
    let path: Vec<String> = req.path_segments().iter().map(|s| s.to_string()).collect();
    let segments: Vec<&str> = path.iter().map(String::as_str).collect();

    match (method.as_str(), segments.as_slice()) {
        // GET /users/42 — query params arrive as split pairs; a fragment
        // without '=' (e.g. `verbose`) is a one-element pair.
        ("GET", ["users", id]) => {
            let fields: Vec<&[String]> =
                req.query_params().iter().map(Vec::as_slice).collect();
            Response::ok_with(|r| {
                r.json(&serde_json::json!({
                    "id": id,
                    "name": "alice",
                    "query": fields,
                }));
            })
            .render()
        }

        // POST /users — req.params() is lenient: malformed JSON is just an
        // empty map, so a missing field is the only case to handle.
        ("POST", ["users"]) => {
            let params = req.params().await;
            match params.get("name").and_then(|v| v.as_str()) {
                Some(name) => {
                    let mut r = Response::new(201);
                    r.header("location", "/users/99")
                        .json(&serde_json::json!({ "id": "99", "name": name }));
                    r.render()
                }
                None => {
                    let mut r = Response::new(422);
                    r.json(&serde_json::json!({ "error": "name is required" }));
                    r.render()
                }
            }
        }

        // DELETE /users/42 → 204 No Content
        ("DELETE", ["users", _id]) => Response::new(204).render(),

        ("GET", ["healthz"]) => health::liveness(),
        ("GET", ["readyz"]) => health::readiness(),

        _ => {
            let mut r = Response::new(404);
            r.text("not found");
            r.render()
        }
    }
}
