//! Outgoing HTTP response builder and the [`IntoResponse`] conversion trait.
//!
//! Build a [`Response`] in your handler, `render()` it, return it. That is
//! the entire job description.

use bytes::Bytes;
use http_body_util::Full;
use serde::Serialize;

/// The wire-level response handed back to hyper for transmission.
pub type Rendered = http::Response<Full<Bytes>>;

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response under construction.
///
/// Each body method **replaces** the body wholesale and sets the matching
/// `content-type` — there is no append. [`render`](Response::render) projects
/// the accumulated state into the wire type; it does not mutate, so rendering
/// twice yields two independent, value-equal responses.
///
/// ```rust
/// use plinth::Response;
///
/// // scoped configuration
/// let rendered = Response::ok_with(|r| {
///     r.header("x-request-id", "abc123")
///      .text("hello");
/// }).render();
///
/// // or step by step
/// let mut r = Response::new(404);
/// r.text("no such user");
/// let rendered = r.render();
/// ```
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl Response {
    /// A response with the given status, no headers, empty body.
    ///
    /// The status is taken as-is — range validation is the `http` crate's
    /// business at [`render`](Response::render) time, not ours.
    pub fn new(status: u16) -> Self {
        Self { status, headers: Vec::new(), body: Bytes::new() }
    }

    /// `200 OK`, no headers, empty body.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// `200 OK`, configured in place before it is returned:
    ///
    /// ```rust
    /// # use plinth::Response;
    /// let r = Response::ok_with(|r| { r.json(&serde_json::json!({"id": 1})); });
    /// assert_eq!(r.status(), 200);
    /// ```
    pub fn ok_with(configure: impl FnOnce(&mut Response)) -> Self {
        let mut response = Self::ok();
        configure(&mut response);
        response
    }

    /// Current status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Sets a header. Names are lowercased; setting the same name again
    /// replaces the previous value.
    pub fn header(&mut self, name: &str, value: &str) -> &mut Self {
        let name = name.to_ascii_lowercase();
        self.headers.retain(|(existing, _)| *existing != name);
        self.headers.push((name, value.to_owned()));
        self
    }

    /// The one body primitive: sets `content-type` and replaces the body.
    ///
    /// [`json`](Response::json), [`html`](Response::html), and
    /// [`text`](Response::text) are specializations of this.
    pub fn write(&mut self, content: impl Into<Bytes>, content_type: &str) -> &mut Self {
        self.header("content-type", content_type);
        self.body = content.into();
        self
    }

    /// Serializes `value` and writes it as `application/json`.
    ///
    /// # Panics
    ///
    /// Panics if `value` cannot be serialized. A response the framework
    /// cannot encode is a programming error, not a runtime condition to
    /// recover from.
    pub fn json(&mut self, value: &impl Serialize) -> &mut Self {
        let encoded = serde_json::to_vec(value).expect("unserializable response body");
        self.write(encoded, "application/json")
    }

    /// Writes an HTML body (`text/html; charset=utf-8`).
    pub fn html(&mut self, content: impl Into<Bytes>) -> &mut Self {
        self.write(content, "text/html; charset=utf-8")
    }

    /// Writes a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(&mut self, content: impl Into<Bytes>) -> &mut Self {
        self.write(content, "text/plain; charset=utf-8")
    }

    /// Projects `(status, headers, body)` into the wire type hyper transmits.
    ///
    /// Pure: the builder is untouched, and each call returns an independent
    /// [`Rendered`] (the body `Bytes` clone is a cheap shared handle).
    ///
    /// # Panics
    ///
    /// Panics if the accumulated state is not expressible as an HTTP
    /// response — a status outside 100–999 or a malformed header name.
    pub fn render(&self) -> Rendered {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
            .body(Full::new(self.body.clone()))
            .expect("invalid response state")
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into a wire-level [`Rendered`] response.
///
/// Handlers may return anything implementing this trait. A [`Rendered`]
/// passes through untouched, so `Server::call` hands back exactly what the
/// handler produced; a [`Response`] is rendered on the way out.
pub trait IntoResponse {
    fn into_response(self) -> Rendered;
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Rendered {
        self
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> Rendered {
        self.render()
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Rendered {
        Response::ok_with(|r| {
            r.text(self);
        })
        .render()
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Rendered {
        Response::ok_with(|r| {
            r.text(self);
        })
        .render()
    }
}
