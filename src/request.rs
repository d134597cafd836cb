//! Incoming HTTP request view.
//!
//! A [`Request`] is a read-only window onto the raw hyper request: method,
//! path segments, query parameters, headers, and a lazily-read body. It is
//! built once per inbound request by the server shell, handed to the handler,
//! and dropped when the handler returns — it is never shared across tasks,
//! which is why the one-shot body cache needs no synchronization beyond
//! exclusive ownership.

use std::sync::OnceLock;

use bytes::Bytes;
use http::HeaderMap;
use http::request::Parts;
use http_body_util::BodyExt;
use serde_json::{Map, Value};

/// An incoming HTTP request, wrapped for handler consumption.
pub struct Request {
    parts: Parts,
    incoming: Option<hyper::body::Incoming>,
    body: Option<Bytes>,
    query_params: OnceLock<Vec<Vec<String>>>,
}

impl Request {
    pub(crate) fn from_hyper(raw: http::Request<hyper::body::Incoming>) -> Self {
        let (parts, incoming) = raw.into_parts();
        Self {
            parts,
            incoming: Some(incoming),
            body: None,
            query_params: OnceLock::new(),
        }
    }

    /// Builds a request with an already-buffered body. Test seam — the real
    /// constructor takes the hyper stream, which cannot be fabricated.
    #[cfg(test)]
    pub(crate) fn from_parts(parts: Parts, body: Bytes) -> Self {
        Self {
            parts,
            incoming: None,
            body: Some(body),
            query_params: OnceLock::new(),
        }
    }

    /// Uppercase HTTP verb, e.g. `"GET"`.
    pub fn method(&self) -> &str {
        self.parts.method.as_str()
    }

    /// Raw URI path, e.g. `"/users/42"`.
    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Path split on `/` with empty segments dropped, so leading, trailing,
    /// and repeated slashes all collapse uniformly:
    ///
    /// ```text
    /// "/api//users/"  →  ["api", "users"]
    /// "/"             →  []
    /// ```
    ///
    /// This is the value handlers conventionally `match` on, together with
    /// [`method`](Request::method).
    pub fn path_segments(&self) -> Vec<&str> {
        self.path().split('/').filter(|s| !s.is_empty()).collect()
    }

    /// The request body, collected from the wire on first access and cached.
    ///
    /// The underlying hyper stream is not re-readable, so the first call
    /// drains it; every later call returns the cached bytes. A transport
    /// error while collecting yields an empty body.
    pub async fn body(&mut self) -> &[u8] {
        if self.body.is_none() {
            let collected = match self.incoming.take() {
                Some(stream) => match stream.collect().await {
                    Ok(buf) => buf.to_bytes(),
                    Err(_) => Bytes::new(),
                },
                None => Bytes::new(),
            };
            self.body = Some(collected);
        }
        self.body.as_deref().unwrap_or_default()
    }

    /// The body parsed as a JSON object.
    ///
    /// Lenient on purpose: malformed JSON, non-object JSON, and an empty
    /// body all yield an empty map. Handlers never need to guard request
    /// parsing with error handling.
    pub async fn params(&mut self) -> Map<String, Value> {
        serde_json::from_slice(self.body().await).unwrap_or_default()
    }

    /// Raw query string, `""` when the URI has none.
    pub fn query(&self) -> &str {
        self.parts.uri.query().unwrap_or("")
    }

    /// Query string split on `&`, each fragment split on `=`, parsed on
    /// first access and cached:
    ///
    /// ```text
    /// "size=small&id=11"  →  [["size", "small"], ["id", "11"]]
    /// "flag&id=11"        →  [["flag"], ["id", "11"]]
    /// ""                  →  []
    /// ```
    ///
    /// A fragment with no `=` keeps its one-element shape — callers that
    /// want a value must check the length rather than assume a pair.
    pub fn query_params(&self) -> &[Vec<String>] {
        self.query_params.get_or_init(|| {
            self.query()
                .split('&')
                .filter(|fragment| !fragment.is_empty())
                .map(|fragment| fragment.split('=').map(str::to_owned).collect())
                .collect()
        })
    }

    /// Pass-through to hyper's header map. Keys are lowercase.
    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Single header lookup, `None` if absent or not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(uri: &str, body: &str) -> Request {
        let (parts, ()) = http::Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(())
            .unwrap()
            .into_parts();
        Request::from_parts(parts, Bytes::copy_from_slice(body.as_bytes()))
    }

    #[test]
    fn path_segments_drop_empty_segments() {
        assert_eq!(request("/api//users/", "").path_segments(), ["api", "users"]);
        assert_eq!(request("/users/42", "").path_segments(), ["users", "42"]);
        assert!(request("/", "").path_segments().is_empty());
    }

    #[test]
    fn query_params_split_on_ampersand_then_equals() {
        let req = request("/search?size=small&id=11", "");
        assert_eq!(
            req.query_params(),
            [
                vec!["size".to_owned(), "small".to_owned()],
                vec!["id".to_owned(), "11".to_owned()]
            ]
        );
    }

    #[test]
    fn query_fragment_without_equals_keeps_single_element_shape() {
        let req = request("/search?flag&id=11", "");
        assert_eq!(
            req.query_params(),
            [vec!["flag".to_owned()], vec!["id".to_owned(), "11".to_owned()]]
        );
    }

    #[test]
    fn absent_query_yields_empty_string_and_no_params() {
        let req = request("/search", "");
        assert_eq!(req.query(), "");
        assert!(req.query_params().is_empty());
    }

    #[tokio::test]
    async fn params_decodes_a_valid_json_object() {
        let mut req = request("/users", r#"{"name":"alice","age":30}"#);
        let params = req.params().await;
        assert_eq!(params.get("name"), Some(&json!("alice")));
        assert_eq!(params.get("age"), Some(&json!(30)));
    }

    #[tokio::test]
    async fn params_is_empty_on_malformed_or_empty_body() {
        assert!(request("/users", "not json").params().await.is_empty());
        assert!(request("/users", "").params().await.is_empty());
        // valid JSON, but not an object
        assert!(request("/users", "[1,2,3]").params().await.is_empty());
    }

    #[tokio::test]
    async fn body_is_cached_across_reads() {
        let mut req = request("/users", "payload");
        assert_eq!(req.body().await, b"payload");
        assert_eq!(req.body().await, b"payload");
    }

    #[test]
    fn header_lookup_is_lowercase_keyed() {
        let req = request("/users", "");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert!(req.headers().contains_key("content-type"));
        assert_eq!(req.header("x-missing"), None);
    }

    #[test]
    fn method_is_uppercase() {
        assert_eq!(request("/users", "").method(), "POST");
    }
}
