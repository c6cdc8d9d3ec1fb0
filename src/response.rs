//! Outgoing HTTP response type.
//!
//! A handler never builds a `Response` from scratch. The router hands it a
//! fresh one (`200 OK`, no headers, empty body) and the handler fills it in.
//! `Content-Length` is computed by the encoder; setting it here is pointless.

use std::collections::HashMap;

use http::StatusCode;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`Response::set_content`].
pub enum ContentType {
    Html,         // text/html; charset=utf-8
    Json,         // application/json
    OctetStream,  // application/octet-stream
    Text,         // text/plain
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use myhttp::{ContentType, Response};
/// use http::StatusCode;
///
/// let mut res = Response::new();
/// res.set_status(StatusCode::CREATED);
/// res.set_header("Location", "/users/42");
/// res.set_content(ContentType::Json, br#"{"id":42}"#.to_vec());
/// assert_eq!(res.status_line(), "HTTP/1.1 201 Created");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub(crate) status_line: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Vec<u8>,
}

pub(crate) const OK_LINE: &str = "HTTP/1.1 200 OK";

impl Response {
    /// `HTTP/1.1 200 OK` with no headers and an empty body.
    pub fn new() -> Self {
        Self {
            status_line: OK_LINE.to_owned(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// The response sent when no route matches.
    pub fn not_found() -> Self {
        let mut res = Self::new();
        res.set_status_line("HTTP/1.1 404 Not Found");
        res.text("404 Not Found");
        res
    }

    pub fn status_line(&self) -> &str { &self.status_line }
    pub fn headers(&self) -> &HashMap<String, String> { &self.headers }
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> { &mut self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Header lookup by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Replaces the whole status line verbatim, e.g. `"HTTP/1.1 418 I'm a teapot"`.
    pub fn set_status_line(&mut self, line: impl Into<String>) {
        self.status_line = line.into();
    }

    /// Sets an `HTTP/1.1` status line with the canonical reason phrase.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status_line = status_line(status);
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// Sets `Content-Type` and the body in one go.
    pub fn set_content(&mut self, content_type: ContentType, body: impl Into<Vec<u8>>) {
        self.set_header("Content-Type", content_type.as_str());
        self.set_body(body);
    }

    /// Plain-text body (`text/plain`).
    pub fn text(&mut self, body: impl Into<String>) {
        self.set_content(ContentType::Text, body.into().into_bytes());
    }
}

impl Default for Response {
    fn default() -> Self { Self::new() }
}

pub(crate) fn status_line(status: StatusCode) -> String {
    format!(
        "HTTP/1.1 {} {}",
        status.as_str(),
        status.canonical_reason().unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_response_is_empty_ok() {
        let res = Response::default();
        assert_eq!(res.status_line(), "HTTP/1.1 200 OK");
        assert!(res.headers().is_empty());
        assert!(res.body().is_empty());
    }

    #[test]
    fn not_found_is_canned_plain_text() {
        let res = Response::not_found();
        assert_eq!(res.status_line(), "HTTP/1.1 404 Not Found");
        assert_eq!(res.header("Content-Type"), Some("text/plain"));
        assert_eq!(res.body(), b"404 Not Found");
    }

    #[test]
    fn set_status_uses_canonical_reason() {
        let mut res = Response::new();
        res.set_status(StatusCode::UNAUTHORIZED);
        assert_eq!(res.status_line(), "HTTP/1.1 401 Unauthorized");
    }

    #[test]
    fn set_header_overwrites_same_key() {
        let mut res = Response::new();
        res.set_header("X-Id", "1");
        res.set_header("X-Id", "2");
        assert_eq!(res.header("X-Id"), Some("2"));
        assert_eq!(res.headers().len(), 1);
    }
}
