//! Incoming HTTP request type.

use std::borrow::Cow;
use std::collections::HashMap;

/// An incoming HTTP request, decoded from the raw TCP stream by
/// [`codec::decode`](crate::codec::decode).
///
/// Nothing is validated: the method is whatever token the client sent, the
/// URI keeps its query string, and header names keep the client's casing.
/// The body is kept as the raw bytes that followed the blank line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) uri: String,
    pub(crate) version: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Vec<u8>,
}

impl Request {
    pub fn method(&self) -> &str { &self.method }
    pub fn uri(&self) -> &str { &self.uri }
    pub fn version(&self) -> &str { &self.version }
    pub fn headers(&self) -> &HashMap<String, String> { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// The body as text, with invalid UTF-8 replaced by `U+FFFD`.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Header lookup by exact name. `Host` and `host` are different keys.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
