//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method};

/// An incoming HTTP request with its body fully collected.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: HeaderMap,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self { method, path, headers, body, params }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Case-insensitive header lookup; `None` for absent or non-UTF-8 values.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
