//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler. A method with no tree, or a path with no match, is a 404 —
//! there is one routing table per method, so a known path hit with the wrong
//! method does not match.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics on a malformed or conflicting route pattern. Routes are
    /// registered once at startup, so this is a programming error, not a
    /// runtime condition.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
