//! Exact-match request router.
//!
//! One flat map keyed by `METHOD:path`. No wildcards, no path parameters,
//! no query parsing: the request URI must equal the registered path byte
//! for byte.

use std::collections::HashMap;

use tracing::debug;

use crate::handler::{self, BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// It is read-only once serving starts.
///
/// ```rust
/// use myhttp::{Method, Request, Response, Router};
///
/// fn hello(_req: &Request, res: &mut Response) {
///     res.text("Hola, mundo prueba handler!");
/// }
///
/// let mut app = Router::new().on(Method::Get, "/hello", hello);
/// app.register("PURGE", "/cache", |_req: &Request, res: &mut Response| res.text("purged"));
/// ```
pub struct Router {
    routes: HashMap<String, BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Registers a handler for a method + path pair.
    ///
    /// Registering the same pair again replaces the earlier handler.
    pub fn register(&mut self, method: impl AsRef<str>, path: &str, handler: impl Handler) {
        let key = route_key(method.as_ref(), path);
        if self.routes.insert(key, handler::boxed(handler)).is_some() {
            debug!(method = method.as_ref(), path, "route replaced");
        }
    }

    /// Same as [`Router::register`], but returns `self` for chaining.
    pub fn on(mut self, method: impl AsRef<str>, path: &str, handler: impl Handler) -> Self {
        self.register(method, path, handler);
        self
    }

    /// Runs the handler registered for the request's method and URI.
    ///
    /// An unknown route is not an error: it yields [`Response::not_found`].
    pub fn dispatch(&self, req: &Request) -> Response {
        let Some(handler) = self.routes.get(&route_key(req.method(), req.uri())) else {
            return Response::not_found();
        };

        let mut res = Response::new();
        handler.handle(req, &mut res);
        res
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

fn route_key(method: &str, path: &str) -> String {
    format!("{method}:{path}")
}
