//! Middleware layer.
//!
//! There is no middleware chain type. A middleware is a [`Handler`] that
//! owns another handler and decides when to call it. Wrap before
//! registering:
//!
//! ```rust
//! use myhttp::{Method, Request, Response, Router, middleware};
//! use http::StatusCode;
//!
//! fn secret(_req: &Request, res: &mut Response) {
//!     res.text("Ruta protegida!");
//! }
//!
//! let guarded = middleware::from_fn(
//!     |req, res, next| {
//!         if req.header("Authorization").is_none() {
//!             res.set_status(StatusCode::UNAUTHORIZED);
//!             return;
//!         }
//!         next.run(req, res);
//!     },
//!     secret,
//! );
//!
//! let app = Router::new().on(Method::Get, "/paginaProtegida", middleware::trace(guarded));
//! ```

use std::time::Instant;

use tracing::info;

use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;

/// The wrapped handler, handed to a [`from_fn`] middleware.
///
/// Calling [`Next::run`] is optional. Not calling it short-circuits: the
/// response is whatever the middleware left in it.
pub struct Next<'a> {
    inner: &'a dyn Handler,
}

impl Next<'_> {
    pub fn run(self, req: &Request, res: &mut Response) {
        self.inner.handle(req, res);
    }
}

/// Middleware built from a closure. See [`from_fn`].
pub struct FromFn<F, H> {
    f: F,
    inner: H,
}

/// Wraps `inner` with `f`, which receives the request, the response and a
/// [`Next`] that invokes `inner`.
pub fn from_fn<F, H>(f: F, inner: H) -> FromFn<F, H>
where
    F: Fn(&Request, &mut Response, Next<'_>) + Send + Sync + 'static,
    H: Handler,
{
    FromFn { f, inner }
}

impl<F, H> Handler for FromFn<F, H>
where
    F: Fn(&Request, &mut Response, Next<'_>) + Send + Sync + 'static,
    H: Handler,
{
    fn handle(&self, req: &Request, res: &mut Response) {
        (self.f)(req, res, Next { inner: &self.inner });
    }
}

/// Logs one line per request: method, uri, status line, latency.
pub struct Trace<H> {
    inner: H,
}

pub fn trace<H: Handler>(inner: H) -> Trace<H> {
    Trace { inner }
}

impl<H: Handler> Handler for Trace<H> {
    fn handle(&self, req: &Request, res: &mut Response) {
        let start = Instant::now();
        self.inner.handle(req, res);
        info!(
            method = req.method(),
            uri = req.uri(),
            status = res.status_line(),
            elapsed = ?start.elapsed(),
            "request handled"
        );
    }
}
