//! Handler trait and type erasure.
//!
//! The router needs to hold handlers of *different* types in a single
//! `HashMap`, so each one is stored as a trait object:
//!
//! ```text
//! |req, res| { … }                          ← user writes this
//!        ↓ router.register("GET", "/", …)
//! Arc::new(closure)                         ← Handler blanket impl
//!        ↓  stored as BoxedHandler = Arc<dyn Handler>
//! handler.handle(&req, &mut res)            ← one vtable dispatch
//! ```
//!
//! Handlers are synchronous. They run on the connection's task, between the
//! single read and the single write.

use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;

/// A unit of application logic: reads the request, fills in the response.
///
/// Implemented for every closure or `fn` with the signature
/// `Fn(&Request, &mut Response)`. Implement it on your own types when a
/// handler carries state, or to wrap another handler (see
/// [`middleware`](crate::middleware)).
///
/// ```rust
/// use myhttp::{Handler, Request, Response};
///
/// struct Greeting(&'static str);
///
/// impl Handler for Greeting {
///     fn handle(&self, _req: &Request, res: &mut Response) {
///         res.text(self.0);
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: &Request, res: &mut Response);
}

impl<F> Handler for F
where
    F: Fn(&Request, &mut Response) + Send + Sync + 'static,
{
    fn handle(&self, req: &Request, res: &mut Response) {
        self(req, res)
    }
}

/// A heap-allocated, type-erased handler shared across connection tasks.
pub(crate) type BoxedHandler = Arc<dyn Handler>;

pub(crate) fn boxed(handler: impl Handler) -> BoxedHandler {
    Arc::new(handler)
}
