//! # myhttp
//!
//! A minimal HTTP/1.1 server written straight on top of TCP sockets.
//!
//! ## The contract
//!
//! One connection, one request, one response, then the socket is closed.
//! The interesting part is the protocol engine:
//!
//! - [`codec`]: raw bytes to [`Request`], [`Response`] to raw bytes
//! - [`Router`]: exact `(method, path)` lookup, canned 404 on a miss
//! - [`Handler`]: any `Fn(&Request, &mut Response)`; middleware is just a
//!   handler that wraps another one (see [`middleware`])
//! - [`Server`]: accept loop, one tokio task per connection
//!
//! What myhttp does not do: keep-alive, chunked encoding, streaming bodies,
//! TLS, HTTP/2, query or path-parameter parsing.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use myhttp::{Method, Request, Response, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .on(Method::Get,  "/hello", hello)
//!         .on(Method::Post, "/hello", hello_post);
//!
//!     if let Err(e) = Server::bind("0.0.0.0:6969").serve(app).await {
//!         eprintln!("{e}");
//!         std::process::exit(1);
//!     }
//! }
//!
//! fn hello(_req: &Request, res: &mut Response) {
//!     res.text("Hola, mundo prueba handler!");
//! }
//!
//! fn hello_post(req: &Request, res: &mut Response) {
//!     res.set_header("Content-Type", "text/plain");
//!     res.set_body(format!("got {} bytes", req.body().len()));
//! }
//! ```

pub mod codec;
mod connection;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;

pub mod middleware;

pub use connection::{DEFAULT_MAX_REQUEST_SIZE, DEFAULT_READ_CHUNK_SIZE};
pub use error::{Error, ParseError};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, Response};
pub use router::Router;
pub use server::Server;
