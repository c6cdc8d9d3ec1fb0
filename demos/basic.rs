//! Minimal myhttp example: a few plain-text routes and a guarded one.
//!
//! Run with:
//!   cargo run --example basic
//!
//! Try:
//!   curl http://localhost:6969/hello
//!   curl -X POST http://localhost:6969/hello
//!   curl http://localhost:6969/adios
//!   curl http://localhost:6969/paginaProtegida
//!   curl -H 'Authorization: letmein' http://localhost:6969/paginaProtegida

use http::StatusCode;
use myhttp::{Handler, Method, Request, Response, Router, Server, middleware};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .on(Method::Get,  "/hello",           hello)
        .on(Method::Post, "/hello",           hello_post)
        .on(Method::Get,  "/adios",           adios)
        .on(Method::Get,  "/paginaProtegida", middleware::trace(require_auth(protected)));

    if let Err(e) = Server::bind("0.0.0.0:6969").serve(app).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

// GET /hello
fn hello(_req: &Request, res: &mut Response) {
    res.text("Hola, mundo prueba handler!");
}

// POST /hello
fn hello_post(_req: &Request, res: &mut Response) {
    res.text("Hola, mundo prueba handler METODO POST!");
}

// GET /adios
fn adios(_req: &Request, res: &mut Response) {
    res.text("adios, mundo prueba handler!");
}

// GET /paginaProtegida, behind `require_auth`
fn protected(_req: &Request, res: &mut Response) {
    res.text("Ruta protegida!");
}

// Any non-empty Authorization header will do; this is a demo.
fn require_auth(inner: impl Handler) -> impl Handler {
    middleware::from_fn(
        |req, res, next| match req.header("Authorization") {
            Some(token) if !token.is_empty() => next.run(req, res),
            _ => {
                res.set_status(StatusCode::UNAUTHORIZED);
                res.text("401 Unauthorized");
            }
        },
        inner,
    )
}
