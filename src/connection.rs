//! One request/response cycle on one accepted connection.
//!
//! read → decode → dispatch → encode → write → close. Strictly in that
//! order, once. There is no keep-alive: after the write (or after the first
//! failure) the write half is shut down and the stream is dropped.
//!
//! # Framing
//!
//! Reads arrive in chunks of [`Limits::read_chunk_size`] bytes and are
//! collected until one of these holds:
//!
//! - the codec says the head (and any declared `Content-Length` body) is
//!   in, or that the request can already be rejected: a finished first line
//!   with fewer than three fields, or conflicting `Content-Length` values;
//! - a read came back short and no line break has arrived yet, so the peer
//!   sent a lone fragment such as `X` and is waiting for an answer;
//! - the peer half-closes.
//!
//! A request that grows past [`Limits::max_request_size`] gets a bare `413`
//! instead of being cut short. There is no read timeout. A client whose
//! request line arrives in two segments with a pause between them is
//! answered on the first segment alone, and a client that sends a full
//! request line but never the blank line or a half-close holds its task
//! until the transport gives up.

use bytes::{Bytes, BytesMut};
use http::StatusCode;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::codec;
use crate::error::Error;
use crate::router::Router;

/// Size of a single socket read.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 1024;
/// Upper bound on head plus body.
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 8 * 1024;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Limits {
    pub(crate) read_chunk_size: usize,
    pub(crate) max_request_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
        }
    }
}

/// Serves exactly one request on `stream`, then closes it.
///
/// Every failure is returned for the caller to log; none of them escape the
/// connection. Decode failures and oversized requests still get a bare
/// status line before the stream is closed.
pub(crate) async fn handle<S>(mut stream: S, router: &Router, limits: Limits) -> Result<(), Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let result = exchange(&mut stream, router, limits).await;
    // The peer may already be gone; there is nothing left to report to it.
    let _ = stream.shutdown().await;
    result
}

async fn exchange<S>(stream: &mut S, router: &Router, limits: Limits) -> Result<(), Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let buf = match read_request(stream, limits).await {
        Ok(buf) => buf,
        Err(e @ Error::RequestTooLarge { .. }) => {
            reply(stream, codec::bare_status(StatusCode::PAYLOAD_TOO_LARGE)).await?;
            return Err(e);
        }
        Err(e) => return Err(e),
    };
    debug!(bytes = buf.len(), "request received");

    let req = match codec::decode(&buf) {
        Ok(req) => req,
        Err(e) => {
            reply(stream, codec::bare_status(StatusCode::BAD_REQUEST)).await?;
            return Err(e.into());
        }
    };
    debug!(method = req.method(), uri = req.uri(), "request decoded");

    let res = router.dispatch(&req);
    reply(stream, codec::encode(res)).await
}

async fn read_request<S>(stream: &mut S, limits: Limits) -> Result<BytesMut, Error>
where
    S: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(limits.read_chunk_size);
    let mut chunk = vec![0u8; limits.read_chunk_size];

    loop {
        let room = limits.max_request_size.saturating_sub(buf.len());
        if room == 0 {
            return Err(Error::RequestTooLarge { limit: limits.max_request_size });
        }

        let want = room.min(chunk.len());
        let n = stream.read(&mut chunk[..want]).await.map_err(Error::Read)?;
        if n == 0 {
            return if buf.is_empty() { Err(Error::EmptyRead) } else { Ok(buf) };
        }

        buf.extend_from_slice(&chunk[..n]);
        if codec::is_complete(&buf) || (n < want && !codec::has_line_break(&buf)) {
            return Ok(buf);
        }
    }
}

async fn reply<S>(stream: &mut S, bytes: Bytes) -> Result<(), Error>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(&bytes).await.map_err(Error::Write)?;
    stream.flush().await.map_err(Error::Write)
}
