//! Unified error types.

use std::io;

/// Why a byte buffer could not be decoded into a [`Request`](crate::Request).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The buffer was empty.
    #[error("malformed request")]
    MalformedRequest,
    /// The first line has fewer than three whitespace-separated fields.
    #[error("malformed request line")]
    MalformedRequestLine,
    /// `Content-Length` appears more than once with different values.
    #[error("conflicting Content-Length headers")]
    ConflictingContentLength,
}

/// The error type returned by myhttp's fallible operations.
///
/// Application-level outcomes (404 and friends) are expressed as
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures. Only [`Error::Bind`] ever leaves
/// [`Server::serve`](crate::Server::serve); the rest are logged inside the
/// connection task that hit them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),

    #[error("failed to read request: {0}")]
    Read(#[source] io::Error),

    #[error("peer closed the connection without sending anything")]
    EmptyRead,

    #[error("bad request: {0}")]
    Parse(#[from] ParseError),

    #[error("request exceeds {limit} bytes")]
    RequestTooLarge { limit: usize },

    #[error("failed to write response: {0}")]
    Write(#[source] io::Error),
}
