//! Wire codec: raw bytes to [`Request`], [`Response`] to raw bytes.
//!
//! No I/O happens here. The connection handler reads, asks
//! `is_complete` whether it has a whole request yet, then calls
//! [`decode`]; after dispatch it calls [`encode`] and writes the result.
//!
//! The format is the plain HTTP/1.1 text shape:
//!
//! ```text
//! METHOD URI VERSION\r\n
//! Name: value\r\n
//! \r\n
//! body
//! ```

use std::collections::HashMap;

use bytes::{BufMut, Bytes, BytesMut};
use http::StatusCode;

use crate::error::ParseError;
use crate::request::Request;
use crate::response::{self, Response};

const CRLF: &str = "\r\n";
const CONTENT_LENGTH: &str = "Content-Length";

/// Decodes one request from everything read off the socket.
///
/// The head (everything before the first `\r\n\r\n`) is read as text,
/// with invalid UTF-8 replaced rather than rejected. Header lines without a
/// `:` are skipped. A repeated header name keeps its last value, except
/// that differing `Content-Length` values are refused. The body is the raw
/// bytes after the blank line; without a blank line it is empty.
pub fn decode(buf: &[u8]) -> Result<Request, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::MalformedRequest);
    }

    let (head, body) = match find(buf, b"\r\n\r\n") {
        Some(at) => (&buf[..at], &buf[at + 4..]),
        None => (buf, &buf[buf.len()..]),
    };
    let head = String::from_utf8_lossy(head);
    let mut lines = head.split(CRLF);

    let mut fields = lines.next().unwrap_or_default().split_whitespace();
    let (Some(method), Some(uri), Some(version)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(ParseError::MalformedRequestLine);
    };

    let header_lines: Vec<&str> = lines.take_while(|line| !line.is_empty()).collect();
    declared_length(header_lines.iter().copied())?;

    let headers: HashMap<String, String> = header_lines
        .iter()
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_owned(), value.trim().to_owned()))
        .collect();

    Ok(Request {
        method: method.to_owned(),
        uri: uri.to_owned(),
        version: version.to_owned(),
        headers,
        body: body.to_vec(),
    })
}

/// Serializes a response for the wire.
///
/// Any `Content-Length` the handler set (under any casing) is replaced by
/// the real body length. Header order follows map iteration and is not
/// stable.
pub fn encode(mut response: Response) -> Bytes {
    response
        .headers
        .retain(|name, _| !name.eq_ignore_ascii_case(CONTENT_LENGTH));
    response
        .headers
        .insert(CONTENT_LENGTH.to_owned(), response.body.len().to_string());

    let head_len = response.status_line.len()
        + response.headers.iter().map(|(k, v)| k.len() + v.len() + 4).sum::<usize>()
        + 4;
    let mut out = BytesMut::with_capacity(head_len + response.body.len());

    out.put_slice(response.status_line.as_bytes());
    out.put_slice(CRLF.as_bytes());
    for (name, value) in &response.headers {
        out.put_slice(name.as_bytes());
        out.put_slice(b": ");
        out.put_slice(value.as_bytes());
        out.put_slice(CRLF.as_bytes());
    }
    out.put_slice(CRLF.as_bytes());
    out.put_slice(&response.body);
    out.freeze()
}

/// A status line followed by the blank line, no headers, no body.
///
/// Used for replies the engine sends on its own, such as
/// `HTTP/1.1 400 Bad Request\r\n\r\n`.
pub(crate) fn bare_status(status: StatusCode) -> Bytes {
    Bytes::from(format!("{}{CRLF}{CRLF}", response::status_line(status)))
}

/// Reports whether reading more can change how `buf` decodes.
///
/// True once the head has ended at the first `\r\n\r\n` (or `\n\n`,
/// which some hand-rolled clients send) and the declared `Content-Length`
/// body, if any, has followed it. Also true as soon as the request is
/// known to be rejected: a finished first line with fewer than three fields,
/// or conflicting `Content-Length` values.
pub(crate) fn is_complete(buf: &[u8]) -> bool {
    if let Some(line) = first_line(buf) {
        if String::from_utf8_lossy(line).split_whitespace().nth(2).is_none() {
            return true;
        }
    }

    let Some((head_end, body_start)) = head_end(buf) else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..head_end]);
    let lines = head.split('\n').skip(1).map(|line| line.trim_end_matches('\r'));
    match declared_length(lines) {
        Ok(declared) => buf.len() - body_start >= declared.unwrap_or(0),
        Err(_) => true,
    }
}

/// Whether the first line of the request has been terminated yet.
pub(crate) fn has_line_break(buf: &[u8]) -> bool {
    first_line(buf).is_some()
}

fn first_line(buf: &[u8]) -> Option<&[u8]> {
    buf.iter().position(|&b| b == b'\n').map(|at| &buf[..at])
}

fn head_end(buf: &[u8]) -> Option<(usize, usize)> {
    let crlf = find(buf, b"\r\n\r\n").map(|at| (at, at + 4));
    let lf = find(buf, b"\n\n").map(|at| (at, at + 2));
    match (crlf, lf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// The body length declared by `Content-Length` header lines, names matched
/// ignoring case. Repeats are fine only when they agree; an unparsable
/// value counts as no declaration.
fn declared_length<'a>(lines: impl Iterator<Item = &'a str>) -> Result<Option<usize>, ParseError> {
    let mut declared: Option<&str> = None;
    for (name, value) in lines.filter_map(|line| line.split_once(':')) {
        if !name.trim().eq_ignore_ascii_case(CONTENT_LENGTH) {
            continue;
        }
        let value = value.trim();
        match declared {
            Some(seen) if seen != value => return Err(ParseError::ConflictingContentLength),
            _ => declared = Some(value),
        }
    }
    Ok(declared.and_then(|value| value.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_parts(res: Response) -> (String, Vec<String>, String) {
        let wire = String::from_utf8(encode(res).to_vec()).unwrap();
        let (head, body) = wire.split_once("\r\n\r\n").unwrap();
        let mut lines = head.split("\r\n").map(str::to_owned);
        let status = lines.next().unwrap();
        (status, lines.collect(), body.to_owned())
    }

    #[test]
    fn decodes_request_line_headers_and_body() {
        let req = decode(b"POST /echo?x=1 HTTP/1.1\r\nHost: example.com\r\n\r\nhello").unwrap();
        assert_eq!(req.method(), "POST");
        assert_eq!(req.uri(), "/echo?x=1");
        assert_eq!(req.version(), "HTTP/1.1");
        assert_eq!(req.header("Host"), Some("example.com"));
        assert_eq!(req.body(), b"hello");
    }

    #[test]
    fn body_keeps_interior_line_breaks() {
        let req = decode(b"POST / HTTP/1.1\r\n\r\nline one\r\nline two").unwrap();
        assert_eq!(req.body(), b"line one\r\nline two");
    }

    #[test]
    fn extra_request_line_fields_are_ignored() {
        let req = decode(b"GET / HTTP/1.1 trailing junk\r\n\r\n").unwrap();
        assert_eq!(req.version(), "HTTP/1.1");
    }

    #[test]
    fn short_request_line_is_rejected() {
        assert_eq!(decode(b"GET /\r\n\r\n"), Err(ParseError::MalformedRequestLine));
        assert_eq!(decode(b"X"), Err(ParseError::MalformedRequestLine));
        assert_eq!(decode(b"   \r\n"), Err(ParseError::MalformedRequestLine));
    }

    #[test]
    fn empty_input_is_malformed() {
        assert_eq!(decode(b""), Err(ParseError::MalformedRequest));
    }

    #[test]
    fn binary_body_is_kept_byte_for_byte() {
        let req = decode(b"POST /upload HTTP/1.1\r\nContent-Length: 2\r\n\r\n\xff\xfe").unwrap();
        assert_eq!(req.uri(), "/upload");
        assert_eq!(req.body(), [0xff, 0xfe]);
        assert_eq!(req.body_text(), "\u{fffd}\u{fffd}");
    }

    #[test]
    fn non_utf8_head_is_read_lossily() {
        let req = decode(b"GET /caf\xe9 HTTP/1.1\r\nX-Raw: \xff\r\n\r\n").unwrap();
        assert_eq!(req.uri(), "/caf\u{fffd}");
        assert_eq!(req.header("X-Raw"), Some("\u{fffd}"));

        assert_eq!(decode(&[0xff, 0xfe, b' ']), Err(ParseError::MalformedRequestLine));
    }

    #[test]
    fn conflicting_content_length_is_rejected() {
        assert_eq!(
            decode(b"POST / HTTP/1.1\r\nContent-Length: 3\r\ncontent-length: 5\r\n\r\nabc"),
            Err(ParseError::ConflictingContentLength),
        );

        let req = decode(b"POST / HTTP/1.1\r\nContent-Length: 3\r\nContent-Length: 3\r\n\r\nabc").unwrap();
        assert_eq!(req.header("Content-Length"), Some("3"));
        assert_eq!(req.body(), b"abc");
    }

    #[test]
    fn header_lines_without_colon_are_skipped() {
        let req = decode(b"GET / HTTP/1.1\r\nnot a header\r\nX-Test:  value \r\n\r\n").unwrap();
        assert_eq!(req.headers().len(), 1);
        assert_eq!(req.header("X-Test"), Some("value"));
    }

    #[test]
    fn header_value_splits_on_first_colon_only() {
        let req = decode(b"GET / HTTP/1.1\r\nHost: localhost:6969\r\n\r\n").unwrap();
        assert_eq!(req.header("Host"), Some("localhost:6969"));
    }

    #[test]
    fn duplicate_header_keeps_last_value_and_case_is_preserved() {
        let req = decode(b"GET / HTTP/1.1\r\nX-A: 1\r\nX-A: 2\r\nx-a: 3\r\n\r\n").unwrap();
        assert_eq!(req.header("X-A"), Some("2"));
        assert_eq!(req.header("x-a"), Some("3"));
    }

    #[test]
    fn missing_blank_line_means_empty_body() {
        let req = decode(b"GET / HTTP/1.1\r\nHost: a").unwrap();
        assert_eq!(req.header("Host"), Some("a"));
        assert!(req.body().is_empty());

        let req = decode(b"GET / HTTP/1.1").unwrap();
        assert!(req.headers().is_empty());
        assert!(req.body().is_empty());
    }

    #[test]
    fn encode_sets_content_length_from_body() {
        let mut res = Response::new();
        res.text("Hola, mundo prueba handler!");
        let (status, headers, body) = encoded_parts(res);

        assert_eq!(status, "HTTP/1.1 200 OK");
        assert!(headers.contains(&"Content-Length: 27".to_owned()));
        assert!(headers.contains(&"Content-Type: text/plain".to_owned()));
        assert_eq!(body, "Hola, mundo prueba handler!");
    }

    #[test]
    fn encode_overwrites_stale_content_length() {
        let mut res = Response::new();
        res.set_header("Content-Length", "9000");
        res.set_header("content-length", "1");
        res.set_body("abc");
        let (_, headers, _) = encoded_parts(res);

        assert_eq!(headers, vec!["Content-Length: 3".to_owned()]);
    }

    #[test]
    fn encode_empty_body() {
        let wire = encode(Response::new());
        assert_eq!(&wire[..], b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
    }

    #[test]
    fn bare_bad_request_matches_literal() {
        assert_eq!(
            &bare_status(StatusCode::BAD_REQUEST)[..],
            b"HTTP/1.1 400 Bad Request\r\n\r\n",
        );
    }

    #[test]
    fn completeness_waits_for_head_terminator() {
        assert!(!is_complete(b""));
        assert!(!is_complete(b"GET / HTTP/1.1\r\nHost: a\r\n"));
        assert!(is_complete(b"GET / HTTP/1.1\r\nHost: a\r\n\r\n"));
        assert!(is_complete(b"GET / HTTP/1.1 \nHost: example.com\n\n"));
    }

    #[test]
    fn completeness_waits_for_declared_body() {
        assert!(!is_complete(b"POST / HTTP/1.1\r\ncontent-length: 5\r\n\r\nhel"));
        assert!(is_complete(b"POST / HTTP/1.1\r\ncontent-length: 5\r\n\r\nhello"));
        assert!(is_complete(b"POST / HTTP/1.1\r\nContent-Length: nope\r\n\r\n"));
    }

    #[test]
    fn short_first_line_ends_framing_early() {
        assert!(!is_complete(b"X"));
        assert!(!has_line_break(b"X"));
        assert!(is_complete(b"X\r\n"));
        assert!(is_complete(b"GET /hello\r\nHost: a"));
        assert!(!is_complete(b"GET /hello HTTP/1.1\r\nHost: a"));
    }

    #[test]
    fn conflicting_lengths_end_framing_early() {
        assert!(is_complete(b"POST / HTTP/1.1\r\nContent-Length: 3\r\nContent-Length: 50\r\n\r\nabc"));
        assert!(!is_complete(b"POST / HTTP/1.1\r\nContent-Length: 5\r\ncontent-length: 5\r\n\r\nabc"));
    }
}
