use crate::http::request::{resolve_target, Method, Request};
use std::collections::HashMap;
use std::fmt;

const CRLF: &str = "\r\n";
const SP: char = ' ';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The request line is not exactly `METHOD SP TARGET SP VERSION`
    MalformedRequestLine,
    /// The request-target is empty or not an absolute path
    InvalidTarget,
    /// The message head is not valid UTF-8
    InvalidEncoding,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedRequestLine => f.write_str("malformed request line"),
            ParseError::InvalidTarget => f.write_str("request-target must start with '/'"),
            ParseError::InvalidEncoding => f.write_str("request is not valid UTF-8"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses the bytes received on one connection.
///
/// Everything after the first blank line is ignored; request bodies are not
/// supported.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let text = std::str::from_utf8(buf)
        .map_err(|_| ParseError::InvalidEncoding)?;

    parse_request(text.trim())
}

/// Parses an already decoded request message.
pub fn parse_request(text: &str) -> Result<Request, ParseError> {
    let mut lines = text.split(CRLF);

    // Request line
    let request_line = lines.next().ok_or(ParseError::MalformedRequestLine)?;
    let (method, target, version) = parse_request_line(request_line)?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            break;
        }

        if let Some((key, value)) = parse_header(line) {
            headers.insert(key, value);
        }
    }

    Ok(Request {
        method: Method::from_token(method),
        path: resolve_target(target),
        target: target.to_string(),
        version: version.to_string(),
        headers,
    })
}

fn parse_request_line(line: &str) -> Result<(&str, &str, &str), ParseError> {
    let parts: Vec<&str> = line.split(SP).collect();

    let &[method, target, version] = parts.as_slice() else {
        return Err(ParseError::MalformedRequestLine);
    };

    if method.is_empty() || version.is_empty() {
        return Err(ParseError::MalformedRequestLine);
    }

    if !target.starts_with('/') {
        return Err(ParseError::InvalidTarget);
    }

    Ok((method, target, version))
}

/// Splits a header line on its first colon. Lines without one yield `None`.
pub fn parse_header(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// Position of the `\r\n\r\n` separating the head from anything after it.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}
