use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::http::response::Response;

pub const HTTP_VERSION: &str = "HTTP/1.1";

const CRLF: &[u8] = b"\r\n";

/// Serializes a response as `STATUS-LINE CRLF *(HEADER CRLF) CRLF BODY`.
///
/// The status line always carries `HTTP/1.1`, whatever the client sent.
pub fn serialize_response(resp: &Response) -> Bytes {
    let head_len: usize = resp
        .headers
        .iter()
        .map(|(k, v)| k.len() + v.len() + 4)
        .sum();
    let mut buf = BytesMut::with_capacity(32 + head_len + resp.body.len());

    put_status_line(&mut buf, resp);

    for (name, value) in &resp.headers {
        buf.put_slice(name.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(value.as_bytes());
        buf.put_slice(CRLF);
    }

    buf.put_slice(CRLF);
    buf.put_slice(&resp.body);

    buf.freeze()
}

fn put_status_line(buf: &mut BytesMut, resp: &Response) {
    buf.put_slice(HTTP_VERSION.as_bytes());
    buf.put_u8(b' ');
    buf.put_slice(resp.status.as_u16().to_string().as_bytes());
    buf.put_u8(b' ');
    buf.put_slice(resp.status.reason_phrase().as_bytes());
    buf.put_slice(CRLF);
}

/// A serialized response waiting to be flushed to the socket.
pub struct ResponseWriter {
    pending: Bytes,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            pending: serialize_response(response),
        }
    }

    /// Bytes not yet handed to the socket.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Drains the pending bytes into `stream`. Progress survives an error,
    /// `pending` only holds what was not written.
    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        stream.write_all_buf(&mut self.pending).await?;
        stream.flush().await?;

        tracing::trace!("Response flushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::StatusCode;

    #[test]
    fn writer_starts_with_whole_response_pending() {
        let writer = ResponseWriter::new(&Response::empty(StatusCode::NotFound));
        assert_eq!(writer.remaining(), b"HTTP/1.1 404 Not Found\r\n\r\n".len());
    }
}
