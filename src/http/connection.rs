use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::ServerConfig;
use crate::http::parser::{find_headers_end, parse_http_request};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::static_files::StaticFiles;

pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    max_request_bytes: usize,
    read_timeout: Duration,
    files: Arc<StaticFiles>,
    state: ConnectionState,
}

/// One request, one response, then the connection is closed.
pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, files: Arc<StaticFiles>, server: &ServerConfig) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(1024),
            max_request_bytes: server.max_request_bytes,
            read_timeout: server.read_timeout(),
            files,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Some(req) => ConnectionState::Processing(req),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let req = req.clone();
                    let files = Arc::clone(&self.files);

                    // file reads block, keep them off the reactor
                    let response = tokio::task::spawn_blocking(move || {
                        let response = files.serve(&req);
                        tracing::info!(
                            method = %req.method,
                            path = %req.target,
                            status = response.status.as_u16(),
                            content_length = response.header("Content-Length").unwrap_or("-"),
                            "Request served"
                        );
                        response
                    })
                    .await?;

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    tracing::debug!(bytes = writer.remaining(), "Writing response");
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        // the peer may already be gone
        let _ = self.stream.shutdown().await;

        Ok(())
    }

    /// Reads until the request head is complete, the peer stops sending,
    /// `max_request_bytes` have arrived, or the peer goes quiet for
    /// `read_timeout` after its first bytes. Then parses what was received.
    ///
    /// The wait for the first bytes is unbounded.
    ///
    /// Returns `None` when there is nothing to answer: the client sent no
    /// data, or sent something that does not parse as a request.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        loop {
            if find_headers_end(&self.buffer).is_some()
                || self.buffer.len() >= self.max_request_bytes
            {
                break;
            }

            let n = if self.buffer.is_empty() {
                self.stream.read_buf(&mut self.buffer).await?
            } else {
                match timeout(self.read_timeout, self.stream.read_buf(&mut self.buffer)).await {
                    Ok(read) => read?,
                    Err(_) => {
                        tracing::debug!(
                            received = self.buffer.len(),
                            "Request head incomplete, answering what arrived"
                        );
                        break;
                    }
                }
            };

            if n == 0 {
                // Client closed its side
                break;
            }
        }

        if self.buffer.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        match parse_http_request(&self.buffer) {
            Ok(request) => Ok(Some(request)),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping unparseable request");
                Ok(None)
            }
        }
    }
}
