//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 subset the server speaks: GET only,
//! one request per connection, no request bodies.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection handler implementing the request-response state machine
//! - **`parser`**: Parses the request line and headers from the received bytes
//! - **`request`**: HTTP request representation and request-target normalization
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request head
//!        └──────┬──────┘
//!               │ Request parsed (unparseable → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve against the document root
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docroot::config::ServerConfig;
//! use docroot::http::connection::Connection;
//! use docroot::static_files::StaticFiles;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let files = Arc::new(StaticFiles::new("www"));
//!     let server = ServerConfig::default();
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let files = Arc::clone(&files);
//!         let server = server.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, files, &server);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
