//! docroot - a small static file server
//!
//! Parses HTTP/1.1 GET requests and answers them from a document root,
//! one request per connection.

pub mod config;
pub mod http;
pub mod server;
pub mod static_files;
