//! TCP front end: binds the configured address and hands every accepted
//! socket to its own [`Connection`](crate::http::connection::Connection) task.

pub mod listener;
