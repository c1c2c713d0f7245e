//! Static file serving
//!
//! Maps a parsed request onto the document root and decides the response:
//! 405 for anything but GET, 404 when nothing is there, a bare 200 (or the
//! `/deep` redirect) for directories, and the file content otherwise.

pub mod handler;
pub mod resolve;

pub use handler::StaticFiles;
