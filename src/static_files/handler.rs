use std::fs;
use std::io;
use std::path::PathBuf;

use crate::config::StaticFilesConfig;
use crate::http::mime::mime_type_for;
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::static_files::resolve::{is_within_root, join_root};

/// The one directory that is redirected to its trailing-slash form.
const REDIRECTED_DIR: &str = "/deep";

/// Serves files from a fixed document root.
///
/// Holds no state besides the root, so one instance is shared read-only by
/// every connection.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &StaticFilesConfig) -> Self {
        Self::new(config.root.clone())
    }

    /// Builds the response for a request.
    ///
    /// Filesystem failures past the existence check become a 500 response;
    /// this never returns an error.
    pub fn serve(&self, request: &Request) -> Response {
        match self.try_serve(request) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    path = %request.path,
                    error = %e,
                    "Failed to read from document root"
                );
                Response::internal_error()
            }
        }
    }

    fn try_serve(&self, request: &Request) -> io::Result<Response> {
        if !request.is_get() {
            return Ok(Response::method_not_allowed());
        }

        let filepath = join_root(&self.root, &request.path);

        if !filepath.exists() {
            return Ok(Response::not_found());
        }

        if !is_within_root(&self.root, &filepath)? {
            tracing::warn!(
                path = %request.path,
                "Resolved path escapes the document root"
            );
            return Ok(Response::not_found());
        }

        if fs::metadata(&filepath)?.is_dir() {
            if request.path == REDIRECTED_DIR {
                return Ok(Response::moved_permanently(&format!("{}/", REDIRECTED_DIR)));
            }

            return Ok(Response::empty(StatusCode::Ok));
        }

        // the handle is closed before this returns
        let content = fs::read(&filepath)?;

        Ok(Response::ok(mime_type_for(&request.path), content))
    }
}
