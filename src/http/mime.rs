//! MIME type detection based on the requested path.

pub const TEXT_HTML: &str = "text/html";
pub const TEXT_CSS: &str = "text/css";
pub const TEXT_PLAIN: &str = "text/plain";

/// Infers the `Content-Type` of a resource from the suffix of its path.
///
/// Matching is case-sensitive and done in order: `.htm`/`.html`, then `.css`.
/// Everything else is served as plain text.
///
/// ```
/// # use docroot::http::mime::mime_type_for;
/// assert_eq!(mime_type_for("/index.html"), "text/html");
/// assert_eq!(mime_type_for("/base.css"), "text/css");
/// assert_eq!(mime_type_for("/notes.txt"), "text/plain");
/// ```
pub fn mime_type_for(path: &str) -> &'static str {
    if path.ends_with(".htm") || path.ends_with(".html") {
        return TEXT_HTML;
    }

    if path.ends_with(".css") {
        return TEXT_CSS;
    }

    TEXT_PLAIN
}
