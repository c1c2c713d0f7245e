use std::collections::HashMap;

/// HTTP request methods.
///
/// The server only serves GET. Every other token is still recognized so the
/// response generator can answer 405 Method Not Allowed instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other token, kept as received
    Extension(String),
}

/// Represents a parsed HTTP request from a client.
///
/// Built once per connection by the parser and never modified afterwards.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request-target exactly as it appeared on the request line
    pub target: String,
    /// Normalized target used to resolve a file under the document root
    pub path: String,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Request headers, names as received, last value wins
    pub headers: HashMap<String, String>,
}

impl Method {
    /// Parses an HTTP method token, ignoring ASCII case.
    ///
    /// Unknown tokens are not an error; they become [`Method::Extension`].
    ///
    /// # Example
    ///
    /// ```
    /// # use docroot::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::GET);
    /// assert_eq!(Method::from_token("BREW"), Method::Extension("BREW".into()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            _ => Method::Extension(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Extension(token) => token,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Request {
    /// Whether the method is GET, the only one this server serves.
    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }
}

/// Turns a request-target into the path resolved under the document root.
///
/// A target containing `/..` is replaced by its normalized absolute form.
/// A result ending in `/` then gets `index.html` appended, once.
pub fn resolve_target(target: &str) -> String {
    let mut path = if target.contains("/..") {
        normalize_path(target)
    } else {
        target.to_string()
    };

    if path.ends_with('/') {
        path.push_str("index.html");
    }

    path
}

/// Lexically collapses `.`, `..` and repeated separators of an absolute path.
///
/// `..` never climbs above the root. The result has no trailing separator
/// unless it is the root itself.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}
