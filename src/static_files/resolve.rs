//! Mapping request paths onto the filesystem.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Appends the request path to the document root.
///
/// This is plain concatenation, the request path already starts with `/`.
pub fn join_root(root: &Path, request_path: &str) -> PathBuf {
    let mut joined = OsString::from(root.as_os_str());
    joined.push(request_path);
    PathBuf::from(joined)
}

/// Whether `path`, with symlinks resolved, still lies under `root`.
///
/// Both paths must exist.
pub fn is_within_root(root: &Path, path: &Path) -> io::Result<bool> {
    let root = root.canonicalize()?;
    let path = path.canonicalize()?;
    Ok(path.starts_with(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_concatenates() {
        let joined = join_root(Path::new("/srv/www"), "/css/base.css");
        assert_eq!(joined, PathBuf::from("/srv/www/css/base.css"));
    }
}
