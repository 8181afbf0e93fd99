//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::source::Span;
use crate::types::Location;

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path of the file as discovered.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Builds a violation location for `span` in this file.
    #[must_use]
    pub fn location(&self, span: &Span) -> Location {
        Location::from_span(self.relative_path.clone(), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Position;

    #[test]
    fn relative_path_strips_root() {
        let ctx = FileContext::new(Path::new("/repo/src/app.js"), "", Path::new("/repo"));
        assert_eq!(ctx.relative_path, PathBuf::from("src/app.js"));
    }

    #[test]
    fn relative_path_falls_back_to_full_path() {
        let ctx = FileContext::new(Path::new("other/app.js"), "", Path::new("/repo"));
        assert_eq!(ctx.relative_path, PathBuf::from("other/app.js"));
    }

    #[test]
    fn location_uses_relative_path() {
        let ctx = FileContext::new(Path::new("/repo/a.js"), "foo();\nbar();", Path::new("/repo"));
        let span = Span::new(7, 13, Position::new(2, 0), Position::new(2, 6));
        let location = ctx.location(&span);
        assert_eq!(location.file, PathBuf::from("a.js"));
        assert_eq!((location.line, location.column), (2, 1));
    }
}
