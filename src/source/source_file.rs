use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// A Markdown document discovered on disk.
///
/// The path is always absolute so the document's own directory can serve as
/// the base for its relative image references, wherever the build runs from.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    /// Wrap an absolute path. Relative paths are made absolute against the
    /// current directory.
    pub fn new<P: Into<PathBuf>>(path: P) -> std::io::Result<SourceFile> {
        let path = std::path::absolute(path.into())?;
        Ok(SourceFile { path })
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// The directory containing this document
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("/"))
    }

    pub fn read(&self) -> std::io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

impl PartialOrd for SourceFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceFile {
    fn cmp(&self, other: &Self) -> Ordering {
        super::ordering::compare_paths(&self.path, &other.path)
    }
}
