// ABOUTME: Virtual file source abstraction shared by disk, embedded and composite sources
// ABOUTME: Defines the FileSource trait plus path helpers and a lexical tree walk

use std::io::{self, Read};
use std::sync::Arc;

pub mod bytes;
pub mod disk;
pub mod filter;
pub mod memory;
pub mod overlay;

pub use bytes::ByteFile;
pub use disk::DiskFs;
pub use filter::{ContentFilterView, is_html, is_markdown, is_slide_document};
pub use memory::MemoryFs;
pub use overlay::OverlayFs;

/// A readable handle returned by [`FileSource::open`].
pub type SourceFile = Box<dyn Read + Send>;

/// A directory entry returned by [`FileSource::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry (not the full path).
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Read-only file source.
///
/// Paths are relative to the source root, use `/` as separator and `.` for
/// the root itself. `open` only opens regular files; a directory at the
/// requested path is reported as not found. "Not found" is always signalled
/// with [`io::ErrorKind::NotFound`] so composites can tell it apart from
/// real failures.
pub trait FileSource: Send + Sync {
    /// Open a file for reading.
    fn open(&self, path: &str) -> io::Result<SourceFile>;

    /// List a directory, sorted by name.
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>>;
}

impl<T: FileSource + ?Sized> FileSource for Arc<T> {
    fn open(&self, path: &str) -> io::Result<SourceFile> {
        (**self).open(path)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }
}

pub fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("not found: {}", path))
}

pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Normalize a virtual path: strip `./` and leading `/`, collapse empty
/// components. Returns `.` for the root. Parent components are rejected.
pub fn clean(path: &str) -> io::Result<String> {
    let mut parts = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("parent components are not allowed: {}", path),
                ));
            }
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        Ok(".".to_string())
    } else {
        Ok(parts.join("/"))
    }
}

/// Join a directory and an entry name. Joining onto `.` yields the bare name.
pub fn join(dir: &str, name: &str) -> String {
    if dir == "." || dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Split a clean path into its parent directory ("" at top level) and file name.
pub fn split(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

pub fn read(source: &dyn FileSource, path: &str) -> io::Result<Vec<u8>> {
    let mut file = source.open(path)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

pub fn read_to_string(source: &dyn FileSource, path: &str) -> io::Result<String> {
    let bytes = read(source, path)?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Depth-first walk below `dir` in lexical order. Every entry is visited
/// before its children; directories are descended through the same source,
/// so a composite source is traversed as its union view.
pub fn walk<F, E>(source: &dyn FileSource, dir: &str, visit: &mut F) -> Result<(), E>
where
    F: FnMut(&str, &DirEntry) -> Result<(), E>,
    E: From<io::Error>,
{
    for entry in source.read_dir(dir)? {
        let path = join(dir, &entry.name);
        visit(&path, &entry)?;
        if entry.is_dir {
            walk(source, &path, visit)?;
        }
    }
    Ok(())
}
