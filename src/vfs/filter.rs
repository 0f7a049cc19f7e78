// ABOUTME: Restricting view that exposes only presentation-relevant paths of a directory
// ABOUTME: Slide documents, the assets tree and the reserved config/template files pass through

use super::{DirEntry, FileSource, SourceFile, clean, not_found, split};
use std::io;
use std::sync::Arc;

pub const DIR_SLIDES: &str = "slides";
pub const DIR_ASSETS: &str = "assets";
pub const FILE_CONFIG: &str = "config.yml";
pub const FILE_INDEX_TEMPLATE: &str = "index.html.tmpl";
pub const FILE_INDEX_HTML: &str = "index.html";

pub fn is_markdown(path: &str) -> bool {
    path.ends_with(".md")
}

pub fn is_html(path: &str) -> bool {
    path.ends_with(".html")
}

pub fn is_slide_document(path: &str) -> bool {
    is_markdown(path) || is_html(path)
}

fn is_reserved(name: &str) -> bool {
    name == FILE_CONFIG || name == FILE_INDEX_TEMPLATE
}

fn has_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// View over a raw project directory that hides build output and stray files.
///
/// Recognized paths:
/// - `*.md` / `*.html` at the top level or directly under `slides/`
/// - anything under `assets/`
/// - `config.yml` and `index.html.tmpl` at the top level
#[derive(Clone)]
pub struct ContentFilterView {
    inner: Arc<dyn FileSource>,
}

impl ContentFilterView {
    pub fn new(inner: Arc<dyn FileSource>) -> Self {
        Self { inner }
    }

    /// Whether `path` is visible through this view.
    pub fn recognizes(path: &str) -> bool {
        let Ok(path) = clean(path) else {
            return false;
        };
        let (dir, file) = split(&path);
        if (dir.is_empty() || dir == DIR_SLIDES) && is_slide_document(file) {
            return true;
        }
        if has_prefix(&path, DIR_ASSETS) {
            return true;
        }
        dir.is_empty() && is_reserved(file)
    }
}

impl FileSource for ContentFilterView {
    fn open(&self, path: &str) -> io::Result<SourceFile> {
        if Self::recognizes(path) {
            self.inner.open(path)
        } else {
            Err(not_found(path))
        }
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let path = clean(path)?;
        let at_root = path == ".";
        if at_root || path == DIR_SLIDES {
            let entries = self.inner.read_dir(&path)?;
            return Ok(entries
                .into_iter()
                .filter(|entry| {
                    if entry.is_dir {
                        at_root && (entry.name == DIR_SLIDES || entry.name == DIR_ASSETS)
                    } else {
                        is_slide_document(&entry.name) || (at_root && is_reserved(&entry.name))
                    }
                })
                .collect());
        }
        if has_prefix(&path, DIR_ASSETS) {
            return self.inner.read_dir(&path);
        }
        Err(not_found(&path))
    }
}
