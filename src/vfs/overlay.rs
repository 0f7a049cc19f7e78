// ABOUTME: Overlay file source composing an ordered list of sources
// ABOUTME: First source wins on open; directory listings are a sorted, de-duplicated union

use super::{DirEntry, FileSource, SourceFile, is_not_found, not_found};
use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

/// Ordered composition of file sources. The order given at construction is the
/// precedence order and never changes.
#[derive(Clone, Default)]
pub struct OverlayFs {
    sources: Vec<Arc<dyn FileSource>>,
}

impl OverlayFs {
    pub fn new(sources: Vec<Arc<dyn FileSource>>) -> Self {
        Self { sources }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl FileSource for OverlayFs {
    fn open(&self, path: &str) -> io::Result<SourceFile> {
        for source in &self.sources {
            match source.open(path) {
                Ok(file) => return Ok(file),
                Err(e) if is_not_found(&e) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(not_found(path))
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let mut found = false;
        let mut merged: BTreeMap<String, DirEntry> = BTreeMap::new();
        for source in &self.sources {
            match source.read_dir(path) {
                Ok(entries) => {
                    found = true;
                    for entry in entries {
                        merged.entry(entry.name.clone()).or_insert(entry);
                    }
                }
                Err(e) if is_not_found(&e) => continue,
                Err(e) => return Err(e),
            }
        }
        if !found {
            return Err(not_found(path));
        }
        Ok(merged.into_values().collect())
    }
}
