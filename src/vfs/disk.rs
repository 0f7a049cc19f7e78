// ABOUTME: On-disk file source rooted at a directory
// ABOUTME: Maps virtual paths onto the local filesystem without escaping the root

use super::{DirEntry, FileSource, SourceFile, clean, not_found};
use crate::utils::join_virtual;
use log::warn;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DiskFs {
    root: PathBuf,
}

impl DiskFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Real filesystem path for a virtual path.
    pub fn real_path(&self, path: &str) -> io::Result<PathBuf> {
        let path = clean(path)?;
        Ok(join_virtual(&self.root, &path))
    }
}

impl FileSource for DiskFs {
    fn open(&self, path: &str) -> io::Result<SourceFile> {
        let real = self.real_path(path)?;
        if fs::metadata(&real)?.is_dir() {
            return Err(not_found(path));
        }
        Ok(Box::new(fs::File::open(real)?))
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let real = self.real_path(path)?;
        if !fs::metadata(&real)?.is_dir() {
            return Err(not_found(path));
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&real)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                warn!("Skipping non UTF-8 file name in {:?}", real);
                continue;
            };
            // Follow symlinks so a linked directory lists as a directory.
            let is_dir = match fs::metadata(entry.path()) {
                Ok(meta) => meta.is_dir(),
                Err(e) => {
                    warn!("Skipping unreadable entry {:?}: {}", entry.path(), e);
                    continue;
                }
            };
            entries.push(DirEntry { name, is_dir });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
