// ABOUTME: In-memory file source used for embedded bundles and tests
// ABOUTME: Directories are implied by the stored file paths

use super::{ByteFile, DirEntry, FileSource, SourceFile, clean, not_found};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io;

/// Immutable tree of files held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<String, Cow<'static, [u8]>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source from a compiled-in table of `(path, contents)`.
    pub fn from_static(files: &'static [(&'static str, &'static [u8])]) -> Self {
        let mut fs = Self::new();
        for (path, data) in files {
            fs.insert(path, Cow::Borrowed(*data));
        }
        fs
    }

    /// Add a file, replacing any previous content at that path.
    pub fn with_file(mut self, path: &str, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, Cow::Owned(data.into()));
        self
    }

    fn insert(&mut self, path: &str, data: Cow<'static, [u8]>) {
        // Invalid paths in a compiled-in table are a programming error; keep them out.
        if let Ok(path) = clean(path) {
            if path != "." {
                self.files.insert(path, data);
            }
        }
    }
}

impl FileSource for MemoryFs {
    fn open(&self, path: &str) -> io::Result<SourceFile> {
        let path = clean(path)?;
        match self.files.get(&path) {
            Some(data) => Ok(Box::new(ByteFile::new(data.clone()))),
            None => Err(not_found(&path)),
        }
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let path = clean(path)?;
        let prefix = if path == "." {
            String::new()
        } else {
            format!("{}/", path)
        };

        let mut entries: BTreeMap<&str, bool> = BTreeMap::new();
        for file in self.files.keys() {
            let Some(rest) = file.strip_prefix(prefix.as_str()) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    entries.insert(dir, true);
                }
                None => {
                    entries.entry(rest).or_insert(false);
                }
            }
        }

        if entries.is_empty() && path != "." {
            return Err(not_found(&path));
        }
        Ok(entries
            .into_iter()
            .map(|(name, is_dir)| DirEntry {
                name: name.to_string(),
                is_dir,
            })
            .collect())
    }
}
