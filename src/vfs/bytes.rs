// ABOUTME: In-memory read-only file over a byte buffer
// ABOUTME: Lets generated and embedded content flow through the same FileSource interface

use std::borrow::Cow;
use std::io::{self, Cursor, Read};

/// Read-only file backed by a byte buffer, borrowed for embedded data or owned
/// for generated content.
#[derive(Debug, Clone)]
pub struct ByteFile {
    reader: Cursor<Cow<'static, [u8]>>,
}

impl ByteFile {
    pub fn new(data: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            reader: Cursor::new(data.into()),
        }
    }

    /// Total size of the underlying buffer in bytes.
    pub fn len(&self) -> u64 {
        self.reader.get_ref().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for ByteFile {
    fn from(s: String) -> Self {
        ByteFile::new(s.into_bytes())
    }
}

impl Read for ByteFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}
