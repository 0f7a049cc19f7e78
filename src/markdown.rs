// ABOUTME: Leading metadata block handling for markdown slide documents
// ABOUTME: Splits a document into its optional `---` delimited header and its visible body

const MARKER: &str = "---\n";
const CLOSING: &str = "\n---\n";

/// View over a markdown document's text.
///
/// A metadata block is recognized only at the very start of the document:
/// a `---` line, the header lines, and a closing `---` line. Blank lines after
/// the closing marker belong to the block.
#[derive(Debug, Clone, Copy)]
pub struct Markdown<'a> {
    content: &'a str,
}

impl<'a> Markdown<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    fn split(&self) -> Option<(&'a str, &'a str)> {
        let rest = self.content.strip_prefix(MARKER)?;
        let end = rest.find(CLOSING)?;
        let header = &rest[..end];
        let after = &rest[end + CLOSING.len()..];
        Some((header, after.trim_start_matches('\n')))
    }

    /// Raw text of the metadata block, if the document has one.
    pub fn header(&self) -> Option<&'a str> {
        self.split().map(|(header, _)| header)
    }

    /// Document text with the metadata block removed.
    pub fn body(&self) -> &'a str {
        self.split().map(|(_, body)| body).unwrap_or(self.content)
    }
}
