// ABOUTME: Slide set resolution and section rendering
// ABOUTME: Finds the ordered slide documents of a presentation and turns each into a <section>

use crate::config::Config;
use crate::errors::{Result, SlideError};
use crate::markdown::Markdown;
use crate::vfs::filter::DIR_SLIDES;
use crate::vfs::{self, DirEntry, FileSource, is_html, is_markdown};
use log::warn;

/// Slide break pattern handed to the markdown plugin.
pub const SEPARATOR: &str = r"^\r?\n---\r?\n$";
/// Vertical (nested) slide break pattern handed to the markdown plugin.
pub const SEPARATOR_VERTICAL: &str = r"^\r?\n~~~\r?\n$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Markdown,
    Html,
}

impl SlideKind {
    pub fn from_path(path: &str) -> Option<Self> {
        if is_markdown(path) {
            Some(SlideKind::Markdown)
        } else if is_html(path) {
            Some(SlideKind::Html)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideDocument {
    /// Path relative to the project root.
    pub path: String,
    pub kind: SlideKind,
    pub content: String,
}

impl SlideDocument {
    pub fn is_markdown(&self) -> bool {
        self.kind == SlideKind::Markdown
    }

    /// Visible text: markdown loses its metadata block, html is untouched.
    pub fn body(&self) -> &str {
        match self.kind {
            SlideKind::Markdown => Markdown::new(&self.content).body(),
            SlideKind::Html => &self.content,
        }
    }

    /// Metadata block of a markdown document parsed as a partial config.
    pub fn metadata(&self) -> Result<Option<Config>> {
        if !self.is_markdown() {
            return Ok(None);
        }
        let Some(header) = Markdown::new(&self.content).header() else {
            return Ok(None);
        };
        Config::from_yaml(header)
            .map(Some)
            .map_err(|e| SlideError::MetadataError {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }
}

/// Which document kinds are inlined into the page rather than referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedMode {
    pub html: bool,
    pub markdown: bool,
}

impl Default for EmbedMode {
    fn default() -> Self {
        Self {
            html: true,
            markdown: false,
        }
    }
}

impl EmbedMode {
    /// Everything inlined, as required for a self-contained export.
    pub fn all() -> Self {
        Self {
            html: true,
            markdown: true,
        }
    }

    pub fn embeds(&self, kind: SlideKind) -> bool {
        match kind {
            SlideKind::Markdown => self.markdown,
            SlideKind::Html => self.html,
        }
    }
}

fn load_document(content: &dyn FileSource, path: &str) -> Option<SlideDocument> {
    let Some(kind) = SlideKind::from_path(path) else {
        warn!("Unsupported slide file: {}", path);
        return None;
    };
    match vfs::read_to_string(content, path) {
        Ok(text) => Some(SlideDocument {
            path: path.to_string(),
            kind,
            content: text,
        }),
        Err(e) => {
            warn!("Failed to load slide file {}: {}", path, e);
            None
        }
    }
}

/// Whether `path` sits where auto-discovery looks for slides.
fn is_discoverable(path: &str) -> bool {
    let (dir, file) = vfs::split(path);
    (dir.is_empty() || dir == DIR_SLIDES) && SlideKind::from_path(file).is_some()
}

/// Resolve the ordered slide documents of a presentation.
///
/// An explicit `slides` list is used as written; entries that cannot be
/// loaded are logged and skipped. Otherwise the content view is walked depth
/// first in lexical order.
pub fn resolve(config: &Config, content: &dyn FileSource) -> Result<Vec<SlideDocument>> {
    if !config.slides.is_empty() {
        return Ok(config
            .slides
            .iter()
            .filter_map(|path| match vfs::clean(path) {
                Ok(path) => load_document(content, &path),
                Err(e) => {
                    warn!("Invalid slide path {}: {}", path, e);
                    None
                }
            })
            .collect());
    }

    let mut documents = Vec::new();
    vfs::walk(content, ".", &mut |path: &str, entry: &DirEntry| -> Result<()> {
        if !entry.is_dir && is_discoverable(path) {
            documents.extend(load_document(content, path));
        }
        Ok(())
    })?;
    Ok(documents)
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            other => out.push(other),
        }
    }
    out
}

/// Render one document as a presentation fragment.
pub fn render_section(doc: &SlideDocument, embed: EmbedMode) -> String {
    match (doc.kind, embed.embeds(doc.kind)) {
        (SlideKind::Html, true) => doc.content.clone(),
        (SlideKind::Html, false) => {
            format!(r#"<section data-external="{}"></section>"#, doc.path)
        }
        (SlideKind::Markdown, true) => format!(
            r#"<section data-markdown data-separator="{}" data-separator-vertical="{}">{}</section>"#,
            SEPARATOR,
            SEPARATOR_VERTICAL,
            escape_html(doc.body())
        ),
        (SlideKind::Markdown, false) => format!(
            r#"<section data-markdown="{}" data-separator="{}" data-separator-vertical="{}"></section>"#,
            doc.path, SEPARATOR, SEPARATOR_VERTICAL
        ),
    }
}

pub fn render_sections(docs: &[SlideDocument], embed: EmbedMode) -> Vec<String> {
    docs.iter().map(|doc| render_section(doc, embed)).collect()
}
