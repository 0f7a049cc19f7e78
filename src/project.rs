// ABOUTME: A presentation project rooted at a data directory
// ABOUTME: Owns the layered file view and the current config snapshot shared with readers

use crate::bundle;
use crate::config::{self, Presentation};
use crate::errors::{Result, SlideError};
use crate::html;
use crate::slides::EmbedMode;
use crate::utils;
use crate::vfs::{ContentFilterView, DiskFs, FileSource, OverlayFs};
use log::{error, info};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of the latest reload.
#[derive(Debug, Clone)]
pub enum Snapshot {
    Ready(Arc<Presentation>),
    Failed(String),
}

pub struct Project {
    data_dir: PathBuf,
    content: Arc<ContentFilterView>,
    fs: Arc<OverlayFs>,
    embed: EmbedMode,
    state: RwLock<Option<Snapshot>>,
}

impl Project {
    /// Open an existing data directory.
    pub fn open(dir: &Path) -> Result<Self> {
        utils::validate_directory_exists(dir)?;
        let data_dir = utils::get_absolute_path(dir)?;

        let disk: Arc<dyn FileSource> = Arc::new(DiskFs::new(&data_dir));
        let content = Arc::new(ContentFilterView::new(disk));
        let fs = Arc::new(OverlayFs::new(vec![
            content.clone() as Arc<dyn FileSource>,
            Arc::new(bundle::defaults()) as Arc<dyn FileSource>,
        ]));

        Ok(Self {
            data_dir,
            content,
            fs,
            embed: EmbedMode::default(),
            state: RwLock::new(None),
        })
    }

    pub fn with_embed(mut self, embed: EmbedMode) -> Self {
        self.embed = embed;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn embed(&self) -> EmbedMode {
        self.embed
    }

    /// Project content layered over the bundled defaults.
    pub fn file_system(&self) -> &OverlayFs {
        &self.fs
    }

    /// Re-run the whole cascade and replace the current snapshot.
    pub fn reload(&self) -> Result<Arc<Presentation>> {
        match config::load(self.content.as_ref()) {
            Ok(presentation) => {
                let presentation = Arc::new(presentation);
                info!(
                    "Loaded presentation '{}' with {} slide file(s)",
                    presentation.config.title,
                    presentation.slides.len()
                );
                *self.state.write() = Some(Snapshot::Ready(presentation.clone()));
                Ok(presentation)
            }
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                *self.state.write() = Some(Snapshot::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Current presentation, loading it on first use. A failed last reload is
    /// reported as a reload error until the next successful one.
    pub fn snapshot(&self) -> Result<Arc<Presentation>> {
        let current = self.state.read().clone();
        match current {
            Some(Snapshot::Ready(presentation)) => Ok(presentation),
            Some(Snapshot::Failed(message)) => Err(SlideError::ReloadError(message)),
            None => self.reload(),
        }
    }

    /// Index page for the current snapshot, with hot reload when a revision is given.
    pub fn generate_index_html(&self, revision: Option<&str>) -> Result<String> {
        let presentation = self.snapshot()?;
        html::generate_index_html(self.fs.as_ref(), &presentation, self.embed, revision)
    }
}
