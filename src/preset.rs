// ABOUTME: Starter presets for new presentations
// ABOUTME: Extracts a bundled preset layered over the bundled defaults into a data directory

use crate::bundle;
use crate::errors::Result;
use crate::utils;
use crate::vfs::filter::{FILE_CONFIG, FILE_INDEX_TEMPLATE};
use crate::vfs::{self, DirEntry, FileSource, OverlayFs};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for [`Preset::generate`]
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Clear the destination directory first
    pub force: bool,
    /// Also write `config.yml`
    pub generate_config: bool,
    /// Also write `index.html.tmpl`
    pub generate_html_template: bool,
}

/// Files used to start a new presentation.
pub struct Preset {
    name: String,
    fs: OverlayFs,
}

impl Preset {
    pub fn new(name: &str) -> Result<Self> {
        let files = bundle::preset(name)?;
        let fs = OverlayFs::new(vec![
            Arc::new(files) as Arc<dyn FileSource>,
            Arc::new(bundle::defaults()) as Arc<dyn FileSource>,
        ]);
        Ok(Self {
            name: name.to_string(),
            fs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write the preset into `dest`. Existing files are kept; returns the
    /// files that were written.
    pub fn generate(&self, dest: &Path, options: &GenerateOptions) -> Result<Vec<PathBuf>> {
        utils::ensure_directory_exists(dest)?;
        if options.force {
            utils::clear_directory(dest)?;
        }

        let mut written = Vec::new();
        vfs::walk(&self.fs, ".", &mut |path: &str, entry: &DirEntry| -> Result<()> {
            if path == FILE_INDEX_TEMPLATE && !options.generate_html_template {
                return Ok(());
            }
            if path == FILE_CONFIG && !options.generate_config {
                return Ok(());
            }
            let target = utils::join_virtual(dest, path);
            if target.exists() {
                if !entry.is_dir {
                    info!("Skipped.  File already exist: {:?}", target);
                }
                return Ok(());
            }
            if entry.is_dir {
                utils::ensure_directory_exists(&target)?;
            } else {
                let mut reader = self.fs.open(path)?;
                utils::copy_to_file(&mut reader, &target)?;
                written.push(target);
            }
            Ok(())
        })?;

        info!(
            "Generated preset '{}' in {:?} ({} file(s))",
            self.name,
            dest,
            written.len()
        );
        Ok(written)
    }
}
