// ABOUTME: Static export of a presentation
// ABOUTME: Writes a self-contained index.html plus every non-excluded file of the layered view

use crate::errors::{Result, SlideError};
use crate::html;
use crate::project::Project;
use crate::slides::EmbedMode;
use crate::utils;
use crate::vfs::filter::{FILE_CONFIG, FILE_INDEX_HTML, FILE_INDEX_TEMPLATE};
use crate::vfs::{self, DirEntry, FileSource};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Output formats understood by [`export`].
pub const SUPPORTED_FORMATS: &[&str] = &["html"];

/// Export `project` into `output`, clearing it first.
///
/// Slides are always inlined into the index page; their sources are copied
/// too. The copy skips the config file, the index template and the output
/// directory itself when it lives inside the project. On error the output directory is left in an
/// unspecified state.
pub fn export(project: &Project, output: &Path, format: &str) -> Result<Vec<PathBuf>> {
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(SlideError::UnsupportedFormat(format.to_string()));
    }
    info!("Exporting {:?} to {:?}", project.data_dir(), output);

    let presentation = project.reload()?;

    utils::ensure_directory_exists(output)?;
    let output = utils::get_absolute_path(output)?;
    if project.data_dir().starts_with(&output) {
        return Err(SlideError::ValidationError(format!(
            "Output directory {:?} must not contain the data directory",
            output
        )));
    }
    utils::clear_directory(&output)?;

    let index = html::generate_index_html(
        project.file_system(),
        &presentation,
        EmbedMode::all(),
        None,
    )?;
    let index_path = output.join(FILE_INDEX_HTML);
    html::write_html_to_file(&index, &index_path)?;
    let mut written = vec![index_path];

    let output_rel = output
        .strip_prefix(project.data_dir())
        .ok()
        .map(|rel| rel.to_string_lossy().replace('\\', "/"));

    let skip = |path: &str| -> bool {
        if path == FILE_CONFIG || path == FILE_INDEX_TEMPLATE {
            return true;
        }
        match &output_rel {
            Some(rel) => path == rel || path.starts_with(&format!("{}/", rel)),
            None => false,
        }
    };

    let fs = project.file_system();
    vfs::walk(fs, ".", &mut |path: &str, entry: &DirEntry| -> Result<()> {
        if entry.is_dir || skip(path) {
            return Ok(());
        }
        let dest = utils::join_virtual(&output, path);
        let mut reader = fs.open(path)?;
        utils::copy_to_file(&mut reader, &dest)?;
        debug!("Copied {}", path);
        written.push(dest);
        Ok(())
    })?;

    info!("Exported {} file(s) to {:?}", written.len(), output);
    Ok(written)
}
