// ABOUTME: Utility functions for the revealkit application
// ABOUTME: Provides directory validation, cleanup and file copy helpers

use crate::errors::{Result, SlideError};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Validate that a directory exists
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SlideError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(SlideError::ValidationError(format!(
            "Path is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(SlideError::FileReadError)?;
    } else if !path.is_dir() {
        return Err(SlideError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        ensure_directory_exists(parent)?;
    }
    Ok(())
}

/// Remove everything inside a directory, keeping the directory itself
pub fn clear_directory(path: &Path) -> Result<()> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&entry_path)?;
        } else {
            fs::remove_file(&entry_path)?;
        }
    }
    Ok(())
}

/// Copy a reader into a new file, creating parent directories
pub fn copy_to_file(reader: &mut dyn Read, dest: &Path) -> Result<u64> {
    ensure_parent_directory_exists(dest)?;
    let mut out = fs::File::create(dest)?;
    Ok(io::copy(reader, &mut out)?)
}

/// Get the absolute path
pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| {
        SlideError::ValidationError(format!("Failed to get absolute path for {:?}: {}", path, e))
    })
}

/// Join a virtual `/`-separated path onto a real directory
pub fn join_virtual(base: &Path, path: &str) -> PathBuf {
    path.split('/')
        .filter(|p| !p.is_empty() && *p != ".")
        .fold(base.to_path_buf(), |acc, p| acc.join(p))
}
