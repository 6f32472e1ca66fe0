//! Bucket copy into the archive.
//! Builds the directory skeleton first, then copies files in parallel.
//! A failed copy removes the partial destination and surfaces an error;
//! the caller decides whether to abort or carry on.

use anyhow::Result;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::ArchiveError;

use super::dir::ArchiveDir;
use super::size::{dir_size, format_bytes};

// Headroom beyond the measured tree size, since destination filesystems
// round files up to whole blocks.
const SPACE_CUSHION: u64 = 4 * 1024 * 1024;

impl ArchiveDir {
    /// Recursively copy the bucket tree at `src` to `root/<dest_rel>`.
    ///
    /// Fails with `DestinationExists` when the destination is already
    /// present, `InsufficientSpace` when the archive filesystem cannot hold
    /// the tree, and `CopyFailed` on any I/O error during the copy. On
    /// failure the partially written destination is removed best-effort.
    pub fn bucket_copy(&self, src: &Path, dest_rel: &Path) -> Result<()> {
        let dest = self.resolve_within(dest_rel)?;

        if dest.exists() {
            return Err(ArchiveError::DestinationExists(dest).into());
        }
        if !src.is_dir() {
            return Err(ArchiveError::CopyFailed {
                src: src.to_path_buf(),
                dest,
                reason: "source is not a directory".into(),
            }
            .into());
        }

        let required = dir_size(src);
        let available = fs2::available_space(self.root()).unwrap_or(u64::MAX);
        if available < required.saturating_add(SPACE_CUSHION) {
            return Err(ArchiveError::InsufficientSpace {
                required,
                available,
                dest,
            }
            .into());
        }

        if let Err(reason) = copy_tree(src, &dest) {
            warn!(dest = %dest.display(), "Removing partial bucket copy after failure");
            let _ = fs::remove_dir_all(&dest);
            return Err(ArchiveError::CopyFailed {
                src: src.to_path_buf(),
                dest,
                reason,
            }
            .into());
        }

        info!(
            src = %src.display(),
            dest = %dest.display(),
            size = %format_bytes(required),
            "Copied bucket into archive"
        );
        Ok(())
    }
}

/// Copy `src` tree under `dest`: directory skeleton first, then files in
/// parallel. Returns a reason string on the first failure.
fn copy_tree(src: &Path, dest: &Path) -> std::result::Result<(), String> {
    for entry in WalkDir::new(src)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir())
    {
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| e.to_string())?;
        let new_dir = dest.join(rel);
        fs::create_dir_all(&new_dir)
            .map_err(|e| format!("create directory '{}': {}", new_dir.display(), e))?;
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(src).into_iter().filter_map(Result::ok) {
        let file_type = entry.file_type();
        if file_type.is_file() {
            files.push(entry.into_path());
        } else if !file_type.is_dir() {
            // Symlinks and other non-regular entries are not carried over.
            debug!(path = %entry.path().display(), "Skipping non-regular entry during bucket copy");
        }
    }

    files
        .par_iter()
        .try_for_each(|path| -> std::result::Result<(), String> {
            let rel = path.strip_prefix(src).map_err(|e| e.to_string())?;
            let dst = dest.join(rel);
            fs::copy(path, &dst)
                .map_err(|e| format!("copy '{}' -> '{}': {}", path.display(), dst.display(), e))?;
            Ok(())
        })
}
