//! The archive root handle.
//! Validates the root at construction and resolves every relative path
//! through a containment check so no operation can escape it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::errors::ArchiveError;
use crate::utils::is_writable_probe;

/// Handle bound to one archive root on durable storage.
///
/// The root is validated once at construction and is immutable for the
/// lifetime of the handle. All operations take paths relative to it.
#[derive(Debug, Clone)]
pub struct ArchiveDir {
    root: PathBuf,
}

impl ArchiveDir {
    /// Open an archive rooted at `root`.
    ///
    /// Fails if `root` does not exist, is not a directory, or is not
    /// writable (verified with a create-and-remove probe file rather than
    /// trusting permission bits).
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.exists() {
            return Err(ArchiveError::RootNotFound(root).into());
        }
        if !root.is_dir() {
            return Err(ArchiveError::RootNotADirectory(root).into());
        }
        if let Err(e) = is_writable_probe(&root) {
            return Err(ArchiveError::RootNotWritable {
                path: root,
                source: e,
            }
            .into());
        }

        // Resolve symlinks once so later containment checks compare
        // canonical prefixes.
        let root = fs::canonicalize(&root)
            .with_context(|| format!("canonicalize archive root '{}'", root.display()))?;

        info!(root = %root.display(), "Opened archive directory");
        Ok(Self { root })
    }

    /// The validated root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `rel` against the root, rejecting anything that would land
    /// outside it: absolute paths, `..` components, and symlinked escapes.
    pub(crate) fn resolve_within(&self, rel: &Path) -> Result<PathBuf> {
        if rel.is_absolute() {
            return Err(ArchiveError::PathEscapesRoot(rel.to_path_buf()).into());
        }
        for comp in rel.components() {
            match comp {
                Component::Normal(_) | Component::CurDir => {}
                _ => return Err(ArchiveError::PathEscapesRoot(rel.to_path_buf()).into()),
            }
        }

        let full = self.root.join(rel);

        // If the path already exists, re-verify after symlink resolution.
        if full.exists() {
            let real = fs::canonicalize(&full)
                .with_context(|| format!("canonicalize '{}'", full.display()))?;
            if !real.starts_with(&self.root) {
                return Err(ArchiveError::PathEscapesRoot(rel.to_path_buf()).into());
            }
        }

        Ok(full)
    }

    /// Idempotently create the index directory `root/<name>`.
    pub fn create_index_dir(&self, name: &str) -> Result<()> {
        let index_dir = self.resolve_within(Path::new(name))?;
        if index_dir.is_dir() {
            return Ok(());
        }
        debug!(index = name, "Creating index directory");
        fs::create_dir_all(&index_dir)
            .with_context(|| format!("create index directory '{}'", index_dir.display()))?;
        Ok(())
    }

    /// Absolute path of a bucket under the root. Containment-checked join;
    /// no other I/O.
    pub fn bucket_dir(&self, rel: &Path) -> Result<PathBuf> {
        self.resolve_within(rel)
    }

    /// Whether `root/<rel>` exists as a directory.
    pub fn bucket_exists(&self, rel: &Path) -> Result<bool> {
        Ok(self.resolve_within(rel)?.is_dir())
    }
}
