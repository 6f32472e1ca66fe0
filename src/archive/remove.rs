//! Bucket removal.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::dir::ArchiveDir;

impl ArchiveDir {
    /// Recursively delete `root/<index>/<bucket>`.
    ///
    /// A missing bucket is an Ok no-op. A real deletion failure is surfaced
    /// so callers can retry or escalate.
    pub fn remove_bucket(&self, index: &str, bucket: &str) -> Result<()> {
        let bucket_dir = self.resolve_within(&Path::new(index).join(bucket))?;
        if !bucket_dir.is_dir() {
            debug!(path = %bucket_dir.display(), "Bucket already absent, nothing to remove");
            return Ok(());
        }
        debug!(path = %bucket_dir.display(), "Removing bucket");
        fs::remove_dir_all(&bucket_dir)
            .with_context(|| format!("remove bucket '{}'", bucket_dir.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn removes_bucket_tree() {
        let td = tempdir().unwrap();
        let archive = ArchiveDir::open(td.path()).unwrap();
        let bucket = td.path().join("main").join("db_1");
        fs::create_dir_all(bucket.join("rawdata")).unwrap();
        fs::write(bucket.join("rawdata").join("journal.gz"), b"j").unwrap();

        archive.remove_bucket("main", "db_1").unwrap();
        assert!(!bucket.exists());
        // The index directory stays; this component never removes indexes.
        assert!(td.path().join("main").is_dir());
    }

    #[test]
    fn missing_bucket_is_ok() {
        let td = tempdir().unwrap();
        let archive = ArchiveDir::open(td.path()).unwrap();
        archive.remove_bucket("main", "db_404").unwrap();
    }

    #[test]
    fn traversal_in_bucket_name_is_rejected() {
        let td = tempdir().unwrap();
        let archive = ArchiveDir::open(td.path()).unwrap();
        assert!(archive.remove_bucket("main", "../../etc").is_err());
    }
}
