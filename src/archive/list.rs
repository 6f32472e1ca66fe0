//! Index and bucket enumeration.

use anyhow::{Context, Result};
use std::fs;
use tracing::debug;

use crate::errors::ArchiveError;
use crate::utils::is_hidden_name;

use super::dir::ArchiveDir;

/// Buckets are the `db_*` (hot/warm-derived) and `rb_*` (replicated)
/// directories produced by the indexer.
pub fn is_bucket_name(name: &str) -> bool {
    name.starts_with("db_") || name.starts_with("rb_")
}

impl ArchiveDir {
    /// Names of the non-hidden directories directly under the root, sorted.
    pub fn list_indexes(&self) -> Result<Vec<String>> {
        debug!(root = %self.root().display(), "Listing indexes");
        let mut indexes = Vec::new();
        let entries = fs::read_dir(self.root())
            .with_context(|| format!("read archive root '{}'", self.root().display()))?;
        for entry in entries {
            let entry = entry
                .with_context(|| format!("read entry under '{}'", self.root().display()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_hidden_name(&name) || !entry.path().is_dir() {
                continue;
            }
            indexes.push(name);
        }
        indexes.sort();
        Ok(indexes)
    }

    /// Names of the bucket directories under `root/<index>`, sorted.
    /// Only `db_*`/`rb_*` entries qualify; everything else is skipped.
    pub fn list_buckets(&self, index: &str) -> Result<Vec<String>> {
        let index_dir = self.resolve_within(std::path::Path::new(index))?;
        if !index_dir.is_dir() {
            return Err(ArchiveError::IndexNotFound(index_dir).into());
        }
        debug!(path = %index_dir.display(), "Listing buckets");
        let mut buckets = Vec::new();
        let entries = fs::read_dir(&index_dir)
            .with_context(|| format!("read index directory '{}'", index_dir.display()))?;
        for entry in entries {
            let entry =
                entry.with_context(|| format!("read entry under '{}'", index_dir.display()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_bucket_name(&name) && entry.path().is_dir() {
                buckets.push(name);
            }
        }
        buckets.sort();
        Ok(buckets)
    }
}
