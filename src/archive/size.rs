//! Bucket size accounting.

use anyhow::Result;
use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

use super::dir::ArchiveDir;

pub(crate) fn dir_size(path: &Path) -> u64 {
    let mut size: u64 = 0;
    for entry in WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        if let Ok(meta) = entry.metadata() {
            trace!(file = %entry.path().display(), bytes = meta.len(), "Sizing file");
            size = size.saturating_add(meta.len());
        }
    }
    size
}

/// Human-readable byte count for user-facing output.
pub fn format_bytes(n: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let f = n as f64;
    if f >= GB {
        format!("{:.1} GiB", f / GB)
    } else if f >= MB {
        format!("{:.1} MiB", f / MB)
    } else if f >= KB {
        format!("{:.1} KiB", f / KB)
    } else {
        format!("{} B", n)
    }
}

impl ArchiveDir {
    /// Recursive sum of file sizes under `root/<rel>`. An absent or empty
    /// bucket sizes to zero.
    pub fn bucket_size(&self, rel: &Path) -> Result<u64> {
        let bucket_dir = self.resolve_within(rel)?;
        Ok(dir_size(&bucket_dir))
    }
}
