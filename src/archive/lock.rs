//! Advisory lock file operations.
//!
//! The lock is a plain-text file at a path relative to the root, holding
//! the name of the host that took it. Existence signals an active lock and
//! the file mtime gives its age. This is a cooperative marker for external
//! coordination across processes and hosts, not an OS-level lock.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;

use crate::errors::ArchiveError;

use super::dir::ArchiveDir;

impl ArchiveDir {
    /// Whether the lock file exists.
    pub fn check_lock_file(&self, rel: &Path) -> Result<bool> {
        let lock_file = self.resolve_within(rel)?;
        debug!(path = %lock_file.display(), "Checking for lock file");
        Ok(lock_file.is_file())
    }

    /// Last-modified time of the lock file. Fails if it is absent.
    pub fn lock_file_age(&self, rel: &Path) -> Result<SystemTime> {
        let lock_file = self.resolve_within(rel)?;
        if !lock_file.is_file() {
            return Err(ArchiveError::LockNotFound(lock_file).into());
        }
        let meta = fs::metadata(&lock_file)
            .with_context(|| format!("stat lock file '{}'", lock_file.display()))?;
        meta.modified()
            .with_context(|| format!("read mtime of lock file '{}'", lock_file.display()))
    }

    /// Create or overwrite the lock file with `hostname` as its content.
    pub fn write_lock_file(&self, rel: &Path, hostname: &str) -> Result<()> {
        let lock_file = self.resolve_within(rel)?;
        if let Some(parent) = lock_file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create lock file parent '{}'", parent.display()))?;
        }
        fs::write(&lock_file, hostname)
            .with_context(|| format!("write lock file '{}'", lock_file.display()))?;
        debug!(path = %lock_file.display(), host = hostname, "Created lock file");
        Ok(())
    }

    /// Read the lock-holder hostname, with trailing whitespace trimmed.
    /// Fails if the lock file is absent.
    pub fn read_lock_file(&self, rel: &Path) -> Result<String> {
        let lock_file = self.resolve_within(rel)?;
        if !lock_file.is_file() {
            return Err(ArchiveError::LockNotFound(lock_file).into());
        }
        let content = fs::read_to_string(&lock_file)
            .with_context(|| format!("read lock file '{}'", lock_file.display()))?;
        Ok(content.trim_end().to_string())
    }

    /// Delete the lock file if present; no-op when it does not exist.
    pub fn remove_lock_file(&self, rel: &Path) -> Result<()> {
        let lock_file = self.resolve_within(rel)?;
        if lock_file.is_file() {
            fs::remove_file(&lock_file)
                .with_context(|| format!("remove lock file '{}'", lock_file.display()))?;
            debug!(path = %lock_file.display(), "Removed lock file");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lock_round_trip_trims_trailing_whitespace() {
        let td = tempdir().unwrap();
        let archive = ArchiveDir::open(td.path()).unwrap();
        let rel = Path::new("c2f.lock");

        assert!(!archive.check_lock_file(rel).unwrap());
        archive.write_lock_file(rel, "idx-host-01\n").unwrap();
        assert!(archive.check_lock_file(rel).unwrap());
        assert_eq!(archive.read_lock_file(rel).unwrap(), "idx-host-01");

        archive.remove_lock_file(rel).unwrap();
        assert!(!archive.check_lock_file(rel).unwrap());
    }

    #[test]
    fn age_of_missing_lock_is_not_found() {
        let td = tempdir().unwrap();
        let archive = ArchiveDir::open(td.path()).unwrap();
        let err = archive.lock_file_age(Path::new("absent.lock")).unwrap_err();
        let archive_err = err.downcast_ref::<ArchiveError>().unwrap();
        assert_eq!(archive_err.code(), "lock_not_found");
    }

    #[test]
    fn age_of_fresh_lock_is_recent() {
        let td = tempdir().unwrap();
        let archive = ArchiveDir::open(td.path()).unwrap();
        let rel = Path::new("c2f.lock");
        archive.write_lock_file(rel, "h").unwrap();
        let age = archive.lock_file_age(rel).unwrap();
        let elapsed = SystemTime::now().duration_since(age).unwrap();
        assert!(elapsed.as_secs() < 60);
    }

    #[test]
    fn remove_missing_lock_is_noop() {
        let td = tempdir().unwrap();
        let archive = ArchiveDir::open(td.path()).unwrap();
        archive.remove_lock_file(Path::new("absent.lock")).unwrap();
    }

    #[test]
    fn write_overwrites_previous_holder() {
        let td = tempdir().unwrap();
        let archive = ArchiveDir::open(td.path()).unwrap();
        let rel = Path::new("c2f.lock");
        archive.write_lock_file(rel, "host-a").unwrap();
        archive.write_lock_file(rel, "host-b").unwrap();
        assert_eq!(archive.read_lock_file(rel).unwrap(), "host-b");
    }
}
