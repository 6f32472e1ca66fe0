//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Global flags override config values (which are loaded from XML if present).
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use frozen_archive::config::types::{Config, LogLevel};

/// CLI wrapper for the frozen_archive library.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Manage a cold-to-frozen archive directory: indexes, buckets and advisory locks"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Override the archive root directory (normally configured via XML).
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub archive_root: Option<PathBuf>,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List index directories under the archive root
    ListIndexes,

    /// List db_*/rb_* buckets under an index
    ListBuckets {
        /// Index name (top-level directory under the root)
        index: String,
    },

    /// Total size of a bucket tree
    Size {
        /// Bucket path relative to the root, e.g. main/db_1694000000_1693000000_42
        bucket: PathBuf,
        /// Print the raw byte count instead of a human-readable size
        #[arg(long)]
        bytes: bool,
    },

    /// Copy a bucket tree into the archive
    Copy {
        /// Source bucket directory (outside the archive)
        #[arg(value_hint = ValueHint::DirPath)]
        src: PathBuf,
        /// Destination path relative to the root, e.g. main/db_1
        dest: PathBuf,
        /// Show what would be copied, but do not modify the archive
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove a bucket from an index
    Remove {
        index: String,
        bucket: String,
    },

    /// Advisory lock file operations
    Lock {
        #[command(subcommand)]
        action: LockAction,
    },

    /// Print the config file location used by frozen-archive and exit
    PrintConfig,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LockAction {
    /// Report whether the lock file exists and who holds it
    Status { path: PathBuf },
    /// Print the lock file age in seconds
    Age { path: PathBuf },
    /// Write the lock file with this host's name
    Acquire {
        path: PathBuf,
        /// Hostname to record (defaults to $HOSTNAME)
        #[arg(long)]
        host: Option<String>,
    },
    /// Remove the lock file (no-op when absent)
    Release { path: PathBuf },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.archive_root {
            cfg.archive_root = root.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Command::Copy { dry_run: true, .. } = &self.command {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
