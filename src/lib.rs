//! Core library for `frozen_archive`.
//!
//! Filesystem-backed primitives for a cold-to-frozen archive directory:
//! a validated root holding index subdirectories, which in turn hold
//! `db_*`/`rb_*` bucket directories. [`ArchiveDir`] is the single handle
//! through which every operation runs; it keeps all paths inside the root.
//!
//! The advisory lock file is a plain-text marker (hostname content) for
//! cross-host coordination around critical sections. It is not an OS-level
//! lock; callers check/write/remove it themselves.

pub mod archive;
pub mod config;
pub mod errors;
pub mod output;
mod utils;

pub use archive::ArchiveDir;
pub use archive::size::format_bytes;
pub use config::{Config, LogLevel};
pub use config::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use errors::ArchiveError;
