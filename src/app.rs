//! Application orchestrator.
//! Loads/merges config, initializes logging, opens the archive root, and
//! dispatches the requested operation.

use anyhow::{Result, anyhow};
use std::time::SystemTime;
use tracing::{debug, error, info};

use frozen_archive::config::load_config_from_xml;
use frozen_archive::output as out;
use frozen_archive::{ArchiveDir, ArchiveError, Config, default_config_path, format_bytes};

use crate::cli::{Args, Command, LockAction};
use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle print-config before logging init
    if matches!(args.command, Command::PrintConfig) {
        print_config_location();
        return Ok(());
    }

    // Build config (may read XML). CLI args override config values.
    let mut cfg = Config::default();
    if let Some((root, lvl, lf)) = load_config_from_xml() {
        if args.archive_root.is_none() {
            if let Some(r) = root {
                cfg.archive_root = r;
            }
        }
        if args.log_level.is_none() && !args.debug {
            if let Some(l) = lvl {
                cfg.log_level = l;
            }
        }
        if args.log_file.is_none() {
            if let Some(f) = lf {
                cfg.log_file = Some(f);
            }
        }
    }
    args.apply_overrides(&mut cfg);

    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)?;
    debug!("Starting frozen-archive: {:?}", args);

    let result = dispatch(&args, &cfg);
    if let Err(e) = &result {
        if let Some(archive_err) = e.downcast_ref::<ArchiveError>() {
            error!(code = archive_err.code(), error = %archive_err, "Command failed");
        } else {
            error!(error = ?e, "Command failed");
        }
    }
    result
}

fn print_config_location() {
    if let Ok(explicit) = std::env::var("FROZEN_ARCHIVE_CONFIG") {
        out::print_info(&format!("Using FROZEN_ARCHIVE_CONFIG (explicit):\n  {explicit}"));
        out::print_info("To override, unset FROZEN_ARCHIVE_CONFIG or set it to another file.");
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default frozen-archive config path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet; a template is written on first run.");
            }
        }
        Err(e) => {
            out::print_error(&format!("Could not determine a default config path: {e}"));
        }
    }
}

fn dispatch(args: &Args, cfg: &Config) -> Result<()> {
    let archive = ArchiveDir::open(&cfg.archive_root)?;

    match &args.command {
        Command::ListIndexes => {
            for name in archive.list_indexes()? {
                out::print_user(&name);
            }
            Ok(())
        }
        Command::ListBuckets { index } => {
            for name in archive.list_buckets(index)? {
                out::print_user(&name);
            }
            Ok(())
        }
        Command::Size { bucket, bytes } => {
            let size = archive.bucket_size(bucket)?;
            if *bytes {
                out::print_user(&size.to_string());
            } else {
                out::print_user(&format_bytes(size));
            }
            Ok(())
        }
        Command::Copy { src, dest, .. } => {
            if cfg.dry_run {
                let full = archive.bucket_dir(dest)?;
                out::print_info(&format!(
                    "Dry-run: would copy '{}' -> '{}'",
                    src.display(),
                    full.display()
                ));
                return Ok(());
            }
            archive.bucket_copy(src, dest)?;
            info!(src = %src.display(), dest = %dest.display(), "Copy completed");
            out::print_user(&format!(
                "Copied '{}' -> '{}'",
                src.display(),
                archive.bucket_dir(dest)?.display()
            ));
            Ok(())
        }
        Command::Remove { index, bucket } => {
            archive.remove_bucket(index, bucket)?;
            out::print_user(&format!("Removed '{index}/{bucket}'"));
            Ok(())
        }
        Command::Lock { action } => run_lock(&archive, action),
        Command::PrintConfig => Ok(()),
    }
}

fn run_lock(archive: &ArchiveDir, action: &LockAction) -> Result<()> {
    match action {
        LockAction::Status { path } => {
            if archive.check_lock_file(path)? {
                let host = archive.read_lock_file(path)?;
                out::print_user(&format!("locked by {host}"));
            } else {
                out::print_user("unlocked");
            }
            Ok(())
        }
        LockAction::Age { path } => {
            let mtime = archive.lock_file_age(path)?;
            let secs = SystemTime::now()
                .duration_since(mtime)
                .unwrap_or_default()
                .as_secs();
            out::print_user(&secs.to_string());
            Ok(())
        }
        LockAction::Acquire { path, host } => {
            let hostname = match host {
                Some(h) => h.clone(),
                None => std::env::var("HOSTNAME")
                    .map_err(|_| anyhow!("cannot determine hostname; pass --host"))?,
            };
            archive.write_lock_file(path, &hostname)?;
            out::print_user(&format!("locked by {hostname}"));
            Ok(())
        }
        LockAction::Release { path } => {
            archive.remove_lock_file(path)?;
            out::print_user("released");
            Ok(())
        }
    }
}
