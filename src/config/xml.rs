//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a template if missing at the default location (not when
//!   FROZEN_ARCHIVE_CONFIG points somewhere explicit).

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::ARCHIVE_ROOT_DEFAULT;
use super::paths::default_config_path;
use super::types::LogLevel;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    archive_root: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Settings read from the config file; `None` for anything unset.
pub type LoadedConfig = (Option<PathBuf>, Option<LogLevel>, Option<PathBuf>);

/// Read config from XML. Returns None when the file does not exist or holds
/// no usable settings. Creates a template on first run at the default path.
pub fn load_config_from_xml() -> Option<LoadedConfig> {
    let env_set = env::var_os("FROZEN_ARCHIVE_CONFIG").is_some();
    let cfg_path = default_config_path().ok()?;

    if !cfg_path.exists() {
        if !env_set {
            let _ = create_template_config(&cfg_path);
        }
        return None;
    }

    let content = fs::read_to_string(&cfg_path).ok()?;
    let parsed: XmlConfig = match from_xml_str(&content) {
        Ok(x) => x,
        Err(e) => {
            warn!(
                path = %cfg_path.display(),
                error = %e,
                "Ignoring malformed config file"
            );
            return None;
        }
    };
    debug!(path = %cfg_path.display(), "Loaded config file");

    let archive_root = parsed
        .archive_root
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);
    let log_level = parsed.log_level.as_deref().and_then(LogLevel::parse);
    let log_file = parsed
        .log_file
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    if archive_root.is_none() && log_level.is_none() && log_file.is_none() {
        return None;
    }
    Some((archive_root, log_level, log_file))
}

/// Create parent directory and write a small template config file.
/// On Unix this sets conservative permissions (dir 0o700, file 0o600).
pub fn create_template_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let content = format!(
        "<config>\n  <archive_root>{}</archive_root>\n  <log_level>normal</log_level>\n</config>\n",
        ARCHIVE_ROOT_DEFAULT
    );
    fs::write(path, content)
        .with_context(|| format!("write template config '{}'", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}
