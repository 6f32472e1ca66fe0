//! Configuration: types, default paths, XML loading.
//! Re-exports keep the public surface flat for callers.

pub mod paths;
pub mod types;
pub mod xml;

pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config_from_xml};

/// Default archive root when neither config file nor CLI provide one.
pub const ARCHIVE_ROOT_DEFAULT: &str = "/srv/frozen-archive";
