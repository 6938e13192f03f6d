//! Configuration root discovery.

use std::path::PathBuf;

use plinth_core::error::{PlinthError, PlinthResult};
use tracing::debug;

/// Environment variable overriding the configuration root.
pub const HOME_ENV: &str = "PLINTH_HOME";

/// Directory name of the configuration root inside the home directory.
pub const DEFAULT_DIR_NAME: &str = "plinth";

/// `$PLINTH_HOME` if set and non-empty, else `<home>/plinth`.
pub fn default_config_root() -> PlinthResult<PathBuf> {
    resolve_config_root(std::env::var_os(HOME_ENV).map(PathBuf::from), dirs::home_dir())
}

fn resolve_config_root(
    override_root: Option<PathBuf>,
    home: Option<PathBuf>,
) -> PlinthResult<PathBuf> {
    if let Some(root) = override_root.filter(|p| !p.as_os_str().is_empty()) {
        debug!(root = %root.display(), "Using {HOME_ENV}");
        return Ok(root);
    }

    home.map(|h| h.join(DEFAULT_DIR_NAME))
        .ok_or_else(|| PlinthError::Internal {
            message: format!("no home directory found and {HOME_ENV} is not set"),
        })
}
