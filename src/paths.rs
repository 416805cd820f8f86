//! Config location resolution and path display helpers.

use std::{
    env,
    ffi::OsString,
    path::{MAIN_SEPARATOR, Path, PathBuf},
};

use crate::error::{Error, Result};

/// Directory name under the config base directory.
pub const APP_NAME: &str = "itda-skills";

/// File name of the config file inside [`config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the config base directory.
pub const CONFIG_HOME_VAR: &str = "XDG_CONFIG_HOME";

/// Return the config directory: `$XDG_CONFIG_HOME/itda-skills` when the
/// variable is set and non-empty, otherwise `~/.config/itda-skills`.
pub fn config_dir() -> Result<PathBuf> {
    config_dir_from(env::var_os(CONFIG_HOME_VAR))
}

/// Return the config file path inside [`config_dir`].
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Resolve the config directory from an optional base override.
fn config_dir_from(base: Option<OsString>) -> Result<PathBuf> {
    let base = match base.filter(|base| !base.is_empty()) {
        Some(base) => PathBuf::from(base),
        None => dirs::home_dir()
            .ok_or(Error::HomeDirMissing)?
            .join(".config"),
    };
    Ok(base.join(APP_NAME))
}

/// Render a path for display, using a tilde prefix for the home directory.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}
