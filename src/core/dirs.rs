use crate::core::error::OverlayError;
use std::path::PathBuf;

pub fn get_config_directory() -> Result<PathBuf, OverlayError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("vcs-overlay"));
    }

    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => {
            dirs::home_dir().unwrap_or_default().join(".config")
        }
        "macos" => dirs::home_dir()
            .unwrap_or_default()
            .join("Library/Application Support"),
        "windows" => dirs::config_dir().unwrap_or_default(),
        _ => dirs::config_dir().unwrap_or_default(),
    };

    Ok(base.join("vcs-overlay"))
}

pub fn get_cache_directory() -> Result<PathBuf, OverlayError> {
    let base = std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(dirs::cache_dir)
        .ok_or(OverlayError::CacheDirectoryNotFound)?;

    Ok(base.join("vcs-overlay"))
}
