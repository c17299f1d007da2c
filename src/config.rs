//! Platform-specific configuration and paths

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the application data directory
/// - macOS: ~/Library/Application Support/ConnectionsHelper/
/// - Linux: ~/.config/ConnectionsHelper/
/// - Windows: %APPDATA%/ConnectionsHelper/
pub fn app_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join("Library")
            .join("Application Support")
            .join("ConnectionsHelper"))
    }

    #[cfg(target_os = "linux")]
    {
        let config = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config.join("ConnectionsHelper"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata = dirs::config_dir().context("Could not determine AppData directory")?;
        Ok(appdata.join("ConnectionsHelper"))
    }
}

/// Get the path of the connections database, creating the app data
/// directory if it does not exist yet.
pub fn database_path() -> Result<PathBuf> {
    let dir = app_data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create: {}", dir.display()))?;
    }
    Ok(dir.join("connections.db"))
}
