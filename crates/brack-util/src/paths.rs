//! Default paths for brack data
//!
//! The database lives in a per-user directory, user-writable by default:
//! `$BRACK_DATA_DIR`, else `$XDG_CONFIG_HOME/brack`, else `~/.brack`.

use std::path::PathBuf;

/// Environment variable for overriding the data directory
pub const BRACK_DATA_DIR_ENV: &str = "BRACK_DATA_DIR";

/// Database filename within the data directory
pub const DB_FILENAME: &str = "brack.db";

/// Application subdirectory name
const APP_DIR: &str = "brack";

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$BRACK_DATA_DIR` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/brack` (if XDG_CONFIG_HOME is set)
/// 3. `~/.brack` (fallback)
pub fn default_data_dir() -> PathBuf {
    // Check environment override first
    if let Ok(path) = std::env::var(BRACK_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking BRACK_DATA_DIR.
/// Used for default values in CLI args where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    // Try XDG_CONFIG_HOME first
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR);
    }

    // Fallback to a dot directory in the home directory
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(format!(".{}", APP_DIR));
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR)
}
