use dirs::home_dir;
use std::{env, io, path::Path, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".office_ledger";
const RECORDS_DIR: &str = "records";
const BACKUP_DIR: &str = "backups";
const CONFIG_BACKUP_DIR: &str = "config_backups";
const CONFIG_FILE: &str = "config.json";

/// Returns the application-specific data directory, defaulting to `~/.office_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("OFFICE_LEDGER_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Absolute path to the directory of persisted month records.
pub fn records_dir() -> PathBuf {
    app_data_dir().join(RECORDS_DIR)
}

/// Base directory for backup snapshots of overwritten records.
pub fn backups_root() -> PathBuf {
    app_data_dir().join(BACKUP_DIR)
}

/// Returns the directory containing configuration backups.
pub fn config_backups_dir() -> PathBuf {
    app_data_dir().join(CONFIG_BACKUP_DIR)
}

/// Path to the active configuration file.
pub fn config_file() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
