use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::core::utils::{self, ensure_dir};
use crate::errors::LedgerError;
use crate::storage::json_backend::write_atomic;

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

fn default_retention() -> usize {
    5
}

/// User-tunable settings persisted next to the records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "default_retention")]
    pub backup_retention: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_month: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "ko-KR".into(),
            currency: "KRW".into(),
            backup_retention: default_retention(),
            last_opened_month: None,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(utils::app_data_dir())
    }

    /// Manager rooted at an explicit directory instead of the app data
    /// dir. Integration tests rely on this for isolation.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        let backups_dir = base.join("config_backups");
        ensure_dir(&backups_dir)?;
        Ok(Self {
            path: base.join("config.json"),
            backups_dir,
        })
    }

    /// Active configuration. A missing file yields the defaults; an
    /// unreadable one does too, with a warning, so startup never fails
    /// on a damaged config.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&data) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "config unreadable; using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    /// Snapshots the configuration into the backup directory and
    /// prunes old snapshots down to the configured retention.
    pub fn backup(&self, config: &Config, note: Option<&str>) -> Result<String, LedgerError> {
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut name = format!("config_{}", timestamp);
        if let Some(label) = sanitize_note(note) {
            name.push('_');
            name.push_str(&label);
        }
        name.push('.');
        name.push_str(BACKUP_EXTENSION);
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.backups_dir.join(&name), &json)?;
        self.prune_backups(config.backup_retention.max(1))?;
        Ok(name)
    }

    pub fn restore(&self, backup_name: &str) -> Result<Config, LedgerError> {
        let path = self.backups_dir.join(backup_name);
        if !path.exists() {
            return Err(LedgerError::InvalidRef(format!(
                "configuration backup `{}` not found",
                backup_name
            )));
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Backup snapshots, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>, LedgerError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| parse_timestamp(b).cmp(&parse_timestamp(a)));
        Ok(entries)
    }

    fn prune_backups(&self, keep: usize) -> Result<(), LedgerError> {
        let entries = self.list_backups()?;
        for stale in entries.iter().skip(keep) {
            fs::remove_file(self.backups_dir.join(stale))?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
        } else if !sanitized.ends_with('-') && !sanitized.is_empty() {
            sanitized.push('-');
        }
    }
    let trimmed = sanitized.trim_matches('-');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(".json")?;
    let mut segments = stem.rsplit('_');
    let mut time_part = segments.next()?;
    // A note suffix shifts the timestamp one segment left.
    let mut date_part = segments.next()?;
    if time_part.len() != 4 || !time_part.bytes().all(|b| b.is_ascii_digit()) {
        time_part = date_part;
        date_part = segments.next()?;
    }
    if date_part.len() != 8 || time_part.len() != 4 {
        return None;
    }
    let raw = format!("{}{}", date_part, time_part);
    chrono::NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_loads_defaults() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let config = manager.load().expect("load");
        assert_eq!(config.locale, "ko-KR");
        assert_eq!(config.currency, "KRW");
        assert_eq!(config.backup_retention, 5);
        assert!(config.last_opened_month.is_none());
    }

    #[test]
    fn saved_config_round_trips() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let mut config = Config::default();
        config.currency = "USD".into();
        config.last_opened_month = Some("2024-06".into());
        manager.save(&config).expect("save");

        let loaded = manager.load().expect("reload");
        assert_eq!(loaded.currency, "USD");
        assert_eq!(loaded.last_opened_month.as_deref(), Some("2024-06"));
    }

    #[test]
    fn damaged_config_falls_back_to_defaults() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        std::fs::write(manager.path(), "not json at all").expect("write garbage");
        let config = manager.load().expect("load");
        assert_eq!(config.locale, "ko-KR");
    }

    #[test]
    fn backups_list_and_restore() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let mut config = Config::default();
        config.currency = "JPY".into();
        let name = manager.backup(&config, Some("before switch")).expect("backup");
        assert!(name.starts_with("config_"));
        assert!(name.contains("before-switch"));

        let listed = manager.list_backups().expect("list");
        assert_eq!(listed, vec![name.clone()]);

        let restored = manager.restore(&name).expect("restore");
        assert_eq!(restored.currency, "JPY");
        assert!(manager.restore("config_nope.json").is_err());
    }

    #[test]
    fn backup_retention_prunes_oldest() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let mut config = Config::default();
        config.backup_retention = 2;
        // Same-minute timestamps collide, so label each snapshot.
        for note in ["one", "two", "three", "four"] {
            manager.backup(&config, Some(note)).expect("backup");
        }
        let listed = manager.list_backups().expect("list");
        assert!(listed.len() <= 2);
    }
}
