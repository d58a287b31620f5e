use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::core::utils::{app_data_dir, ensure_dir};
use crate::errors::LedgerError;

use super::{KeyValueStore, Result};

const RECORDS_DIR: &str = "records";
const BACKUPS_DIR: &str = "backups";
const BACKUP_SUFFIX: &str = ".json.bak";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// File-backed store: one `<key>.json` per key under `records/`, with
/// timestamped backups of overwritten values under `backups/<key>/`.
#[derive(Clone)]
pub struct JsonStore {
    root: PathBuf,
    records_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let records_dir = root.join(RECORDS_DIR);
        let backups_dir = root.join(BACKUPS_DIR);
        ensure_dir(&records_dir)?;
        ensure_dir(&backups_dir)?;
        Ok(Self {
            root,
            records_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self, key: &str) -> PathBuf {
        self.records_dir
            .join(format!("{}.json", canonical_key(key)))
    }

    fn backup_dir(&self, key: &str) -> PathBuf {
        self.backups_dir.join(canonical_key(key))
    }

    pub fn backup_path(&self, key: &str, backup_name: &str) -> PathBuf {
        self.backup_dir(key).join(backup_name)
    }

    /// Backup file names for the key, newest first.
    pub fn list_backups(&self, key: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(key);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            if !file_name.ends_with(BACKUP_SUFFIX) {
                continue;
            }
            entries.push(file_name);
        }
        entries.sort_by(|a, b| parse_backup_timestamp(b).cmp(&parse_backup_timestamp(a)));
        Ok(entries)
    }

    /// Copies the named backup over the live value and returns its contents.
    pub fn restore(&self, key: &str, backup_name: &str) -> Result<String> {
        let backup_path = self.backup_path(key, backup_name);
        if !backup_path.exists() {
            return Err(LedgerError::InvalidRef(format!(
                "backup `{}` not found for key `{}`",
                backup_name, key
            )));
        }
        let target = self.record_path(key);
        fs::copy(&backup_path, &target)?;
        info!(key, backup = backup_name, "restored record from backup");
        Ok(fs::read_to_string(&target)?)
    }

    fn backup_existing_file(&self, key: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(key);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!("{}_{}{}", canonical_key(key), timestamp, BACKUP_SUFFIX);
        fs::copy(path, dir.join(&backup_name))?;
        debug!(key, backup = %backup_name, "snapshotted previous value");
        self.prune_backups(key)?;
        Ok(())
    }

    fn prune_backups(&self, key: &str) -> Result<()> {
        let backups = self.list_backups(key)?;
        if backups.len() <= self.retention {
            return Ok(());
        }
        for entry in backups.iter().skip(self.retention) {
            let path = self.backup_path(key, entry);
            let _ = fs::remove_file(path);
        }
        info!(
            key,
            pruned = backups.len() - self.retention,
            "pruned old backups"
        );
        Ok(())
    }
}

impl KeyValueStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key);
        self.backup_existing_file(key, &path)?;
        write_atomic(&path, value)?;
        debug!(key, bytes = value.len(), "wrote record");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.record_path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(key, "deleted record");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        if !self.records_dir.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.records_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let stem = match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            if stem.starts_with(prefix) {
                keys.push(stem);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Maps a key to a safe file stem. Keys in the fixed layout are already
/// filesystem-safe; anything else must not escape the records directory.
fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '.' | '_' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "record".into()
    } else {
        sanitized
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(BACKUP_SUFFIX)?;
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 3 {
        return None;
    }
    let date_part = parts.get(parts.len() - 2)?;
    let time_part = parts.last()?;
    if !is_digits(date_part, 8) || !is_digits(time_part, 4) {
        return None;
    }
    let raw = format!("{}{}", date_part, time_part);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes through a temp file and renames over the target, so a failed
/// write never clobbers the previous value.
pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::new(Some(temp.path().to_path_buf()), Some(3)).expect("json store");
        (store, temp)
    }

    #[test]
    fn get_returns_none_for_missing_key() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.get("monthlyData-2024-7").expect("get").is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let (store, _guard) = store_with_temp_dir();
        store
            .set("monthlyData-2024-7", r#"{"year":2024,"month":7}"#)
            .expect("set");
        let value = store.get("monthlyData-2024-7").expect("get");
        assert_eq!(value.as_deref(), Some(r#"{"year":2024,"month":7}"#));
    }

    #[test]
    fn delete_is_silent_for_missing_key() {
        let (store, _guard) = store_with_temp_dir();
        store.delete("monthlyData-1999-1").expect("delete");
    }

    #[test]
    fn list_keys_filters_by_prefix() {
        let (store, _guard) = store_with_temp_dir();
        store.set("monthlyData-2024-7", "{}").expect("set");
        store.set("monthlyData-2023-12", "{}").expect("set");
        store.set("fixedExpenseTemplates", "[]").expect("set");
        let keys = store.list_keys("monthlyData-").expect("list");
        assert_eq!(keys.len(), 2);
        assert!(keys.iter().all(|k| k.starts_with("monthlyData-")));
    }

    #[test]
    fn overwrite_creates_timestamped_backup() {
        let (store, _guard) = store_with_temp_dir();
        store.set("monthlyData-2024-7", "{\"income\":1}").expect("first set");
        store.set("monthlyData-2024-7", "{\"income\":2}").expect("second set");
        let backups = store.list_backups("monthlyData-2024-7").expect("list backups");
        assert_eq!(backups.len(), 1);
        assert!(backups[0].ends_with(".json.bak"));
    }

    #[test]
    fn retention_prunes_oldest_backups() {
        let (store, _guard) = store_with_temp_dir();
        for round in 0..6 {
            store
                .set("monthlyData-2024-7", &format!("{{\"income\":{round}}}"))
                .expect("set");
        }
        let backups = store.list_backups("monthlyData-2024-7").expect("list backups");
        assert!(backups.len() <= 3, "retention of 3 exceeded: {backups:?}");
    }

    #[test]
    fn keys_with_unsafe_characters_stay_in_records_dir() {
        let (store, _guard) = store_with_temp_dir();
        store.set("../escape", "{}").expect("set");
        let path = store.record_path("../escape");
        assert!(path.starts_with(store.base_dir()));
    }
}
