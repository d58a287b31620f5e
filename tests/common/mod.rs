use std::sync::Mutex;

use office_ledger::{config::ConfigManager, core::RecordManager, storage::JsonStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates isolated managers backed by unique directories for each test.
pub fn setup_test_env() -> (RecordManager, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage =
        JsonStore::new(Some(base.join("store")), Some(3)).expect("create json store backend");
    let record_manager = RecordManager::new(Box::new(storage.clone()));
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");

    (record_manager, config_manager)
}
