use tracing::{info, warn};

use crate::domain::{MonthKey, MonthlyRecord, CURRENT_SCHEMA_VERSION};
use crate::errors::LedgerError;
use crate::storage::KeyValueStore;

/// Outcome of opening a month: whether a stored record existed and any
/// warnings raised while decoding it.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub key: MonthKey,
    pub existed: bool,
    pub warnings: Vec<String>,
}

/// Facade that coordinates the selected month, its dirty state, and the
/// injected key-value store.
///
/// There is always a selected month; the manager starts on the current
/// calendar month. Selecting another month replaces the in-memory record
/// and silently discards unsaved edits; the dirty flag is cleared by
/// `save`, `open`, navigation, and deletion of the selected month, and by
/// nothing else.
pub struct RecordManager {
    current: MonthlyRecord,
    dirty: bool,
    storage: Box<dyn KeyValueStore>,
}

impl RecordManager {
    /// Manager positioned on the current calendar month. The stored
    /// record is not read until `open` runs; the in-memory record starts
    /// from the seeded default.
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            current: MonthlyRecord::seeded(MonthKey::current()),
            dirty: false,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn current(&self) -> &MonthlyRecord {
        &self.current
    }

    pub fn selected_key(&self) -> MonthKey {
        self.current.key()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Runs a mutation against the selected record and marks it dirty.
    pub fn with_record_mut<T>(&mut self, f: impl FnOnce(&mut MonthlyRecord) -> T) -> T {
        let out = f(&mut self.current);
        self.dirty = true;
        out
    }

    /// Fallible mutation; the dirty flag is only set when the closure
    /// succeeds, so a rejected edit does not look like an unsaved change.
    pub fn try_with_record_mut<T, E>(
        &mut self,
        f: impl FnOnce(&mut MonthlyRecord) -> Result<T, E>,
    ) -> Result<T, E> {
        let out = f(&mut self.current);
        if out.is_ok() {
            self.dirty = true;
        }
        out
    }

    /// Selects a month. A missing or unreadable stored record falls back
    /// to the seeded default; a record with a newer schema version is
    /// refused and the previous selection stays in place.
    pub fn open(&mut self, key: MonthKey) -> Result<LoadOutcome, LedgerError> {
        let raw = self.storage.get(&key.storage_key())?;
        let (record, existed, warnings) = match raw {
            None => (MonthlyRecord::seeded(key), false, Vec::new()),
            Some(data) => match serde_json::from_str::<MonthlyRecord>(&data) {
                Ok(record) => {
                    ensure_schema_support(record.schema_version)?;
                    let warnings = record_warnings(&record);
                    (record, true, warnings)
                }
                Err(err) => {
                    warn!(month = %key, error = %err, "stored record unreadable; starting from defaults");
                    let note = format!(
                        "stored record for {} could not be read; starting from defaults",
                        key
                    );
                    (MonthlyRecord::seeded(key), false, vec![note])
                }
            },
        };
        self.current = record;
        self.dirty = false;
        info!(month = %key, existed, "opened month");
        Ok(LoadOutcome {
            key,
            existed,
            warnings,
        })
    }

    /// Persists the selected record and clears the dirty flag.
    pub fn save(&mut self) -> Result<MonthKey, LedgerError> {
        let key = self.current.key();
        let json = serde_json::to_string_pretty(&self.current)?;
        self.storage.set(&key.storage_key(), &json)?;
        self.dirty = false;
        info!(month = %key, "saved month");
        Ok(key)
    }

    /// Removes the stored record. When the deleted month is the selected
    /// one, the in-memory record resets to the seeded default.
    pub fn delete(&mut self, key: MonthKey) -> Result<(), LedgerError> {
        self.storage.delete(&key.storage_key())?;
        if key == self.current.key() {
            self.current = MonthlyRecord::seeded(key);
            self.dirty = false;
        }
        info!(month = %key, "deleted month");
        Ok(())
    }

    pub fn next_month(&mut self) -> Result<LoadOutcome, LedgerError> {
        let target = self.current.key().next();
        self.open(target)
    }

    pub fn prev_month(&mut self) -> Result<LoadOutcome, LedgerError> {
        let target = self.current.key().prev();
        self.open(target)
    }
}

fn ensure_schema_support(schema_version: u8) -> Result<(), LedgerError> {
    if schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::UnsupportedSchema {
            found: schema_version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    Ok(())
}

/// Non-fatal integrity findings on a decoded record.
pub fn record_warnings(record: &MonthlyRecord) -> Vec<String> {
    let mut warnings = Vec::new();
    if !(1..=12).contains(&record.month) {
        warnings.push(format!("record month {} is out of range", record.month));
    }
    check_duplicate_ids(
        &mut warnings,
        "commission income",
        record.commission_incomes.iter().map(|item| item.id),
    );
    check_duplicate_ids(
        &mut warnings,
        "fixed expense",
        record.fixed_expenses.iter().map(|item| item.id),
    );
    check_duplicate_ids(
        &mut warnings,
        "variable expense",
        record.variable_expenses.iter().map(|item| item.id),
    );
    check_duplicate_ids(&mut warnings, "tax", record.taxes.iter().map(|item| item.id));
    check_duplicate_ids(
        &mut warnings,
        "operational expense",
        record.operational_expenses.iter().map(|item| item.id),
    );
    for tax in &record.taxes {
        if let Some(quarter) = tax.quarter {
            if !(1..=4).contains(&quarter) {
                warnings.push(format!("tax `{}` has quarter {} out of range", tax.name, quarter));
            }
        }
    }
    warnings
}

fn check_duplicate_ids(
    warnings: &mut Vec<String>,
    label: &str,
    ids: impl Iterator<Item = uuid::Uuid>,
) {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            warnings.push(format!("duplicate {label} id {id}"));
        }
    }
}
