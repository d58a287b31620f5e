use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueStore, Result};

/// In-memory store for tests and embedding. Same contract as
/// [`JsonStore`](super::JsonStore), nothing persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("memory store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().expect("memory store poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("memory store poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("memory store poisoned");
        entries.remove(key);
        Ok(())
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let entries = self.entries.lock().expect("memory store poisoned");
        let mut keys: Vec<String> = entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaves_like_a_key_value_store() {
        let store = MemoryStore::new();
        assert!(store.get("monthlyData-2024-7").expect("get").is_none());

        store.set("monthlyData-2024-7", "{}").expect("set");
        store.set("fixedExpenseTemplates", "[]").expect("set");
        assert_eq!(store.len(), 2);

        let months = store.list_keys("monthlyData-").expect("list");
        assert_eq!(months, vec!["monthlyData-2024-7".to_string()]);

        store.delete("monthlyData-2024-7").expect("delete");
        store.delete("monthlyData-2024-7").expect("repeat delete");
        assert!(store.get("monthlyData-2024-7").expect("get").is_none());
    }
}
