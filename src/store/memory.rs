use super::{SettingsStore, Value};
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory settings store, used when nothing needs to survive the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    sections: Mutex<HashMap<String, HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding, e.g. `MemoryStore::new().with("enabled", true, "login")`
    pub fn with(self, key: &str, value: impl Into<Value>, section: &str) -> Self {
        self.update(key, value.into(), section);
        self
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self, key: &str, section: &str) -> Option<Value> {
        self.sections
            .lock()
            .get(section)
            .and_then(|entries| entries.get(key))
            .cloned()
    }

    fn update(&self, key: &str, value: Value, section: &str) {
        log::debug!("[{}] {} = {}", section, key, value);
        self.sections
            .lock()
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }
}
