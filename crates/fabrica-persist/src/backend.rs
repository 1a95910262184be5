use fabrica_core::Value;

use crate::errors::Result;

/// Capabilities a storage backend supplies to the persistence cascade.
///
/// Injected by value rather than inherited: the cascade only ever calls
/// these four operations and stays otherwise ignorant of the backend.
pub trait Backend {
    /// Whether `value` can be written to this backend.
    fn is_persistable(&self, value: &Value) -> bool;

    /// Sub-attributes of `record` the cascade should inspect for
    /// persistable children.
    fn fields_of(&self, record: &Value) -> Vec<(String, Value)>;

    /// Write `record`, returning the possibly-updated record (e.g. carrying
    /// a backend-assigned id).
    fn save(&mut self, record: Value) -> Result<Value>;

    /// Write a persisted child back onto its parent under `name` before the
    /// parent itself is saved. The default does nothing.
    fn link(&mut self, parent: &mut Value, name: &str, child: Value) {
        let _ = (parent, name, child);
    }
}

/// `fields_of` helper for map records: every entry of the map.
pub fn map_fields(record: &Value) -> Vec<(String, Value)> {
    match record.as_map() {
        Some(map) => map
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
        None => Vec::new(),
    }
}
