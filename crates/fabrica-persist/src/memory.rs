use fabrica_core::Value;
use tracing::debug;

use crate::backend::{Backend, map_fields};
use crate::errors::Result;

/// In-memory reference backend.
///
/// A map record carrying the marker field set to `true` is persistable.
/// Saves assign sequential ids under `id`, keep a copy in save order for
/// inspection, and `link` writes persisted children back onto their parent.
#[derive(Debug)]
pub struct InMemoryBackend {
    marker: String,
    next_id: i64,
    saved: Vec<Value>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::with_marker("persistable")
    }

    pub fn with_marker(marker: impl Into<String>) -> Self {
        InMemoryBackend {
            marker: marker.into(),
            next_id: 1,
            saved: Vec::new(),
        }
    }

    /// Saved records in write order.
    pub fn saved(&self) -> &[Value] {
        &self.saved
    }

    pub fn save_count(&self) -> usize {
        self.saved.len()
    }

    /// The `name` field of every save, in write order.
    pub fn saved_names(&self) -> Vec<String> {
        self.saved
            .iter()
            .filter_map(|record| record.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for InMemoryBackend {
    fn is_persistable(&self, value: &Value) -> bool {
        value
            .get(&self.marker)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn fields_of(&self, record: &Value) -> Vec<(String, Value)> {
        map_fields(record)
    }

    fn save(&mut self, record: Value) -> Result<Value> {
        let mut record = record;
        if let Value::Map(map) = &mut record {
            map.insert("id".to_string(), Value::Int(self.next_id));
            debug!(id = self.next_id, "record saved");
            self.next_id += 1;
        }
        self.saved.push(record.clone());
        Ok(record)
    }

    fn link(&mut self, parent: &mut Value, name: &str, child: Value) {
        if let Value::Map(map) = parent {
            map.insert(name.to_string(), child);
        }
    }
}
