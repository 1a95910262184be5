use fabrica_core::{Factory, Overrides, Value};
use tracing::debug;

use crate::backend::Backend;
use crate::errors::{PersistError, Result};

/// Factory wrapper persisting produced records through a backend.
///
/// `make` builds one record via the ordinary factory protocol and then
/// cascades saves depth-first, child before parent, so backend-assigned
/// child ids exist before the parent referencing them is written. The
/// cascade is not transactional: a failure partway leaves prior writes
/// committed.
pub struct PersistentFactory<B: Backend> {
    factory: Factory,
    backend: B,
}

impl<B: Backend> PersistentFactory<B> {
    pub fn new(factory: Factory, backend: B) -> Self {
        PersistentFactory { factory, backend }
    }

    /// The wrapped factory, for unsaved production.
    pub fn factory_mut(&mut self) -> &mut Factory {
        &mut self.factory
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Build and persist one record.
    pub fn make(&mut self) -> Result<Value> {
        self.make_with(&mut Overrides::new())
    }

    /// Build and persist one record, applying `overrides`.
    ///
    /// Fails with [`PersistError::NotPersistable`] before any backend write
    /// when the root record itself is not persistable; non-persistable
    /// nested values are simply left untouched.
    pub fn make_with(&mut self, overrides: &mut Overrides) -> Result<Value> {
        let record = self.factory.create_with(overrides)?;
        if !self.backend.is_persistable(&record) {
            return Err(PersistError::NotPersistable);
        }
        self.persist(record)
    }

    /// Build and persist `count` records; `count <= 0` yields an empty
    /// vector.
    pub fn make_many(&mut self, count: i64, overrides: &mut Overrides) -> Result<Vec<Value>> {
        let mut records = Vec::new();
        let mut remaining = count;
        while remaining > 0 {
            remaining -= 1;
            records.push(self.make_with(overrides)?);
        }
        Ok(records)
    }

    /// Cascade saves through `record`: persistable children first, then the
    /// record itself.
    ///
    /// Every persisted child is handed to [`Backend::link`] so its saved
    /// form (with any backend-assigned id) can reach the parent before the
    /// parent write.
    pub fn persist(&mut self, mut record: Value) -> Result<Value> {
        for (name, value) in self.backend.fields_of(&record) {
            if self.backend.is_persistable(&value) {
                debug!(field = %name, "persisting nested record");
                let child = self.persist(value)?;
                self.backend.link(&mut record, &name, child);
            }
        }
        self.backend.save(record)
    }
}
