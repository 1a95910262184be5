//! Call-time override routing.
//!
//! Flat keys use the `__` delimiter to reach into nested factories:
//! `pet__name` routes a `name` override to the factory owning `pet`. The
//! flat form is parsed once into a recursive [`Overrides`] tree and passed
//! down typed; nested factories never re-parse keys.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::generators::Gen;
use crate::value::Value;

/// Call-time override for a single field.
#[derive(Debug)]
pub enum Override {
    /// Replace (or introduce) the field outright.
    Set(Value),
    /// Draw one value per produced record from this generator.
    Draw(Gen),
    /// Remove the field if present; silent no-op when absent.
    Delete,
    /// Route to the nested factory owning the field.
    Nested(Overrides),
}

impl Override {
    pub fn set(value: impl Into<Value>) -> Self {
        Override::Set(value.into())
    }

    pub fn draw(generator: Gen) -> Self {
        Override::Draw(generator)
    }

    pub fn delete() -> Self {
        Override::Delete
    }

    fn is_direct(&self) -> bool {
        !matches!(self, Override::Nested(_))
    }
}

/// Structured override set for one factory call.
///
/// Built with the typed builder (last call per field wins) or parsed from
/// flat delimiter-keyed pairs with [`Overrides::parse`].
#[derive(Debug, Default)]
pub struct Overrides {
    entries: BTreeMap<String, Override>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace (or introduce) `name` outright.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(name.into(), Override::Set(value.into()));
        self
    }

    /// Draw `name` from `generator`, one value per produced record.
    pub fn draw(mut self, name: impl Into<String>, generator: Gen) -> Self {
        self.entries.insert(name.into(), Override::Draw(generator));
        self
    }

    /// Remove `name` from the produced record.
    pub fn delete(mut self, name: impl Into<String>) -> Self {
        self.entries.insert(name.into(), Override::Delete);
        self
    }

    /// Route `inner` to the nested factory owning `name`.
    pub fn nest(mut self, name: impl Into<String>, inner: Overrides) -> Self {
        self.entries.insert(name.into(), Override::Nested(inner));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a structured set from flat delimiter-keyed pairs.
    ///
    /// A key containing `__` splits at the first occurrence into
    /// `(owner, rest)` and recurses; a key without it is a direct entry.
    /// A direct key colliding with another key's derived owner (`pet` next
    /// to `pet__name`) fails with [`Error::OverrideConflict`] regardless of
    /// pair order, before any field is resolved.
    pub fn parse<K, I>(pairs: I) -> Result<Self>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Override)>,
    {
        let mut direct: BTreeMap<String, Override> = BTreeMap::new();
        let mut scoped: BTreeMap<String, Vec<(String, Override)>> = BTreeMap::new();

        for (key, entry) in pairs {
            let key = key.as_ref();
            match key.split_once("__") {
                Some((owner, rest)) if !owner.is_empty() && !rest.is_empty() => {
                    scoped
                        .entry(owner.to_string())
                        .or_default()
                        .push((rest.to_string(), entry));
                }
                _ => {
                    direct.insert(key.to_string(), entry);
                }
            }
        }

        for owner in scoped.keys() {
            if direct.contains_key(owner) {
                return Err(Error::OverrideConflict(owner.clone()));
            }
        }

        let mut entries = direct;
        for (owner, pairs) in scoped {
            entries.insert(owner, Override::Nested(Overrides::parse(pairs)?));
        }

        Ok(Overrides { entries })
    }

    pub(crate) fn claims_direct(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(Override::is_direct)
    }

    pub(crate) fn nested_mut(&mut self, name: &str) -> Option<&mut Overrides> {
        match self.entries.get_mut(name) {
            Some(Override::Nested(inner)) => Some(inner),
            _ => None,
        }
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&String, &Override)> {
        self.entries.iter()
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = (&String, &mut Override)> {
        self.entries.iter_mut()
    }
}
