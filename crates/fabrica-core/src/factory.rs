//! The factory evaluation engine.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::generators::Gen;
use crate::overrides::{Override, Overrides};
use crate::template::{Attr, Template};
use crate::value::Value;

/// Record constructor: builds the final record from the resolved field set.
pub type Constructor = Box<dyn Fn(BTreeMap<String, Value>) -> Value>;

/// Resolved source for a template field.
#[derive(Debug)]
enum Source {
    Literal(Value),
    Sequence(Gen),
    Factory(Box<Factory>),
}

/// Record factory with resolved defaults.
///
/// Built once from a [`Template`] and reused across calls. Invocation
/// advances shared generator cursors, which is why every producing method
/// takes `&mut self`; sharing an instance across threads requires external
/// synchronization.
pub struct Factory {
    defaults: BTreeMap<String, Source>,
    constructor: Constructor,
}

impl Factory {
    /// Resolve `template` into a factory building map records.
    pub fn new(template: Template) -> Result<Self> {
        Self::from_parts(template, None)
    }

    /// Resolve `template` with `overrides` shadowing its entries.
    ///
    /// Shadowed entries are discarded unevaluated: a shadowed lazy
    /// constructor is never invoked. An [`Attr::Delete`] entry removes the
    /// field permanently.
    pub fn with_overrides(template: Template, overrides: Template) -> Result<Self> {
        Self::from_parts(template, Some(overrides))
    }

    /// Replace the record constructor.
    pub fn with_constructor(
        mut self,
        constructor: impl Fn(BTreeMap<String, Value>) -> Value + 'static,
    ) -> Self {
        self.constructor = Box::new(constructor);
        self
    }

    fn from_parts(template: Template, overrides: Option<Template>) -> Result<Self> {
        let mut merged = template.into_attrs();
        if let Some(overrides) = overrides {
            merged.extend(overrides.into_attrs());
        }

        let mut defaults = BTreeMap::new();
        for (name, attr) in merged {
            let (attr, from_lazy) = match attr {
                Attr::Lazy(lazy) => {
                    let produced = lazy.call().map_err(|reason| Error::InvalidConstructor {
                        field: name.clone(),
                        reason,
                    })?;
                    (produced, true)
                }
                attr => (attr, false),
            };
            match attr {
                Attr::Value(value) => {
                    defaults.insert(name, Source::Literal(value));
                }
                Attr::Sequence(generator) => {
                    defaults.insert(name, Source::Sequence(generator));
                }
                Attr::Factory(template) => {
                    let nested = Factory::new(template)?;
                    defaults.insert(name, Source::Factory(Box::new(nested)));
                }
                Attr::Delete if from_lazy => {
                    return Err(Error::InvalidConstructor {
                        field: name,
                        reason: "produced the delete sentinel".to_string(),
                    });
                }
                Attr::Delete => {}
                Attr::Lazy(_) => {
                    return Err(Error::InvalidConstructor {
                        field: name,
                        reason: "produced another lazy constructor".to_string(),
                    });
                }
            }
        }

        debug!(fields = defaults.len(), "factory constructed");
        Ok(Factory {
            defaults,
            constructor: Box::new(Value::Map),
        })
    }

    /// Produce one record with no overrides.
    pub fn create(&mut self) -> Result<Value> {
        self.create_with(&mut Overrides::new())
    }

    /// Produce one record, applying `overrides`.
    ///
    /// A field claimed by a direct override is never resolved from the
    /// template, so its backing generator keeps its position for future
    /// calls.
    pub fn create_with(&mut self, overrides: &mut Overrides) -> Result<Value> {
        // scoped routing targets must be nested factories; checked before
        // any cursor is advanced
        for (name, entry) in overrides.entries() {
            if matches!(entry, Override::Nested(_))
                && !matches!(self.defaults.get(name), Some(Source::Factory(_)))
            {
                return Err(Error::NotNested(name.clone()));
            }
        }

        let mut fields: BTreeMap<String, Value> = BTreeMap::new();
        for (name, source) in self.defaults.iter_mut() {
            if overrides.claims_direct(name) {
                continue;
            }
            let value = match source {
                Source::Literal(value) => value.clone(),
                Source::Sequence(generator) => generator
                    .produce()
                    .ok_or_else(|| Error::Exhausted(name.clone()))?,
                Source::Factory(nested) => match overrides.nested_mut(name) {
                    Some(inner) => nested.create_with(inner)?,
                    None => nested.create()?,
                },
            };
            fields.insert(name.clone(), value);
        }

        for (name, entry) in overrides.entries_mut() {
            match entry {
                Override::Set(value) => {
                    fields.insert(name.clone(), value.clone());
                }
                Override::Draw(generator) => {
                    let value = generator
                        .produce()
                        .ok_or_else(|| Error::Exhausted(name.clone()))?;
                    fields.insert(name.clone(), value);
                }
                Override::Delete => {
                    fields.remove(name.as_str());
                }
                Override::Nested(_) => {}
            }
        }

        debug!(fields = fields.len(), "record produced");
        Ok((self.constructor)(fields))
    }

    /// Produce `count` records; `count <= 0` yields an empty vector.
    pub fn many(&mut self, count: i64) -> Result<Vec<Value>> {
        self.many_with(count, &mut Overrides::new())
    }

    /// Batch production with a shared override set.
    ///
    /// Draws are sequential through one evaluation: record `i` takes the
    /// `(i + 1)`-th value of every generator-backed field, and `Draw`
    /// overrides advance once per record.
    pub fn many_with(&mut self, count: i64, overrides: &mut Overrides) -> Result<Vec<Value>> {
        let mut records = Vec::new();
        let mut remaining = count;
        while remaining > 0 {
            remaining -= 1;
            records.push(self.create_with(overrides)?);
        }
        Ok(records)
    }

    /// Names of the resolved template fields.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.defaults.keys().map(String::as_str)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
