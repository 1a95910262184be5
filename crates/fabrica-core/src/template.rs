use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::generators::{Gen, Lazy};
use crate::value::Value;

/// Declared source for a single template field.
#[derive(Debug)]
pub enum Attr {
    /// Literal value, cloned into every record.
    Value(Value),
    /// Shared generator; every record draws the next value.
    Sequence(Gen),
    /// Deferred constructor, invoked once at factory construction time.
    Lazy(Lazy),
    /// Nested sub-factory declaration.
    Factory(Template),
    /// Sentinel removing the field from the resolved template.
    Delete,
}

impl From<Value> for Attr {
    fn from(value: Value) -> Self {
        Attr::Value(value)
    }
}

impl From<Gen> for Attr {
    fn from(generator: Gen) -> Self {
        Attr::Sequence(generator)
    }
}

impl From<Template> for Attr {
    fn from(template: Template) -> Self {
        Attr::Factory(template)
    }
}

impl From<bool> for Attr {
    fn from(value: bool) -> Self {
        Attr::Value(value.into())
    }
}

impl From<i32> for Attr {
    fn from(value: i32) -> Self {
        Attr::Value(value.into())
    }
}

impl From<i64> for Attr {
    fn from(value: i64) -> Self {
        Attr::Value(value.into())
    }
}

impl From<f64> for Attr {
    fn from(value: f64) -> Self {
        Attr::Value(value.into())
    }
}

impl From<&str> for Attr {
    fn from(value: &str) -> Self {
        Attr::Value(value.into())
    }
}

impl From<String> for Attr {
    fn from(value: String) -> Self {
        Attr::Value(value.into())
    }
}

impl From<NaiveDate> for Attr {
    fn from(value: NaiveDate) -> Self {
        Attr::Value(value.into())
    }
}

impl From<NaiveDateTime> for Attr {
    fn from(value: NaiveDateTime) -> Self {
        Attr::Value(value.into())
    }
}

/// Field → attribute declaration consumed by
/// [`Factory::new`](crate::Factory::new).
///
/// A template also serves as the construction-time override set: entries of
/// the override template shadow same-named entries of the declared one, and
/// [`Attr::Delete`] removes a field permanently.
#[derive(Debug, Default)]
pub struct Template {
    attrs: BTreeMap<String, Attr>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a literal field.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), Attr::Value(value.into()));
        self
    }

    /// Declare a generator-backed field.
    pub fn sequence(mut self, name: impl Into<String>, generator: Gen) -> Self {
        self.attrs.insert(name.into(), Attr::Sequence(generator));
        self
    }

    /// Declare a lazily constructed field.
    pub fn lazy(mut self, name: impl Into<String>, lazy: Lazy) -> Self {
        self.attrs.insert(name.into(), Attr::Lazy(lazy));
        self
    }

    /// Declare a nested sub-factory field.
    pub fn factory(mut self, name: impl Into<String>, template: Template) -> Self {
        self.attrs.insert(name.into(), Attr::Factory(template));
        self
    }

    /// Mark a field for removal.
    pub fn delete(mut self, name: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), Attr::Delete);
        self
    }

    /// Declare a field from an already-built attribute.
    pub fn attr(mut self, name: impl Into<String>, attr: Attr) -> Self {
        self.attrs.insert(name.into(), attr);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub(crate) fn into_attrs(self) -> BTreeMap<String, Attr> {
        self.attrs
    }
}
