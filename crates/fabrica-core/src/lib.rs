//! Declarative record factories for test fixtures.
//!
//! Templates declare default field sources (literals, value generators,
//! lazy constructors, nested sub-factories); factories resolve them into
//! records on demand, with per-call overrides and delimiter-routed
//! customization of nested records.

pub mod error;
pub mod factory;
pub mod generators;
pub mod overrides;
pub mod template;
pub mod value;

pub use error::{Error, Result};
pub use factory::{Constructor, Factory};
pub use generators::{Gen, Lazy};
pub use overrides::{Override, Overrides};
pub use template::{Attr, Template};
pub use value::Value;
