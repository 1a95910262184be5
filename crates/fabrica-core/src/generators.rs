//! Value generators and lazy constructors.
//!
//! A [`Gen`] marks a sequence as "successive values for a field" rather than
//! a literal collection value. A [`Lazy`] defers attribute construction to
//! factory instantiation time, so impure state (counters, random streams)
//! is created per factory instance instead of at declaration time.

use std::fmt;

use chrono::{Duration, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::template::Attr;
use crate::value::Value;

/// Single-consumer cursor producing one value per draw.
///
/// The cursor is owned, mutable state: every draw advances it, and a factory
/// holding a `Gen` advances it once per produced record. Wrapping never
/// nests; coercion sites accept an existing `Gen` unchanged. Not
/// thread-safe; single consumer assumed.
pub struct Gen {
    cursor: Box<dyn Iterator<Item = Value>>,
}

impl Gen {
    /// Wrap a sequence of values.
    pub fn new<T, I>(values: I) -> Self
    where
        T: Into<Value> + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_iter(values.into_iter().map(Into::into))
    }

    /// Wrap an arbitrary iterator.
    pub fn from_iter(iter: impl Iterator<Item = Value> + 'static) -> Self {
        Gen {
            cursor: Box::new(iter),
        }
    }

    /// Infinite generator invoking `f` once per draw.
    pub fn from_fn<T: Into<Value>>(mut f: impl FnMut() -> T + 'static) -> Self {
        Self::from_iter(std::iter::repeat_with(move || f().into()))
    }

    /// Draw the next value; `None` once the underlying sequence is
    /// exhausted. The factory engine reports that as
    /// [`Error::Exhausted`](crate::Error::Exhausted) with the field name.
    pub fn produce(&mut self) -> Option<Value> {
        self.cursor.next()
    }
}

impl Iterator for Gen {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.cursor.next()
    }
}

impl fmt::Debug for Gen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Gen(..)")
    }
}

/// Deferred constructor evaluated once per factory instantiation.
pub struct Lazy {
    thunk: Box<dyn FnOnce() -> std::result::Result<Attr, String>>,
}

impl Lazy {
    /// Defer `f` until factory construction time. A produced sequence is
    /// coerced into a generator by the [`Attr`] conversions; a produced
    /// `Gen` passes through unchanged.
    pub fn new<A: Into<Attr>>(f: impl FnOnce() -> A + 'static) -> Self {
        Lazy {
            thunk: Box::new(move || Ok(f().into())),
        }
    }

    /// Defer a thunk that may report a failure. The failure surfaces as
    /// [`Error::InvalidConstructor`](crate::Error::InvalidConstructor) when
    /// the factory is built.
    pub fn fallible<A: Into<Attr>>(
        f: impl FnOnce() -> std::result::Result<A, String> + 'static,
    ) -> Self {
        Lazy {
            thunk: Box::new(move || f().map(Into::into)),
        }
    }

    pub(crate) fn call(self) -> std::result::Result<Attr, String> {
        (self.thunk)()
    }
}

impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lazy(..)")
    }
}

/// Lazy constructor materializing a brand-new generator per factory
/// instance.
///
/// Equivalent to declaring the generator directly, except that iteration
/// state is created at factory construction time, so factories built from
/// re-declared templates never share a cursor.
pub fn fresh<T, I>(make: impl FnOnce() -> I + 'static) -> Lazy
where
    T: Into<Value> + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'static,
{
    Lazy::new(move || Gen::new(make()))
}

/// Infinite arithmetic counter.
pub fn count(start: i64, step: i64) -> Gen {
    let mut current = start;
    Gen::from_fn(move || {
        let value = current;
        current += step;
        value
    })
}

/// Infinite cycling walk over `values`; an empty input exhausts immediately.
pub fn cycle<T, I>(values: I) -> Gen
where
    T: Into<Value>,
    I: IntoIterator<Item = T>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        return Gen::new(Vec::<Value>::new());
    }
    let mut index = 0;
    Gen::from_fn(move || {
        let value = values[index].clone();
        index = (index + 1) % values.len();
        value
    })
}

/// Formatted label sequence counting from zero: `string("user{}")` yields
/// `user0`, `user1`, ...
pub fn string(pattern: &str) -> Gen {
    string_with(pattern, count(0, 1))
}

/// Formatted label sequence over a caller-supplied counter; ends when the
/// counter does.
pub fn string_with(pattern: &str, counter: Gen) -> Gen {
    let pattern = pattern.to_string();
    let mut counter = counter;
    Gen::from_iter(std::iter::from_fn(move || {
        counter
            .produce()
            .map(|value| Value::Text(pattern.replace("{}", &value.to_string())))
    }))
}

/// Uniform random picks from `values`; never exhausts.
pub fn choice<T, I>(values: I) -> Gen
where
    T: Into<Value>,
    I: IntoIterator<Item = T>,
{
    choice_rng(values, ChaCha8Rng::seed_from_u64(rand::random()))
}

/// Seeded variant of [`choice`] for reproducible tests.
pub fn choice_seeded<T, I>(values: I, seed: u64) -> Gen
where
    T: Into<Value>,
    I: IntoIterator<Item = T>,
{
    choice_rng(values, ChaCha8Rng::seed_from_u64(seed))
}

fn choice_rng<T, I>(values: I, mut rng: ChaCha8Rng) -> Gen
where
    T: Into<Value>,
    I: IntoIterator<Item = T>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        return Gen::new(Vec::<Value>::new());
    }
    Gen::from_fn(move || values[rng.random_range(0..values.len())].clone())
}

/// Infinite fresh v4 ids.
pub fn uuids() -> Gen {
    Gen::from_fn(|| Value::Uuid(uuid::Uuid::new_v4().to_string()))
}

/// Successive dates starting at `start`, stepping by `step_days`.
pub fn date_seq(start: NaiveDate, step_days: i64) -> Gen {
    let mut current = start;
    Gen::from_fn(move || {
        let value = current;
        current = current + Duration::days(step_days);
        value
    })
}
