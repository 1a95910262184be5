use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDate;

use fabrica_core::generators::{self, Gen, Lazy};
use fabrica_core::{Error, Factory, Template, Value};

#[test]
fn gen_iterates_over_sequence() {
    let mut generator = Gen::new([1i64, 2]);
    assert_eq!(generator.produce(), Some(Value::Int(1)));
    assert_eq!(generator.produce(), Some(Value::Int(2)));
}

#[test]
fn gen_signals_exhaustion() {
    let mut generator = Gen::new([1i64, 2]);
    generator.produce();
    generator.produce();
    assert_eq!(generator.produce(), None);
}

#[test]
fn gen_from_fn_calls_closure_once_per_draw() {
    let calls = Rc::new(Cell::new(0i64));
    let counter = Rc::clone(&calls);
    let mut generator = Gen::from_fn(move || {
        counter.set(counter.get() + 1);
        counter.get()
    });

    assert_eq!(calls.get(), 0);
    assert_eq!(generator.produce(), Some(Value::Int(1)));
    assert_eq!(calls.get(), 1);
    assert_eq!(generator.produce(), Some(Value::Int(2)));
    assert_eq!(calls.get(), 2);
}

#[test]
fn lazy_is_invoked_at_factory_construction_only() {
    let calls = Rc::new(Cell::new(0i64));
    let counter = Rc::clone(&calls);
    let template = Template::new().lazy(
        "token",
        Lazy::new(move || {
            counter.set(counter.get() + 1);
            42i64
        }),
    );

    assert_eq!(calls.get(), 0);
    let mut factory = Factory::new(template).expect("factory resolves");
    assert_eq!(calls.get(), 1);

    factory.create().expect("record");
    factory.create().expect("record");
    assert_eq!(calls.get(), 1);
}

#[test]
fn lazy_coerces_generators_through_unchanged() {
    let template = Template::new().lazy("n", Lazy::new(|| Gen::new([1i64, 2])));
    let mut factory = Factory::new(template).expect("factory resolves");

    let first = factory.create().expect("record");
    let second = factory.create().expect("record");
    assert_eq!(first.get("n"), Some(&Value::Int(1)));
    assert_eq!(second.get("n"), Some(&Value::Int(2)));
}

#[test]
fn lazy_failure_surfaces_as_invalid_constructor() {
    let template = Template::new().lazy(
        "token",
        Lazy::fallible(|| Err::<Value, String>("no entropy source".to_string())),
    );
    let result = Factory::new(template);
    assert!(matches!(
        result,
        Err(Error::InvalidConstructor { field, .. }) if field == "token"
    ));
}

#[test]
fn fresh_gives_each_factory_its_own_cursor() {
    fn template() -> Template {
        Template::new().lazy("n", generators::fresh(|| vec![1i64, 2]))
    }

    let mut first = Factory::new(template()).expect("factory resolves");
    let mut second = Factory::new(template()).expect("factory resolves");

    assert_eq!(first.create().expect("record").get("n"), Some(&Value::Int(1)));
    assert_eq!(second.create().expect("record").get("n"), Some(&Value::Int(1)));
}

#[test]
fn count_honors_start_and_step() {
    let mut counter = generators::count(42, 3);
    assert_eq!(counter.produce(), Some(Value::Int(42)));
    assert_eq!(counter.produce(), Some(Value::Int(45)));
    assert_eq!(counter.produce(), Some(Value::Int(48)));
}

#[test]
fn cycle_restarts_when_sequence_exhausted() {
    let mut walker = generators::cycle([1i64, 2]);
    assert_eq!(walker.produce(), Some(Value::Int(1)));
    assert_eq!(walker.produce(), Some(Value::Int(2)));
    assert_eq!(walker.produce(), Some(Value::Int(1)));
}

#[test]
fn string_substitutes_successive_counter_values() {
    let mut labels = generators::string("user{}");
    assert_eq!(labels.produce(), Some(Value::Text("user0".to_string())));
    assert_eq!(labels.produce(), Some(Value::Text("user1".to_string())));
}

#[test]
fn string_with_ends_with_its_counter() {
    let mut labels = generators::string_with("n{}", Gen::new([42i64]));
    assert_eq!(labels.produce(), Some(Value::Text("n42".to_string())));
    assert_eq!(labels.produce(), None);
}

#[test]
fn choice_seeded_is_reproducible_and_picks_members() {
    let members = [1i64, 2, 3];
    let mut first = generators::choice_seeded(members, 7);
    let mut second = generators::choice_seeded(members, 7);

    for _ in 0..30 {
        let picked = first.produce().expect("never exhausts");
        assert_eq!(Some(picked.clone()), second.produce());
        assert!(members.iter().any(|m| Value::Int(*m) == picked));
    }
}

#[test]
fn uuids_yield_distinct_wellformed_ids() {
    let mut ids = generators::uuids();
    let first = ids.produce().expect("never exhausts");
    let second = ids.produce().expect("never exhausts");

    assert_ne!(first, second);
    let text = first.as_str().expect("uuid renders as string");
    assert_eq!(text.len(), 36);
    assert_eq!(text.matches('-').count(), 4);
}

#[test]
fn date_seq_steps_by_days() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let mut dates = generators::date_seq(start, 7);
    assert_eq!(dates.produce(), Some(Value::Date(start)));
    assert_eq!(
        dates.produce(),
        Some(Value::Date(
            NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date")
        ))
    );
}
