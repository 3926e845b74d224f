//! Instantiation-time behavior: abstract completeness and singletons.

use std::sync::Arc;

use strake_core::signature::Signature;
use strake_core::value::Value;
use strake_enforce::{Enforcer, Method, TypeSpec, TypedSlot};

#[test]
fn abstract_type_rejects_instantiation_until_overridden() {
    let enforcer = Enforcer::new();
    let maker = enforcer
        .define(
            TypeSpec::new("Maker")
                .method("make", Method::abstract_method(Signature::of(["self"]))),
        )
        .unwrap();

    let err = maker.instantiate(&[]).unwrap_err();
    assert_eq!(err.code(), "E005");
    assert!(err.to_string().contains("make"));

    let concrete = enforcer
        .define(
            TypeSpec::new("ConcreteMaker")
                .parent(maker)
                .method("make", Method::new(Signature::of(["self"]))),
        )
        .unwrap();
    assert!(concrete.instantiate(&[]).is_ok());
}

#[test]
fn singleton_construction_caches_first_instance() {
    let enforcer = Enforcer::new();
    let settings = enforcer
        .define(
            TypeSpec::new("Settings")
                .slot("mode", TypedSlot::string())
                .method(
                    "init",
                    Method::with_body(Signature::of(["mode"]), |instance, bound| {
                        instance.set("mode", bound["mode"].clone())?;
                        Ok(Value::Null)
                    }),
                )
                .singleton(),
        )
        .unwrap();

    let first = settings.instantiate(&[Value::from("fast")]).unwrap();
    let second = settings.instantiate(&[Value::from("slow")]).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.get("mode"), Some(Value::from("fast")));
}

#[test]
fn singleton_races_resolve_to_one_instance() {
    let enforcer = Enforcer::new();
    let cache = enforcer
        .define(TypeSpec::new("Cache").singleton())
        .unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let descriptor = cache.clone();
            std::thread::spawn(move || descriptor.instantiate(&[]).unwrap())
        })
        .collect();

    let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(instances
        .windows(2)
        .all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn abstract_singleton_never_caches_a_failure() {
    let enforcer = Enforcer::new();
    let ghost = enforcer
        .define(
            TypeSpec::new("Ghost")
                .method("haunt", Method::abstract_method(Signature::of(["self"])))
                .singleton(),
        )
        .unwrap();

    assert!(ghost.instantiate(&[]).is_err());
    assert!(ghost.instantiate(&[]).is_err(), "still fails on retry");

    // A concrete subclass of the singleton type instantiates normally.
    let solid = enforcer
        .define(
            TypeSpec::new("Solid")
                .parent(ghost)
                .method("haunt", Method::new(Signature::of(["self"]))),
        )
        .unwrap();
    assert!(solid.instantiate(&[]).is_ok());
}

#[test]
fn frozen_type_rejects_reassignment_after_construction() {
    let enforcer = Enforcer::new();
    let bio = enforcer
        .define(
            TypeSpec::new("Bio")
                .constant("name", "Luke")
                .constant("company", "Cisco")
                .frozen(),
        )
        .unwrap();

    let instance = bio.instantiate(&[]).unwrap();
    assert_eq!(instance.get("name"), Some(Value::from("Luke")));

    let err = instance.set("name", Value::from("Amir")).unwrap_err();
    assert_eq!(err.code(), "E011");
    assert!(err.to_string().contains("cannot assign to field `name`"));
    assert_eq!(instance.get("name"), Some(Value::from("Luke")));
    assert_eq!(instance.get("company"), Some(Value::from("Cisco")));
}

#[test]
fn frozen_constructor_may_initialize_fields() {
    let enforcer = Enforcer::new();
    let account = enforcer
        .define(
            TypeSpec::new("Account")
                .slot("balance", TypedSlot::integer())
                .method(
                    "init",
                    Method::with_body(Signature::of(["balance"]), |instance, bound| {
                        instance.set("balance", bound["balance"].clone())?;
                        Ok(Value::Null)
                    }),
                )
                .frozen(),
        )
        .unwrap();

    let instance = account.instantiate(&[Value::Int(100)]).unwrap();
    assert_eq!(instance.get("balance"), Some(Value::Int(100)));
    assert!(instance.set("balance", Value::Int(200)).is_err());
}

#[test]
fn constructor_failure_is_not_cached_for_singletons() {
    let enforcer = Enforcer::new();
    let strict = enforcer
        .define(
            TypeSpec::new("Strict")
                .slot("level", TypedSlot::integer())
                .method(
                    "init",
                    Method::with_body(Signature::of(["level"]), |instance, bound| {
                        instance.set("level", bound["level"].clone())?;
                        Ok(Value::Null)
                    }),
                )
                .singleton(),
        )
        .unwrap();

    // First attempt violates the slot type and fails; nothing is cached.
    assert!(strict.instantiate(&[Value::from("high")]).is_err());

    // Second attempt with a valid argument succeeds and becomes the cached one.
    let ok = strict.instantiate(&[Value::Int(3)]).unwrap();
    let again = strict.instantiate(&[Value::Int(9)]).unwrap();
    assert!(Arc::ptr_eq(&ok, &again));
    assert_eq!(again.get("level"), Some(Value::Int(3)));
}
