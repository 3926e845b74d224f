//! Typed slots, typed properties, and the order record.

use strake_core::value::{Value, ValueType};
use strake_enforce::{typed_property, Enforcer, TypeSpec, TypedSlot};

#[test]
fn typed_int_slot_accepts_int_rejects_str() {
    let mut slot = TypedSlot::new(ValueType::Int);
    slot.set(Value::Int(10)).unwrap();
    assert_eq!(slot.get(), Some(&Value::Int(10)));

    let err = slot.set(Value::from("10")).unwrap_err();
    assert_eq!(err.code(), "E006");
    assert_eq!(slot.get(), Some(&Value::Int(10)), "prior value unchanged");
}

#[test]
fn order_record_matches_declaration_order() {
    let enforcer = Enforcer::new();
    let stock = enforcer
        .define(
            TypeSpec::new("Stock")
                .slot("name", TypedSlot::string())
                .slot("shares", TypedSlot::integer())
                .slot("price", TypedSlot::float()),
        )
        .unwrap();
    assert_eq!(stock.slot_order(), ["name", "shares", "price"]);
}

#[test]
fn order_record_is_subtype_agnostic() {
    // Same field names, different slot subtypes: identical order record.
    let enforcer = Enforcer::new();
    let variant = enforcer
        .define(
            TypeSpec::new("Variant")
                .slot("name", TypedSlot::integer())
                .slot("shares", TypedSlot::float())
                .slot("price", TypedSlot::string()),
        )
        .unwrap();
    assert_eq!(variant.slot_order(), ["name", "shares", "price"]);
}

#[test]
fn instance_slot_writes_are_validated() {
    let enforcer = Enforcer::new();
    let stock = enforcer
        .define(TypeSpec::new("Stock").slot("shares", TypedSlot::integer()))
        .unwrap();
    let instance = stock.instantiate(&[]).unwrap();

    instance.set("shares", Value::Int(75)).unwrap();
    assert_eq!(instance.get("shares"), Some(Value::Int(75)));

    assert!(instance.set("shares", Value::Float(75.0)).is_err());
    assert_eq!(instance.get("shares"), Some(Value::Int(75)));
}

#[test]
fn inherited_slots_validate_on_child_instances() {
    let enforcer = Enforcer::new();
    let base = enforcer
        .define(TypeSpec::new("Base").slot("count", TypedSlot::integer()))
        .unwrap();
    let child = enforcer
        .define(TypeSpec::new("Child").parent(base))
        .unwrap();
    let instance = child.instantiate(&[]).unwrap();

    assert!(instance.set("count", Value::from("many")).is_err());
    assert!(instance.set("count", Value::Int(3)).is_ok());
}

#[test]
fn typed_property_matches_slot_semantics() {
    let enforcer = Enforcer::new();
    let person = enforcer
        .define(TypeSpec::new("Person").slot("age", TypedSlot::integer()))
        .unwrap();
    let instance = person.instantiate(&[]).unwrap();
    let name = typed_property("name", ValueType::Str);

    name.set(&instance, Value::from("Luke")).unwrap();
    instance.set("age", Value::Int(22)).unwrap();

    assert_eq!(name.get(&instance), Some(Value::from("Luke")));
    assert_eq!(instance.get("age"), Some(Value::Int(22)));

    let prop_err = name.set(&instance, Value::Null).unwrap_err();
    let slot_err = instance.set("age", Value::Null).unwrap_err();
    assert_eq!(prop_err.code(), "E006");
    assert_eq!(slot_err.code(), "E006");

    // Rejected writes changed nothing.
    assert_eq!(name.get(&instance), Some(Value::from("Luke")));
    assert_eq!(instance.get("age"), Some(Value::Int(22)));
}
