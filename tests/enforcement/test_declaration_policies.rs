//! Declaration-time policy behavior through the public API.

use strake_core::signature::{Param, Signature};
use strake_core::violation::Violation;
use strake_enforce::{Enforcer, Method, Policy, TypeSpec, TypedSlot};

fn method(names: &[&str]) -> Method {
    Method::new(Signature::of(names.iter().copied()))
}

#[test]
fn lowercase_type_names_are_rejected() {
    let enforcer = Enforcer::new();
    for name in ["lowercase", "fully_lower", "x"] {
        let err = enforcer.define(TypeSpec::new(name)).unwrap_err();
        assert_eq!(err.code(), "E002", "type name `{}` should be rejected", name);
    }
}

#[test]
fn well_formed_type_names_pass() {
    let enforcer = Enforcer::new();
    for name in ["NoLowerCase", "Stock", "HTTPServer"] {
        assert!(enforcer.define(TypeSpec::new(name)).is_ok());
    }
}

#[test]
fn camel_case_members_are_rejected_snake_case_passes() {
    let enforcer = Enforcer::new();

    let err = enforcer
        .define(TypeSpec::new("Account").method("badName", method(&["self"])))
        .unwrap_err();
    assert_eq!(err.code(), "E001");

    assert!(enforcer
        .define(TypeSpec::new("Account").method("good_name", method(&["self"])))
        .is_ok());
}

#[test]
fn upper_case_constants_pass_upper_case_callables_fail() {
    let enforcer = Enforcer::new();

    assert!(enforcer
        .define(TypeSpec::new("Constant").constant("GOODNAME", "foo"))
        .is_ok());

    let err = enforcer
        .define(TypeSpec::new("ConstantMethod").method("BADNAME", method(&["self"])))
        .unwrap_err();
    assert_eq!(err.code(), "E001");
}

#[test]
fn duplicate_members_rejected_regardless_of_value() {
    let enforcer = Enforcer::new();
    let err = enforcer
        .define(
            TypeSpec::new("Spam")
                .constant("flag", true)
                .constant("flag", true),
        )
        .unwrap_err();
    assert_eq!(
        err,
        Violation::DuplicateMember {
            member: "flag".to_string(),
            type_name: "Spam".to_string(),
        }
    );
}

#[test]
fn override_with_widened_signature_is_rejected() {
    let enforcer = Enforcer::new();
    let base = enforcer
        .define(TypeSpec::new("Base").method("check", method(&["self", "name", "value"])))
        .unwrap();

    let widened = Signature::new(vec![
        Param::required("self"),
        Param::required("name"),
        Param::required("value"),
        Param::with_default("extra", false),
    ]);
    let err = enforcer
        .define(
            TypeSpec::new("Sub")
                .parent(base.clone())
                .method("check", Method::new(widened)),
        )
        .unwrap_err();
    assert_eq!(err.code(), "E004");

    // Identical signature succeeds.
    assert!(enforcer
        .define(
            TypeSpec::new("Sub")
                .parent(base)
                .method("check", method(&["self", "name", "value"])),
        )
        .is_ok());
}

#[test]
fn subset_hook_applies_only_requested_policies() {
    let naming_only = Enforcer::with_policies(vec![Policy::MemberNames]);

    // Type-name and duplicate violations pass through unchecked.
    assert!(naming_only
        .define(
            TypeSpec::new("lower_type")
                .constant("twice", 1i64)
                .constant("twice", 2i64),
        )
        .is_ok());

    // Member naming still enforced.
    assert!(naming_only
        .define(TypeSpec::new("Whatever").method("badName", method(&["self"])))
        .is_err());
}

#[test]
fn descendants_inherit_the_base_composite() {
    let enforcer = Enforcer::new();
    let root = enforcer.define(TypeSpec::new("Root")).unwrap();
    let child = enforcer
        .define(TypeSpec::new("Child").parent(root))
        .unwrap();
    let err = enforcer
        .define(
            TypeSpec::new("GrandChild")
                .parent(child)
                .method("badName", method(&["self"])),
        )
        .unwrap_err();
    assert_eq!(err.code(), "E001");
}

#[test]
fn rejected_declaration_produces_no_usable_type() {
    let enforcer = Enforcer::new();
    let result = enforcer.define(
        TypeSpec::new("Registry")
            .singleton()
            .slot("entries", TypedSlot::integer())
            .method("badName", method(&["self"])),
    );
    assert!(result.is_err());
    assert!(enforcer.registry().is_empty());
}

#[test]
fn violation_reports_serialize_with_stable_codes() {
    let enforcer = Enforcer::new();
    let err = enforcer.define(TypeSpec::new("lowercase")).unwrap_err();
    let report = err.report();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["code"], "E002");
    assert_eq!(json["category"], "bad_type_name");
    assert_eq!(json["severity"], "ERROR");
    assert_eq!(json["type_name"], "lowercase");
}
