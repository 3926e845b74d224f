//! Configuration-driven pipelines end to end.

use std::fs;

use strake_core::config::StrakeConfig;
use strake_core::signature::Signature;
use strake_enforce::{Enforcer, Method, TypeSpec};

#[test]
fn config_file_shapes_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let config = serde_json::json!({
        "version": "0.1.0",
        "policies": { "type_names": false }
    });
    fs::write(dir.path().join("strake.json"), config.to_string()).unwrap();

    let enforcer = Enforcer::with_config(StrakeConfig::load(dir.path()));

    // Type-name policy disabled by config.
    assert!(enforcer.define(TypeSpec::new("lowercase")).is_ok());

    // Member naming still on.
    assert!(enforcer
        .define(
            TypeSpec::new("Still")
                .method("badName", Method::new(Signature::of(["self"])))
        )
        .is_err());
}

#[test]
fn relaxed_naming_pattern_is_configurable() {
    let dir = tempfile::tempdir().unwrap();
    let config = serde_json::json!({
        "version": "0.1.0",
        "naming": { "forbid_mixed_case": false }
    });
    fs::write(dir.path().join("strake.json"), config.to_string()).unwrap();

    let enforcer = Enforcer::with_config(StrakeConfig::load(dir.path()));
    assert!(enforcer
        .define(
            TypeSpec::new("JavaStyle")
                .method("getName", Method::new(Signature::of(["self"])))
        )
        .is_ok());
}

#[test]
fn missing_config_means_full_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let enforcer = Enforcer::with_config(StrakeConfig::load(dir.path()));
    assert!(enforcer.define(TypeSpec::new("lowercase")).is_err());
}
