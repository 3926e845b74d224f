//! Structural policies applied at type-construction time.
//!
//! Each check is a pure function over a candidate [`TypeSpec`]: it either
//! accepts the declaration or returns the first violation it finds. The
//! engine runs a fixed, deterministic pipeline and fails fast, so a
//! rejected type is never partially registered.

use serde::{Deserialize, Serialize};

use strake_core::config::{NamingConfig, PolicyToggles};
use strake_core::violation::Violation;

use crate::types::{Member, TypeSpec};

/// One structural policy in the construction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    MemberNames,
    TypeNames,
    Duplicates,
    Signatures,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::MemberNames => "member_names",
            Policy::TypeNames => "type_names",
            Policy::Duplicates => "duplicates",
            Policy::Signatures => "signatures",
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The default composite, in pipeline order.
pub fn default_policies() -> Vec<Policy> {
    vec![
        Policy::MemberNames,
        Policy::TypeNames,
        Policy::Duplicates,
        Policy::Signatures,
    ]
}

/// Build a pipeline from config toggles, preserving the default order.
pub fn policies_from(toggles: &PolicyToggles) -> Vec<Policy> {
    let mut pipeline = Vec::new();
    if toggles.member_names {
        pipeline.push(Policy::MemberNames);
    }
    if toggles.type_names {
        pipeline.push(Policy::TypeNames);
    }
    if toggles.duplicates {
        pipeline.push(Policy::Duplicates);
    }
    if toggles.signatures {
        pipeline.push(Policy::Signatures);
    }
    pipeline
}

/// E001: member names must follow the configured convention.
///
/// Default rejects camelCase-shaped names (a lower-case letter immediately
/// followed by an upper-case one) and fully upper-case names bound to
/// callables. Upper-case constants pass unless configured otherwise.
pub fn check_member_names(spec: &TypeSpec, naming: &NamingConfig) -> Result<(), Violation> {
    for (name, member) in &spec.members {
        let upper = is_all_upper(name);
        let bad = (naming.forbid_mixed_case && has_mixed_case(name))
            || (naming.forbid_upper_callables && upper && member.is_callable())
            || (!naming.allow_upper_constants && upper && !member.is_callable());
        if bad {
            return Err(Violation::BadAttributeName {
                type_name: spec.name.clone(),
                member: name.clone(),
            });
        }
    }
    Ok(())
}

/// E002: a type name must not start with a lower-case letter and must not
/// be entirely lower-case.
pub fn check_type_name(spec: &TypeSpec) -> Result<(), Violation> {
    let starts_lower = spec
        .name
        .chars()
        .next()
        .map(|c| c.is_lowercase())
        .unwrap_or(false);
    if starts_lower || is_all_lower(&spec.name) {
        return Err(Violation::BadTypeName {
            type_name: spec.name.clone(),
        });
    }
    Ok(())
}

/// E003: no member name may be bound twice within one declaration body.
/// The violation reports the second binding, regardless of the two values.
pub fn check_duplicates(spec: &TypeSpec) -> Result<(), Violation> {
    let mut seen = std::collections::HashSet::new();
    for (name, _) in &spec.members {
        if !seen.insert(name.as_str()) {
            return Err(Violation::DuplicateMember {
                member: name.clone(),
                type_name: spec.name.clone(),
            });
        }
    }
    Ok(())
}

/// E004: a non-private callable member redefined from the parent chain must
/// carry a structurally identical signature. Members starting with the
/// configured private prefix are exempt.
pub fn check_signatures(spec: &TypeSpec, naming: &NamingConfig) -> Result<(), Violation> {
    let Some(parent) = &spec.parent else {
        return Ok(());
    };
    for (name, member) in &spec.members {
        if name.starts_with(&naming.private_prefix) {
            continue;
        }
        let Member::Method(method) = member else {
            continue;
        };
        if let Some(Member::Method(previous)) = parent.resolve(name) {
            if previous.signature != method.signature {
                return Err(Violation::SignatureMismatch {
                    type_name: format!("{}.{}", spec.name, name),
                    previous: previous.signature.clone(),
                    current: method.signature.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Whether the name contains a lower-case letter immediately followed by an
/// upper-case one (the camelCase shape the convention rejects).
fn has_mixed_case(name: &str) -> bool {
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() && prev_lower {
            return true;
        }
        prev_lower = c.is_lowercase();
    }
    false
}

/// At least one cased character, none of them lower-case.
fn is_all_upper(name: &str) -> bool {
    let mut cased = false;
    for c in name.chars().filter(|c| c.is_alphabetic()) {
        if c.is_lowercase() {
            return false;
        }
        cased = true;
    }
    cased
}

/// At least one cased character, none of them upper-case.
fn is_all_lower(name: &str) -> bool {
    let mut cased = false;
    for c in name.chars().filter(|c| c.is_alphabetic()) {
        if c.is_uppercase() {
            return false;
        }
        cased = true;
    }
    cased
}

#[cfg(test)]
#[path = "policies_tests.rs"]
mod tests;
