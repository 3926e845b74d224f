//! Violation taxonomy for strake enforcement.
//!
//! Every failure in the framework is one of these variants. All violations
//! are immediate, synchronous, and abort the operation that triggered them:
//! type construction, a slot write, or a wrapped call. The framework never
//! logs; surfacing a violation is the caller's choice.
//!
//! - E001: bad_attribute_name (member name fails the naming convention)
//! - E002: bad_type_name (type name fails the convention)
//! - E003: duplicate_member (same name bound twice in one declaration)
//! - E004: signature_mismatch (override signature differs from parent)
//! - E005: abstract_not_overridden (instantiation with unresolved abstracts)
//! - E006: expected_type (slot/property write violates the declared type)
//! - E007: argument_type_mismatch (covered call argument violates its type)
//! - E008: unknown_argument (argument binds to no declared parameter)
//! - E009: missing_argument (required parameter received no argument)
//! - E010: arity_mismatch (more positional arguments than parameters)
//! - E011: frozen_write (assignment to a frozen instance after construction)

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::signature::Signature;
use crate::value::ValueType;

/// A typed enforcement failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error(
        "bad attribute name `{type_name}.{member}`: consider lowercase `{}`",
        .member.to_lowercase()
    )]
    BadAttributeName { type_name: String, member: String },

    #[error("type name `{type_name}` must not start lowercase or be entirely lowercase")]
    BadTypeName { type_name: String },

    #[error("duplicate member `{member}` in `{type_name}`")]
    DuplicateMember { member: String, type_name: String },

    #[error("signature mismatch in `{type_name}`: {previous} != {current}")]
    SignatureMismatch {
        type_name: String,
        previous: Signature,
        current: Signature,
    },

    #[error(
        "cannot instantiate `{type_name}`: abstract members not overridden: {}",
        .members.join(", ")
    )]
    AbstractNotOverridden {
        type_name: String,
        members: Vec<String>,
    },

    #[error("expected `{expected}` for attribute `{attribute}`")]
    ExpectedType {
        attribute: String,
        expected: ValueType,
    },

    #[error("argument `{parameter}` must be `{expected}`")]
    ArgumentTypeMismatch {
        parameter: String,
        expected: ValueType,
    },

    #[error("argument `{parameter}` does not bind to a declared parameter")]
    UnknownArgument { parameter: String },

    #[error("missing required argument `{parameter}`")]
    MissingArgument { parameter: String },

    #[error("too many positional arguments: expected at most {expected}, got {given}")]
    ArityMismatch { expected: usize, given: usize },

    #[error("cannot assign to field `{attribute}` of frozen `{type_name}`")]
    FrozenWrite {
        type_name: String,
        attribute: String,
    },
}

impl Violation {
    /// Stable error code for this violation kind.
    pub fn code(&self) -> &'static str {
        match self {
            Violation::BadAttributeName { .. } => "E001",
            Violation::BadTypeName { .. } => "E002",
            Violation::DuplicateMember { .. } => "E003",
            Violation::SignatureMismatch { .. } => "E004",
            Violation::AbstractNotOverridden { .. } => "E005",
            Violation::ExpectedType { .. } => "E006",
            Violation::ArgumentTypeMismatch { .. } => "E007",
            Violation::UnknownArgument { .. } => "E008",
            Violation::MissingArgument { .. } => "E009",
            Violation::ArityMismatch { .. } => "E010",
            Violation::FrozenWrite { .. } => "E011",
        }
    }

    /// Stable category string for this violation kind.
    pub fn category(&self) -> &'static str {
        match self {
            Violation::BadAttributeName { .. } => "bad_attribute_name",
            Violation::BadTypeName { .. } => "bad_type_name",
            Violation::DuplicateMember { .. } => "duplicate_member",
            Violation::SignatureMismatch { .. } => "signature_mismatch",
            Violation::AbstractNotOverridden { .. } => "abstract_not_overridden",
            Violation::ExpectedType { .. } => "expected_type",
            Violation::ArgumentTypeMismatch { .. } => "argument_type_mismatch",
            Violation::UnknownArgument { .. } => "unknown_argument",
            Violation::MissingArgument { .. } => "missing_argument",
            Violation::ArityMismatch { .. } => "arity_mismatch",
            Violation::FrozenWrite { .. } => "frozen_write",
        }
    }

    /// Build a serializable report for callers that surface violations as JSON.
    pub fn report(&self) -> ViolationReport {
        let (type_name, member) = match self {
            Violation::BadAttributeName { type_name, member } => {
                (Some(type_name.clone()), Some(member.clone()))
            }
            Violation::BadTypeName { type_name } => (Some(type_name.clone()), None),
            Violation::DuplicateMember { member, type_name } => {
                (Some(type_name.clone()), Some(member.clone()))
            }
            Violation::SignatureMismatch { type_name, .. } => (Some(type_name.clone()), None),
            Violation::AbstractNotOverridden { type_name, members } => {
                (Some(type_name.clone()), members.first().cloned())
            }
            Violation::ExpectedType { attribute, .. } => (None, Some(attribute.clone())),
            Violation::ArgumentTypeMismatch { parameter, .. }
            | Violation::UnknownArgument { parameter }
            | Violation::MissingArgument { parameter } => (None, Some(parameter.clone())),
            Violation::ArityMismatch { .. } => (None, None),
            Violation::FrozenWrite {
                type_name,
                attribute,
            } => (Some(type_name.clone()), Some(attribute.clone())),
        };
        ViolationReport {
            code: self.code().to_string(),
            category: self.category().to_string(),
            severity: "ERROR".to_string(),
            message: self.to_string(),
            type_name,
            member,
        }
    }
}

/// Serializable violation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationReport {
    pub code: String,
    pub category: String,
    pub severity: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
}
