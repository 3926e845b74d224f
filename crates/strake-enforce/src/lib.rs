//! Enforcement engine for strake structural contracts.
//!
//! Validates explicit type declarations against a policy pipeline and
//! produces violations:
//! - E001: bad attribute name (camelCase member, upper-case callable)
//! - E002: bad type name (lowercase-leading or fully lowercase)
//! - E003: duplicate member (same name bound twice in one declaration)
//! - E004: signature mismatch (override differs from the parent's signature)
//! - E005: abstract not overridden (fired at instantiation, not declaration)
//! - E006: expected type (typed slot or property write rejected)
//! - E007: argument type mismatch (covered call argument rejected)
//! - E008: unknown argument (keyword binds to no declared parameter)
//! - E009: missing argument (required parameter received nothing)
//! - E010: arity mismatch (surplus positional arguments)
//! - E011: frozen write (assignment to a frozen instance after construction)
//!
//! The typed attribute layer (slots, properties, argument wrappers) lives
//! here too; it shares the violation taxonomy but never calls into the
//! policy pipeline.

pub mod descriptor;
pub mod engine;
pub mod policies;
pub mod registry;
pub mod slots;
pub mod types;
pub mod wrapper;

pub use descriptor::{Instance, TypeDescriptor};
pub use engine::Enforcer;
pub use policies::{default_policies, Policy};
pub use registry::{SingletonCell, SingletonRegistry};
pub use slots::{typed_property, TypedProperty, TypedSlot};
pub use types::{BoundArgs, Member, Method, MethodBody, TypeSpec};
pub use wrapper::{enforce_args, EnforcedFn};
