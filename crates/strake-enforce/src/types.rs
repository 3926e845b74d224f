//! Candidate type declarations submitted to the enforcement engine.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use strake_core::signature::Signature;
use strake_core::value::Value;
use strake_core::violation::Violation;

use crate::descriptor::{Instance, TypeDescriptor};
use crate::slots::TypedSlot;

/// Call arguments bound to parameter names.
pub type BoundArgs = BTreeMap<String, Value>;

/// Executable body of a concrete method. Receives the instance and the
/// already-bound arguments (defaults applied).
pub type MethodBody = Arc<dyn Fn(&Instance, &BoundArgs) -> Result<Value, Violation> + Send + Sync>;

/// A callable member: captured signature, abstract marker, optional body.
///
/// Signatures are data, captured at registration; the policy engine never
/// reflects over the body.
#[derive(Clone)]
pub struct Method {
    pub signature: Signature,
    pub is_abstract: bool,
    pub body: Option<MethodBody>,
}

impl Method {
    /// A concrete method with no executable body (signature-only).
    pub fn new(signature: Signature) -> Self {
        Method {
            signature,
            is_abstract: false,
            body: None,
        }
    }

    /// A concrete method with an executable body.
    pub fn with_body<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(&Instance, &BoundArgs) -> Result<Value, Violation> + Send + Sync + 'static,
    {
        Method {
            signature,
            is_abstract: false,
            body: Some(Arc::new(body)),
        }
    }

    /// The abstract marker: a member that must be overridden with a concrete
    /// implementation before any carrying type can be instantiated.
    pub fn abstract_method(signature: Signature) -> Self {
        Method {
            signature,
            is_abstract: true,
            body: None,
        }
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("signature", &self.signature)
            .field("is_abstract", &self.is_abstract)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// One declared member of a candidate type.
#[derive(Debug, Clone)]
pub enum Member {
    /// A plain value bound at declaration time (constants included).
    Const(Value),
    /// A typed attribute slot; validated on every instance write.
    Slot(TypedSlot),
    /// A callable member.
    Method(Method),
}

impl Member {
    pub fn is_callable(&self) -> bool {
        matches!(self, Member::Method(_))
    }

    /// Canonical key used for identity hashing: name plus shape.
    pub(crate) fn identity_key(&self, name: &str) -> String {
        match self {
            Member::Const(value) => format!("{}:{}", name, value.value_type()),
            Member::Slot(slot) => format!("{}:slot:{}", name, slot.expected()),
            Member::Method(method) => {
                if method.is_abstract {
                    format!("{}{}:abstract", name, method.signature)
                } else {
                    format!("{}{}", name, method.signature)
                }
            }
        }
    }
}

/// A candidate type declaration: name, ordered members, optional parent.
///
/// The member list preserves declaration order and can hold the same name
/// twice; the duplicate policy reports the second binding. Nothing here is
/// validated until the spec is submitted to [`Enforcer::define`].
///
/// [`Enforcer::define`]: crate::engine::Enforcer::define
#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub name: String,
    pub members: Vec<(String, Member)>,
    pub parent: Option<Arc<TypeDescriptor>>,
    pub singleton: bool,
    pub frozen: bool,
}

impl TypeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        TypeSpec {
            name: name.into(),
            members: Vec::new(),
            parent: None,
            singleton: false,
            frozen: false,
        }
    }

    /// Declare the parent this type derives from. The parent's recorded
    /// policy set is inherited by this declaration.
    pub fn parent(mut self, parent: Arc<TypeDescriptor>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Opt this type into the singleton lifecycle.
    pub fn singleton(mut self) -> Self {
        self.singleton = true;
        self
    }

    /// Freeze instances after construction: the constructor may write
    /// fields, every later assignment is rejected.
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Bind a plain value member.
    pub fn constant(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.members
            .push((name.to_string(), Member::Const(value.into())));
        self
    }

    /// Bind a typed attribute slot. The slot learns its field name when the
    /// declaration is accepted.
    pub fn slot(mut self, name: &str, slot: TypedSlot) -> Self {
        self.members.push((name.to_string(), Member::Slot(slot)));
        self
    }

    /// Bind a callable member.
    pub fn method(mut self, name: &str, method: Method) -> Self {
        self.members
            .push((name.to_string(), Member::Method(method)));
        self
    }
}
