//! Validated type descriptors and their instances.
//!
//! A [`TypeDescriptor`] is the immutable product of a successful
//! [`Enforcer::define`] call: once validation completes, the descriptor is a
//! plain value factory and no structural policy runs again. Abstract
//! completeness, the singleton lifecycle, and instance freezing are the
//! instantiation-time behaviors.
//!
//! [`Enforcer::define`]: crate::engine::Enforcer::define

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use strake_core::config::NamingConfig;
use strake_core::value::Value;
use strake_core::violation::Violation;

use crate::policies::Policy;
use crate::registry::SingletonCell;
use crate::types::{BoundArgs, Member};

/// A validated, immutable type definition.
#[derive(Debug)]
pub struct TypeDescriptor {
    name: String,
    members: BTreeMap<String, Member>,
    /// Declaration order of typed slots (the Order Record).
    slot_order: Vec<String>,
    parent: Option<Arc<TypeDescriptor>>,
    /// The policy set this type was validated under; inherited by children.
    policies: Vec<Policy>,
    /// The naming config the policies ran with; inherited alongside them.
    naming: NamingConfig,
    identity: String,
    singleton: Option<Arc<SingletonCell>>,
    frozen: bool,
}

impl TypeDescriptor {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        members: BTreeMap<String, Member>,
        slot_order: Vec<String>,
        parent: Option<Arc<TypeDescriptor>>,
        policies: Vec<Policy>,
        naming: NamingConfig,
        identity: String,
        singleton: Option<Arc<SingletonCell>>,
        frozen: bool,
    ) -> Self {
        TypeDescriptor {
            name,
            members,
            slot_order,
            parent,
            policies,
            naming,
            identity,
            singleton,
            frozen,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deterministic identity hash of the declared shape.
    pub fn identity_hash(&self) -> &str {
        &self.identity
    }

    /// Declaration order of the typed slots in this type's own body.
    pub fn slot_order(&self) -> &[String] {
        &self.slot_order
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn naming(&self) -> &NamingConfig {
        &self.naming
    }

    pub fn parent(&self) -> Option<&Arc<TypeDescriptor>> {
        self.parent.as_ref()
    }

    pub fn is_singleton(&self) -> bool {
        self.singleton.is_some()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// A member declared directly on this type.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Resolve a member through the parent chain (most-derived wins).
    pub fn resolve(&self, name: &str) -> Option<&Member> {
        self.members
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.resolve(name)))
    }

    fn collect_effective<'a>(&'a self, map: &mut BTreeMap<&'a str, &'a Member>) {
        if let Some(parent) = &self.parent {
            parent.collect_effective(map);
        }
        for (name, member) in &self.members {
            map.insert(name, member);
        }
    }

    /// Abstract members whose most-derived definition is still abstract.
    pub fn unresolved_abstract(&self) -> Vec<String> {
        let mut effective = BTreeMap::new();
        self.collect_effective(&mut effective);
        effective
            .into_iter()
            .filter_map(|(name, member)| match member {
                Member::Method(m) if m.is_abstract => Some(name.to_string()),
                _ => None,
            })
            .collect()
    }

    /// Construct an instance from positional arguments.
    pub fn instantiate(self: &Arc<Self>, args: &[Value]) -> Result<Arc<Instance>, Violation> {
        self.instantiate_with(args, &BTreeMap::new())
    }

    /// Construct an instance from positional and keyword arguments.
    ///
    /// Unresolved abstract members abort construction. For a singleton type
    /// the first call creates and caches; later calls return the cached
    /// instance unchanged, ignoring any new arguments.
    pub fn instantiate_with(
        self: &Arc<Self>,
        args: &[Value],
        kwargs: &BoundArgs,
    ) -> Result<Arc<Instance>, Violation> {
        let unresolved = self.unresolved_abstract();
        if !unresolved.is_empty() {
            return Err(Violation::AbstractNotOverridden {
                type_name: self.name.clone(),
                members: unresolved,
            });
        }

        if let Some(cell) = &self.singleton {
            return cell.get_or_create(|| self.create(args, kwargs));
        }

        Ok(Arc::new(self.create(args, kwargs)?))
    }

    fn create(self: &Arc<Self>, args: &[Value], kwargs: &BoundArgs) -> Result<Instance, Violation> {
        let instance = Instance {
            descriptor: self.clone(),
            fields: Mutex::new(BTreeMap::new()),
            sealed: AtomicBool::new(false),
        };

        match self.resolve("init") {
            Some(Member::Method(init)) => {
                let mut bound = init.signature.bind(args, kwargs)?;
                init.signature.apply_defaults(&mut bound);
                if let Some(body) = &init.body {
                    body(&instance, &bound)?;
                }
            }
            _ => {
                // No constructor declared: arguments have nowhere to go.
                if !args.is_empty() || !kwargs.is_empty() {
                    return Err(Violation::ArityMismatch {
                        expected: 0,
                        given: args.len() + kwargs.len(),
                    });
                }
            }
        }

        if self.frozen {
            instance.sealed.store(true, Ordering::Release);
        }

        Ok(instance)
    }
}

/// A constructed value of a validated type.
///
/// Field state sits behind a mutex so a cached singleton instance can be
/// shared across threads; ordering of concurrent writes to the same field
/// remains the caller's responsibility.
#[derive(Debug)]
pub struct Instance {
    descriptor: Arc<TypeDescriptor>,
    fields: Mutex<BTreeMap<String, Value>>,
    /// Set once construction of a frozen type completes; never cleared.
    sealed: AtomicBool,
}

impl Instance {
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    pub fn type_name(&self) -> &str {
        self.descriptor.name()
    }

    /// Read a field. Falls back to a declared constant when no instance
    /// field shadows it; unset slots read as `None`.
    pub fn get(&self, name: &str) -> Option<Value> {
        let fields = self.fields.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = fields.get(name) {
            return Some(value.clone());
        }
        drop(fields);
        match self.descriptor.resolve(name) {
            Some(Member::Const(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Write a field. A name backed by a typed slot validates against the
    /// slot's expected type; on mismatch the write is rejected and the
    /// previous value (if any) is retained. Other names store unchecked.
    /// On a frozen instance every write outside the constructor is rejected.
    pub fn set(&self, name: &str, value: Value) -> Result<(), Violation> {
        if self.sealed.load(Ordering::Acquire) {
            return Err(Violation::FrozenWrite {
                type_name: self.descriptor.name().to_string(),
                attribute: name.to_string(),
            });
        }
        if let Some(Member::Slot(slot)) = self.descriptor.resolve(name) {
            slot.check(name, &value)?;
        }
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
