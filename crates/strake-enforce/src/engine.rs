//! The enforcement engine: the one interception point for type construction.
//!
//! Callers build a [`TypeSpec`] and submit it to [`Enforcer::define`]; the
//! engine runs its policy pipeline and either returns a validated
//! [`TypeDescriptor`] or fails with the first [`Violation`]. The engine also
//! owns the singleton registry, handing each opted-in type its per-entry
//! cell at definition time.

use std::collections::BTreeMap;
use std::sync::Arc;

use strake_core::config::StrakeConfig;
use strake_core::hash::identity_hash;
use strake_core::violation::Violation;

use crate::descriptor::TypeDescriptor;
use crate::policies::{self, default_policies, Policy};
use crate::registry::SingletonRegistry;
use crate::types::{Member, TypeSpec};

/// Core policy engine. Owns the singleton registry and orchestrates
/// definition-time validation.
pub struct Enforcer {
    config: StrakeConfig,
    policies: Vec<Policy>,
    registry: SingletonRegistry,
}

impl Enforcer {
    /// An enforcer applying the full default composite: member naming, type
    /// naming, duplicate rejection, and signature matching. Types defined
    /// here pass the set on to every descendant.
    pub fn new() -> Self {
        Self {
            config: StrakeConfig::default(),
            policies: default_policies(),
            registry: SingletonRegistry::new(),
        }
    }

    /// An enforcer configured from a `StrakeConfig` (pipeline built from the
    /// config's policy toggles).
    pub fn with_config(config: StrakeConfig) -> Self {
        let policies = policies::policies_from(&config.policies);
        Self {
            config,
            policies,
            registry: SingletonRegistry::new(),
        }
    }

    /// The lower-level hook: an enforcer applying only the given subset.
    pub fn with_policies(policies: Vec<Policy>) -> Self {
        Self {
            config: StrakeConfig::default(),
            policies,
            registry: SingletonRegistry::new(),
        }
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn registry(&self) -> &SingletonRegistry {
        &self.registry
    }

    /// Validate a candidate declaration and produce a usable type.
    ///
    /// Structural policies run in fixed order and fail fast: on violation
    /// the type never becomes usable and nothing is registered. A child
    /// declaration is validated under its parent's recorded policy set and
    /// naming config, so deriving from a fully checked type keeps the full
    /// composite no matter which enforcer defines the child.
    pub fn define(&self, spec: TypeSpec) -> Result<Arc<TypeDescriptor>, Violation> {
        let (pipeline, naming) = match &spec.parent {
            Some(parent) => (parent.policies().to_vec(), parent.naming().clone()),
            None => (self.policies.clone(), self.config.naming.clone()),
        };

        for policy in &pipeline {
            match policy {
                Policy::MemberNames => policies::check_member_names(&spec, &naming)?,
                Policy::TypeNames => policies::check_type_name(&spec)?,
                Policy::Duplicates => policies::check_duplicates(&spec)?,
                Policy::Signatures => policies::check_signatures(&spec, &naming)?,
            }
        }

        // All policies passed: accept members in declaration order, telling
        // each slot its field name and capturing the Order Record.
        let mut members = BTreeMap::new();
        let mut slot_order = Vec::new();
        let mut member_keys = Vec::with_capacity(spec.members.len());
        for (name, member) in spec.members {
            let member = match member {
                Member::Slot(slot) => {
                    slot_order.push(name.clone());
                    Member::Slot(slot.named(&name))
                }
                other => other,
            };
            member_keys.push(member.identity_key(&name));
            members.insert(name, member);
        }

        let identity = identity_hash(&spec.name, &member_keys);
        let singleton = spec.singleton.then(|| self.registry.entry(&identity));

        Ok(Arc::new(TypeDescriptor::new(
            spec.name,
            members,
            slot_order,
            spec.parent,
            pipeline,
            naming,
            identity,
            singleton,
            spec.frozen,
        )))
    }
}

impl Default for Enforcer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
