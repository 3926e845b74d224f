//! Typed attribute slots and property accessors.
//!
//! A [`TypedSlot`] is a self-validating value container bound to one field:
//! every write is checked against the declared [`ValueType`], and a rejected
//! write leaves the previous value untouched. [`typed_property`] builds the
//! equivalent get/set accessor pair over a private backing field on an
//! [`Instance`]; the two are interchangeable for testing purposes.

use strake_core::value::{Value, ValueType};
use strake_core::violation::Violation;

use crate::descriptor::Instance;

/// A typed, self-validating value container bound to one field.
///
/// A slot is created before it is bound to a name, so the engine assigns the
/// field name when the declaring type is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedSlot {
    expected: ValueType,
    name: Option<String>,
    value: Option<Value>,
}

impl TypedSlot {
    pub fn new(expected: ValueType) -> Self {
        TypedSlot {
            expected,
            name: None,
            value: None,
        }
    }

    /// Pre-bound integer slot.
    pub fn integer() -> Self {
        Self::new(ValueType::Int)
    }

    /// Pre-bound floating-point slot.
    pub fn float() -> Self {
        Self::new(ValueType::Float)
    }

    /// Pre-bound string slot.
    pub fn string() -> Self {
        Self::new(ValueType::Str)
    }

    pub fn expected(&self) -> ValueType {
        self.expected
    }

    /// The field name this slot is bound to, once a declaration accepts it.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Last accepted value, or `None` while unset.
    pub fn get(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Validate and store a value. On mismatch the write is rejected and the
    /// previous value (if any) is retained.
    pub fn set(&mut self, value: Value) -> Result<(), Violation> {
        let attribute = self.name.clone().unwrap_or_else(|| "<unbound>".to_string());
        self.check(&attribute, &value)?;
        self.value = Some(value);
        Ok(())
    }

    /// Validate a candidate value for this slot without storing it. Used by
    /// [`Instance::set`] for slot-backed fields.
    pub fn check(&self, attribute: &str, value: &Value) -> Result<(), Violation> {
        if !self.expected.check(value) {
            return Err(Violation::ExpectedType {
                attribute: attribute.to_string(),
                expected: self.expected,
            });
        }
        Ok(())
    }
}

/// A get/set accessor pair over a private-prefixed backing field.
#[derive(Debug, Clone)]
pub struct TypedProperty {
    name: String,
    backing: String,
    expected: ValueType,
}

/// Build a typed property: get reads the `_name` backing field, set
/// validates against `expected` before storing to it.
pub fn typed_property(name: &str, expected: ValueType) -> TypedProperty {
    TypedProperty {
        name: name.to_string(),
        backing: format!("_{}", name),
        expected,
    }
}

impl TypedProperty {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expected(&self) -> ValueType {
        self.expected
    }

    /// Read the backing field.
    pub fn get(&self, instance: &Instance) -> Option<Value> {
        instance.get(&self.backing)
    }

    /// Validate and store to the backing field. Identical semantics to a
    /// slot write: a rejected value is never stored.
    pub fn set(&self, instance: &Instance, value: Value) -> Result<(), Violation> {
        if !self.expected.check(&value) {
            return Err(Violation::ExpectedType {
                attribute: self.name.clone(),
                expected: self.expected,
            });
        }
        instance.set(&self.backing, value)
    }
}

#[cfg(test)]
#[path = "slots_tests.rs"]
mod tests;
