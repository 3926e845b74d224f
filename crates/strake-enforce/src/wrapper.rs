//! Argument enforcement wrapper.
//!
//! Wraps a callable so a caller-declared subset of its parameters is
//! type-checked before delegation. The covered set is fixed at wrap time
//! from the declared expectations; parameters outside it pass through
//! unchecked. Every covered check runs before the wrapped callable
//! executes, so a violating call produces no partial side effects.

use std::collections::BTreeMap;
use std::sync::Arc;

use strake_core::signature::Signature;
use strake_core::value::{Value, ValueType};
use strake_core::violation::Violation;

use crate::types::BoundArgs;

type WrappedFn = Arc<dyn Fn(&BoundArgs) -> Result<Value, Violation> + Send + Sync>;

/// A callable with declaration-bound argument type checks.
pub struct EnforcedFn {
    signature: Signature,
    covered: BTreeMap<String, ValueType>,
    inner: WrappedFn,
}

/// Wrap `f` with type expectations for a subset of its parameters.
///
/// Expectations are given by position and/or by name and are bound to
/// parameter names once, here: an expectation that names no declared
/// parameter fails at wrap time, not at call time.
pub fn enforce_args<F>(
    signature: Signature,
    positional: &[ValueType],
    named: &BTreeMap<String, ValueType>,
    f: F,
) -> Result<EnforcedFn, Violation>
where
    F: Fn(&BoundArgs) -> Result<Value, Violation> + Send + Sync + 'static,
{
    let covered = signature.bind_partial(positional, named)?;
    Ok(EnforcedFn {
        signature,
        covered,
        inner: Arc::new(f),
    })
}

impl EnforcedFn {
    /// Invoke with positional arguments only.
    pub fn call(&self, args: &[Value]) -> Result<Value, Violation> {
        self.call_with(args, &BTreeMap::new())
    }

    /// Invoke with positional and keyword arguments.
    ///
    /// Binds the actual arguments to parameter names, checks every covered
    /// parameter in declaration order, then delegates and returns the
    /// callee's result unchanged.
    pub fn call_with(&self, args: &[Value], kwargs: &BoundArgs) -> Result<Value, Violation> {
        let mut bound = self.signature.bind(args, kwargs)?;

        for param in &self.signature.params {
            let (Some(expected), Some(value)) =
                (self.covered.get(&param.name), bound.get(&param.name))
            else {
                continue;
            };
            if !expected.check(value) {
                return Err(Violation::ArgumentTypeMismatch {
                    parameter: param.name.clone(),
                    expected: *expected,
                });
            }
        }

        self.signature.apply_defaults(&mut bound);
        (self.inner)(&bound)
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The parameter-to-type map fixed at wrap time.
    pub fn covered(&self) -> &BTreeMap<String, ValueType> {
        &self.covered
    }
}

impl std::fmt::Debug for EnforcedFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnforcedFn")
            .field("signature", &self.signature)
            .field("covered", &self.covered)
            .finish()
    }
}

#[cfg(test)]
#[path = "wrapper_tests.rs"]
mod tests;
