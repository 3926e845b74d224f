//! Captured call signatures.
//!
//! Signatures are recorded as data at the point a callable is registered:
//! an ordered list of parameter names with optional defaults and a variadic
//! marker. Comparison is structural, so the signature-match policy needs no
//! reflection over opaque callables. Binding reproduces positional and
//! keyword argument semantics for the argument enforcement wrapper and for
//! constructor dispatch.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;
use crate::violation::Violation;

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub variadic: bool,
}

impl Param {
    /// A required positional-or-keyword parameter.
    pub fn required(name: &str) -> Self {
        Param {
            name: name.to_string(),
            default: None,
            variadic: false,
        }
    }

    /// A parameter with a default value.
    pub fn with_default(name: &str, default: impl Into<Value>) -> Self {
        Param {
            name: name.to_string(),
            default: Some(default.into()),
            variadic: false,
        }
    }

    /// A variadic parameter collecting surplus positional arguments.
    pub fn rest(name: &str) -> Self {
        Param {
            name: name.to_string(),
            default: None,
            variadic: true,
        }
    }
}

/// An ordered, structurally comparable call signature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<Param>,
}

impl Signature {
    pub fn new(params: Vec<Param>) -> Self {
        Signature { params }
    }

    /// Convenience constructor for a signature of required parameters only.
    pub fn of<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Signature {
            params: names.into_iter().map(Param::required).collect(),
        }
    }

    /// Number of non-variadic parameters.
    pub fn positional_count(&self) -> usize {
        self.params.iter().filter(|p| !p.variadic).count()
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Bind actual call arguments to parameter names.
    ///
    /// Defaults are NOT applied here: the result holds only what the caller
    /// actually passed (plus an empty list for an unfed variadic parameter),
    /// so covered-argument checks see actual arguments only. Use
    /// [`Signature::apply_defaults`] before delegating to the callee.
    pub fn bind(
        &self,
        args: &[Value],
        kwargs: &BTreeMap<String, Value>,
    ) -> Result<BTreeMap<String, Value>, Violation> {
        let mut bound = BTreeMap::new();
        let mut next = 0usize;

        for param in &self.params {
            if param.variadic {
                bound.insert(param.name.clone(), Value::List(args[next..].to_vec()));
                next = args.len();
            } else if next < args.len() {
                bound.insert(param.name.clone(), args[next].clone());
                next += 1;
            }
        }
        if next < args.len() {
            return Err(Violation::ArityMismatch {
                expected: self.positional_count(),
                given: args.len(),
            });
        }

        for (name, value) in kwargs {
            let known = self
                .params
                .iter()
                .any(|p| !p.variadic && p.name == *name);
            if !known || bound.contains_key(name) {
                return Err(Violation::UnknownArgument {
                    parameter: name.clone(),
                });
            }
            bound.insert(name.clone(), value.clone());
        }

        for param in &self.params {
            if !param.variadic && param.default.is_none() && !bound.contains_key(&param.name) {
                return Err(Violation::MissingArgument {
                    parameter: param.name.clone(),
                });
            }
        }

        Ok(bound)
    }

    /// Fill in declared defaults for parameters the caller omitted.
    pub fn apply_defaults(&self, bound: &mut BTreeMap<String, Value>) {
        for param in &self.params {
            if let Some(default) = &param.default {
                bound
                    .entry(param.name.clone())
                    .or_insert_with(|| default.clone());
            }
        }
    }

    /// Bind a partial set of expectations (by position and by name) to
    /// parameter names. Used at wrap time by the argument enforcement
    /// wrapper; parameters not covered stay unchecked.
    pub fn bind_partial<T: Clone>(
        &self,
        positional: &[T],
        named: &BTreeMap<String, T>,
    ) -> Result<BTreeMap<String, T>, Violation> {
        let mut bound = BTreeMap::new();

        let slots: Vec<&Param> = self.params.iter().filter(|p| !p.variadic).collect();
        if positional.len() > slots.len() {
            return Err(Violation::ArityMismatch {
                expected: slots.len(),
                given: positional.len(),
            });
        }
        for (param, item) in slots.iter().zip(positional) {
            bound.insert(param.name.clone(), item.clone());
        }

        for (name, item) in named {
            let known = self.params.iter().any(|p| p.name == *name);
            if !known || bound.contains_key(name) {
                return Err(Violation::UnknownArgument {
                    parameter: name.clone(),
                });
            }
            bound.insert(name.clone(), item.clone());
        }

        Ok(bound)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if param.variadic {
                write!(f, "*{}", param.name)?;
            } else if let Some(default) = &param.default {
                write!(f, "{}={}", param.name, default)?;
            } else {
                write!(f, "{}", param.name)?;
            }
        }
        write!(f, ")")
    }
}
