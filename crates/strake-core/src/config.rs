//! Configuration file loading for strake.
//!
//! Reads `strake.json` and provides typed access to all settings.
//! Falls back to sensible defaults when the config file is missing or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level strake configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrakeConfig {
    pub version: String,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub policies: PolicyToggles,
}

/// Naming-convention tuning.
///
/// The camelCase rejection pattern is configurable rather than fixed: the
/// default rejects any lower-case letter immediately followed by an
/// upper-case one, plus fully upper-case names bound to callables, while
/// upper-case constants stay legal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingConfig {
    #[serde(default = "default_true")]
    pub forbid_mixed_case: bool,
    #[serde(default = "default_true")]
    pub forbid_upper_callables: bool,
    #[serde(default = "default_true")]
    pub allow_upper_constants: bool,
    /// Members starting with this prefix are exempt from signature matching.
    #[serde(default = "default_private_prefix")]
    pub private_prefix: String,
}

/// Per-policy enablement for the default composite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyToggles {
    #[serde(default = "default_true")]
    pub member_names: bool,
    #[serde(default = "default_true")]
    pub type_names: bool,
    #[serde(default = "default_true")]
    pub duplicates: bool,
    #[serde(default = "default_true")]
    pub signatures: bool,
}

fn default_true() -> bool {
    true
}
fn default_private_prefix() -> String {
    "_".to_string()
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            forbid_mixed_case: true,
            forbid_upper_callables: true,
            allow_upper_constants: true,
            private_prefix: default_private_prefix(),
        }
    }
}

impl Default for PolicyToggles {
    fn default() -> Self {
        Self {
            member_names: true,
            type_names: true,
            duplicates: true,
            signatures: true,
        }
    }
}

impl Default for StrakeConfig {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            naming: NamingConfig::default(),
            policies: PolicyToggles::default(),
        }
    }
}

impl StrakeConfig {
    /// Load configuration from `strake.json` inside the given directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(dir: &Path) -> Self {
        let config_path = dir.join("strake.json");
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!(
                    "strake: warning: failed to parse {}: {}, using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
