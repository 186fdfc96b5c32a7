//! `module.yaml` descriptor lookup and best-effort parsing

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RegistryResult;

/// The sidecar descriptor file name looked up inside each module folder
pub const DESCRIPTOR_FILE: &str = "module.yaml";

/// Parsed contents of a `module.yaml` descriptor.
///
/// Every field is optional and absent fields stay unset; unrecognized keys
/// are ignored. Field values must be YAML strings (a list of strings for
/// `dependencies`); other scalar types are a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Display name override for the module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,
    /// Declared dependency module names, order preserved
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl ModuleDescriptor {
    /// Look for a descriptor in `dir`.
    ///
    /// Returns `Ok(None)` when the file is absent (not an error) and
    /// `Ok(Some(_))` when it was read and parsed, even partially. An empty or
    /// comments-only file is a valid descriptor with nothing set. An error is
    /// returned only when the file exists but is not valid YAML; the caller
    /// decides how far that failure propagates.
    pub fn load(dir: &Path) -> RegistryResult<Option<Self>> {
        let path = dir.join(DESCRIPTOR_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Some(ModuleDescriptor::default()));
        }
        // A comments-only or explicit-null document parses to YAML null
        let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
        if value.is_null() {
            return Ok(Some(ModuleDescriptor::default()));
        }
        let descriptor: ModuleDescriptor = serde_yaml::from_value(value)?;
        Ok(Some(descriptor))
    }

    /// Non-empty name override, if the descriptor declares one
    pub fn name_override(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}
