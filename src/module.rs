//! Module record and folder-based type classification

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Module type detection table: top-level folders under `Assets/` and the
/// type assigned to their immediate subdirectories. Directories outside these
/// seven roots never become modules.
pub const MODULE_TYPE_FOLDERS: [(&str, ModuleType); 7] = [
    ("_Core", ModuleType::Core),
    ("_Managers", ModuleType::Manager),
    ("_Shared", ModuleType::Shared),
    ("Features", ModuleType::Feature),
    ("Levels", ModuleType::Level),
    ("ThirdParty", ModuleType::ThirdParty),
    ("_Extensions", ModuleType::Extension),
];

/// Category assigned to a module by the folder rule that discovered it.
///
/// Immutable once assigned; never overridable by descriptor content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Core,
    Manager,
    Shared,
    Feature,
    Level,
    ThirdParty,
    Extension,
}

impl ModuleType {
    /// Stable lowercase tag, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Core => "core",
            ModuleType::Manager => "manager",
            ModuleType::Shared => "shared",
            ModuleType::Feature => "feature",
            ModuleType::Level => "level",
            ModuleType::ThirdParty => "thirdparty",
            ModuleType::Extension => "extension",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered Unity module.
///
/// Optional fields are true "unset" when the descriptor does not supply them
/// and are omitted from serialized output, so save/load round-trips are
/// faithful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnityModule {
    /// Module name: the folder base name unless overridden by the descriptor
    pub name: String,
    /// Category from the matching folder rule
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    /// Location relative to the project root
    pub path: PathBuf,
    /// True iff a descriptor file was found and read successfully
    #[serde(default)]
    pub has_descriptor: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared dependency names in declaration order. Entries are plain
    /// strings and may not resolve to any scanned module.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,
}

impl UnityModule {
    /// Create a bare module with no descriptor enrichment
    pub fn new(
        name: impl Into<String>,
        module_type: ModuleType,
        path: impl Into<PathBuf>,
    ) -> Self {
        UnityModule {
            name: name.into(),
            module_type,
            path: path.into(),
            has_descriptor: false,
            version: None,
            description: None,
            dependencies: Vec::new(),
            assembly: None,
        }
    }
}

/// Aggregate view of the current registry state
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    /// Total number of modules in the collection
    pub total_modules: usize,
    /// Count per module type; types with zero modules are absent
    pub modules_by_type: BTreeMap<ModuleType, usize>,
    /// Modules that carried a readable descriptor file
    pub modules_with_descriptor: usize,
    /// Modules without one (missing or malformed)
    pub modules_without_descriptor: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scan: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<PathBuf>,
}
