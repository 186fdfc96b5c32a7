//! Project scanning and the persisted module registry

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::descriptor::{ModuleDescriptor, DESCRIPTOR_FILE};
use crate::error::{RegistryError, RegistryResult};
use crate::module::{ModuleType, ScanSummary, UnityModule, MODULE_TYPE_FOLDERS};

/// Environment key consulted when no project path is passed in
pub const PROJECT_PATH_ENV: &str = "UNITY_PROJECT_PATH";

/// Default on-disk location of the registry snapshot
pub const DEFAULT_REGISTRY_PATH: &str = "data/unity_module_registry.yaml";

/// Registry file format version written into every snapshot
const REGISTRY_FORMAT_VERSION: &str = "1.0.0";

fn default_format_version() -> String {
    REGISTRY_FORMAT_VERSION.to_string()
}

/// Persisted registry snapshot. Optional fields are omitted when unset so a
/// save/load round-trip reproduces the collection exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default = "default_format_version")]
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_scan: Option<DateTime<Utc>>,
    #[serde(default)]
    modules: Vec<UnityModule>,
}

/// Scans a Unity project's `Assets/` tree and maintains a registry of
/// discovered modules.
///
/// Module types are detected from the folder structure:
/// - `Assets/_Core/*` -> core
/// - `Assets/_Managers/*` -> manager
/// - `Assets/_Shared/*` -> shared
/// - `Assets/Features/*` -> feature
/// - `Assets/Levels/*` -> level
/// - `Assets/ThirdParty/*` -> thirdparty
/// - `Assets/_Extensions/*` -> extension
///
/// The in-memory collection is the single source of truth during a session;
/// the registry file is a snapshot written by [`save_registry`] and read by
/// [`load_registry`], never kept transparently in sync.
///
/// [`save_registry`]: RegistryManager::save_registry
/// [`load_registry`]: RegistryManager::load_registry
#[derive(Debug)]
pub struct RegistryManager {
    project_path: Option<PathBuf>,
    registry_path: PathBuf,
    modules: Vec<UnityModule>,
    last_scan: Option<DateTime<Utc>>,
    format_version: String,
}

impl RegistryManager {
    /// Create a manager for the given project.
    ///
    /// When `project_path` is `None` the [`PROJECT_PATH_ENV`] environment
    /// variable is consulted; there is no default-to-cwd fallback, and a
    /// manager without a resolvable project path fails on
    /// [`scan_modules`](Self::scan_modules). `registry_path` defaults to
    /// [`DEFAULT_REGISTRY_PATH`]. An existing registry snapshot is loaded
    /// best-effort; a broken snapshot is logged, not fatal.
    pub fn new(
        project_path: Option<PathBuf>,
        registry_path: Option<PathBuf>,
    ) -> Self {
        let project_path = project_path.or_else(project_path_from_env);
        match &project_path {
            None => warn!("Unity project path not configured"),
            Some(p) if !p.exists() => {
                warn!("Unity project path does not exist: {}", p.display())
            }
            Some(_) => {}
        }

        let registry_path =
            registry_path.unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY_PATH));

        let mut manager = RegistryManager {
            project_path,
            registry_path,
            modules: Vec::new(),
            last_scan: None,
            format_version: REGISTRY_FORMAT_VERSION.to_string(),
        };
        if let Err(e) = manager.load_registry() {
            warn!("Failed to load existing registry: {e}");
        }
        manager
    }

    /// The resolved project root, if any
    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    /// Where [`save_registry`](Self::save_registry) writes the snapshot
    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Timestamp of the most recent successful scan, if any
    pub fn last_scan(&self) -> Option<DateTime<Utc>> {
        self.last_scan
    }

    /// The current module collection in scan/load order
    pub fn modules(&self) -> &[UnityModule] {
        &self.modules
    }

    /// Scan the Unity project for modules, replacing the in-memory
    /// collection wholesale.
    ///
    /// Walks the seven type folders in table order; within each folder,
    /// immediate child directories are visited in lexicographic name order,
    /// so scan order is deterministic on an unchanged tree. Hidden (`.`) and
    /// Unity-excluded (`~`) folders are skipped. A malformed descriptor
    /// yields a bare module and the scan continues; a missing project path
    /// or `Assets/` root aborts the scan and leaves the previous collection
    /// untouched.
    pub fn scan_modules(&mut self) -> RegistryResult<&[UnityModule]> {
        let project_path = self
            .project_path
            .clone()
            .ok_or(RegistryError::ProjectPathNotConfigured)?;
        if !project_path.exists() {
            return Err(RegistryError::ProjectPathNotFound(project_path));
        }
        let assets_path = project_path.join("Assets");
        if !assets_path.exists() {
            return Err(RegistryError::AssetsRootMissing(assets_path));
        }

        debug!("Scanning Unity project: {}", project_path.display());

        let mut discovered: Vec<UnityModule> = Vec::new();
        for (folder_name, module_type) in MODULE_TYPE_FOLDERS {
            let type_folder = assets_path.join(folder_name);
            if !type_folder.exists() {
                debug!("Folder not found (skipping): {}", type_folder.display());
                continue;
            }

            for module_folder in sorted_subdirectories(&type_folder)? {
                let folder_base = module_folder
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if folder_base.starts_with('.') || folder_base.starts_with('~') {
                    continue;
                }

                let module =
                    scan_single_module(&project_path, &module_folder, folder_base, module_type);
                debug!("Discovered module: {} ({})", module.name, module.module_type);
                discovered.push(module);
            }
        }

        self.modules = discovered;
        self.last_scan = Some(Utc::now());

        info!("Scan complete: {} modules found", self.modules.len());
        Ok(&self.modules)
    }

    /// Write the current collection to the registry file.
    ///
    /// Parent directories are created as needed. The snapshot is written to
    /// a temporary file and renamed into place, so a failed write never
    /// truncates an existing snapshot. An empty collection produces a valid
    /// minimal file.
    pub fn save_registry(&self) -> RegistryResult<()> {
        let snapshot = RegistryFile {
            version: self.format_version.clone(),
            project_path: self.project_path.clone(),
            last_scan: self.last_scan,
            modules: self.modules.clone(),
        };
        let content = serde_yaml::to_string(&snapshot)?;

        if let Some(parent) = self.registry_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = self.registry_path.with_extension("yaml.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.registry_path)?;

        debug!("Registry saved to {}", self.registry_path.display());
        Ok(())
    }

    /// Replace the in-memory collection from the registry file.
    ///
    /// A missing file is not an error: the collection becomes empty and 0 is
    /// returned. A malformed or unreadable file is an error and leaves the
    /// collection untouched.
    pub fn load_registry(&mut self) -> RegistryResult<usize> {
        if !self.registry_path.exists() {
            debug!("No existing registry found at {}", self.registry_path.display());
            self.modules = Vec::new();
            self.last_scan = None;
            return Ok(0);
        }

        let content = fs::read_to_string(&self.registry_path)?;
        if content.trim().is_empty() {
            self.modules = Vec::new();
            self.last_scan = None;
            return Ok(0);
        }

        let snapshot: RegistryFile = serde_yaml::from_str(&content)?;
        self.format_version = snapshot.version;
        self.last_scan = snapshot.last_scan;
        self.modules = snapshot.modules;

        debug!("Loaded {} modules from registry", self.modules.len());
        Ok(self.modules.len())
    }

    /// Get modules, optionally filtered by type, in stable scan/load order
    pub fn get_modules(
        &self,
        module_type: Option<ModuleType>,
    ) -> Vec<&UnityModule> {
        match module_type {
            Some(ty) => self
                .modules
                .iter()
                .filter(|m| m.module_type == ty)
                .collect(),
            None => self.modules.iter().collect(),
        }
    }

    /// Get a single module by exact, case-sensitive name.
    ///
    /// On duplicate names the first module in scan order wins.
    pub fn get_module(
        &self,
        name: &str,
    ) -> Option<&UnityModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Declared dependency names for a module, verbatim.
    ///
    /// Returns an empty slice both for an unknown module and for a module
    /// with no dependencies; the two are deliberately indistinguishable here.
    pub fn get_module_dependencies(
        &self,
        name: &str,
    ) -> &[String] {
        self.get_module(name)
            .map(|m| m.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Find every module whose `dependencies` lists `name`.
    ///
    /// Matching is an exact, case-sensitive string comparison, and the named
    /// dependency does not have to resolve to a scanned module.
    pub fn find_dependents(
        &self,
        name: &str,
    ) -> Vec<&UnityModule> {
        self.modules
            .iter()
            .filter(|m| m.dependencies.iter().any(|dep| dep == name))
            .collect()
    }

    /// Summarize the current registry state
    pub fn get_scan_summary(&self) -> ScanSummary {
        let mut modules_by_type: BTreeMap<ModuleType, usize> = BTreeMap::new();
        for module in &self.modules {
            *modules_by_type.entry(module.module_type).or_insert(0) += 1;
        }
        let with_descriptor = self.modules.iter().filter(|m| m.has_descriptor).count();

        ScanSummary {
            total_modules: self.modules.len(),
            modules_by_type,
            modules_with_descriptor: with_descriptor,
            modules_without_descriptor: self.modules.len() - with_descriptor,
            last_scan: self.last_scan,
            project_path: self.project_path.clone(),
        }
    }
}

fn project_path_from_env() -> Option<PathBuf> {
    match std::env::var(PROJECT_PATH_ENV) {
        Ok(value) if !value.trim().is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}

/// Immediate child directories of `dir`, sorted by name for deterministic
/// scan order regardless of filesystem enumeration order
fn sorted_subdirectories(dir: &Path) -> RegistryResult<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Build one module record for `folder`, enriching it from a descriptor if
/// one is present and readable
fn scan_single_module(
    project_path: &Path,
    folder: &Path,
    folder_base: String,
    module_type: ModuleType,
) -> UnityModule {
    let relative = folder
        .strip_prefix(project_path)
        .unwrap_or(folder)
        .to_path_buf();
    let mut module = UnityModule::new(folder_base, module_type, relative);

    match ModuleDescriptor::load(folder) {
        Ok(None) => {}
        Ok(Some(descriptor)) => {
            module.has_descriptor = true;
            if let Some(name) = descriptor.name_override() {
                module.name = name.to_string();
            }
            module.version = descriptor.version;
            module.description = descriptor.description;
            module.dependencies = descriptor.dependencies;
            module.assembly = descriptor.assembly;
        }
        Err(e) => {
            warn!(
                "Failed to parse {} for {}: {}",
                DESCRIPTOR_FILE, module.name, e
            );
        }
    }

    module
}
