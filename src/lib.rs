//! Unity Module Registry
//!
//! Scans a Unity project's `Assets/` tree for modules by folder convention,
//! optionally enriches each one from a sidecar `module.yaml` descriptor, and
//! maintains a queryable, YAML-persisted registry of the result.
//!
//! # Example
//!
//! ```no_run
//! use unity_module_registry::RegistryManager;
//!
//! # fn main() -> unity_module_registry::RegistryResult<()> {
//! let mut registry = RegistryManager::new(Some("../MyUnityProject".into()), None);
//! let modules = registry.scan_modules()?;
//! println!("{} modules found", modules.len());
//! registry.save_registry()?;
//! # Ok(())
//! # }
//! ```

#![warn(rust_2018_idioms)]

pub mod descriptor;
pub mod error;
pub mod module;
pub mod registry;

pub use descriptor::{ModuleDescriptor, DESCRIPTOR_FILE};
pub use error::{RegistryError, RegistryResult};
pub use module::{ModuleType, ScanSummary, UnityModule, MODULE_TYPE_FOLDERS};
pub use registry::{RegistryManager, DEFAULT_REGISTRY_PATH, PROJECT_PATH_ENV};
