//! Module registry error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during module registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No project path was supplied and none could be resolved from the environment
    #[error("Unity project path not configured: pass a path or set UNITY_PROJECT_PATH")]
    ProjectPathNotConfigured,

    /// Configured project path does not exist on disk
    #[error("Unity project path does not exist: {}", .0.display())]
    ProjectPathNotFound(PathBuf),

    /// Assets folder missing under the project root
    #[error("Assets folder not found in Unity project: {}", .0.display())]
    AssetsRootMissing(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML parse error: {0}")]
    Yaml(String),
}

impl From<serde_yaml::Error> for RegistryError {
    fn from(e: serde_yaml::Error) -> Self {
        RegistryError::Yaml(e.to_string())
    }
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
