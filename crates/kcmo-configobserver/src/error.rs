//! Error types for config observation
//!
//! Provides error handling for:
//! - Nested field reads/writes on untyped configuration
//! - Infrastructure lookups through the lister
//! - Config map replication requests
//! - Loading observer configuration and manifests from disk

use crate::path::ConfigPath;
use crate::resource_sync::ResourceLocation;
use std::path::PathBuf;

/// Errors reading or writing an untyped configuration map
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// An intermediate value on the path is not a mapping
    #[error("value at {segment:?} of {path} is of the type {found}, expected map")]
    NotAMap {
        /// Full path being accessed
        path: ConfigPath,
        /// Segment holding the non-map value
        segment: String,
        /// JSON type actually found
        found: &'static str,
    },

    /// The leaf value is not a list of strings
    #[error("{path} accessor error: {found} is of the type {kind}, expected list of strings")]
    NotAStringSlice {
        /// Full path being read
        path: ConfigPath,
        /// Rendered leaf value
        found: String,
        /// JSON type actually found
        kind: &'static str,
    },

    /// Path has no segments
    #[error("cannot set a value at an empty path")]
    EmptyPath,
}

/// Errors returned by an infrastructure lister
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListerError {
    /// The requested resource does not exist
    #[error("{resource} \"{name}\" not found")]
    NotFound {
        /// Qualified resource kind, e.g. `infrastructures.config.openshift.io`
        resource: String,
        /// Object name
        name: String,
    },

    /// Any other retrieval failure
    #[error("lister unavailable: {0}")]
    Unavailable(String),
}

impl ListerError {
    /// Create not-found error
    pub fn not_found(resource: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            name: name.into(),
        }
    }

    /// Check if this is a not-found condition
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors returned by a resource syncer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The sync request was rejected or could not be queued
    #[error("failed to sync configmap {origin} to {destination}: {reason}")]
    Failed {
        /// Destination location
        destination: ResourceLocation,
        /// Source location
        origin: ResourceLocation,
        /// Failure description
        reason: String,
    },
}

impl SyncError {
    /// Create sync failure
    pub fn failed(
        destination: ResourceLocation,
        origin: ResourceLocation,
        reason: impl Into<String>,
    ) -> Self {
        Self::Failed {
            destination,
            origin,
            reason: reason.into(),
        }
    }
}

/// Soft errors accumulated by an observer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObserveError {
    /// Writing an observed value failed
    #[error("field error: {0}")]
    Field(#[from] FieldError),

    /// Replicating the cloud config failed
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),
}

/// Errors loading configuration and manifests from disk
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML
    #[error("invalid TOML in {path}: {message}")]
    InvalidToml {
        /// File being parsed
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Invalid YAML or JSON
    #[error("invalid YAML in {path}: {message}")]
    InvalidYaml {
        /// File being parsed
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Document parsed but has the wrong shape
    #[error("invalid document {path}: {message}")]
    InvalidDocument {
        /// File being parsed
        path: PathBuf,
        /// What was wrong
        message: String,
    },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
