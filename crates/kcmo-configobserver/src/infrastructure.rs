//! Cluster infrastructure resource
//!
//! A read-only view of `infrastructures.config.openshift.io`, the cluster
//! singleton recording which platform the cluster was installed on.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ListerError};

/// Qualified resource name used in messages and not-found errors
pub const RESOURCE: &str = "infrastructures.config.openshift.io";

/// Kind expected in infrastructure manifests
pub const KIND: &str = "Infrastructure";

/// Underlying platform the cluster runs on
///
/// Set by the installer. Unknown values deserialize into [`PlatformType::Other`];
/// a missing or `null` value is [`PlatformType::Unset`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum PlatformType {
    /// Field not set
    #[default]
    Unset,
    /// Amazon Web Services
    Aws,
    /// Microsoft Azure
    Azure,
    /// VMware vSphere
    VSphere,
    /// libvirt development clusters
    Libvirt,
    /// OpenStack
    OpenStack,
    /// No cloud integration (bare metal)
    None,
    /// Any value this crate does not recognize
    Other(String),
}

impl PlatformType {
    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::Aws => "AWS",
            Self::Azure => "Azure",
            Self::VSphere => "VSphere",
            Self::Libvirt => "Libvirt",
            Self::OpenStack => "OpenStack",
            Self::None => "None",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for PlatformType {
    fn from(value: &str) -> Self {
        match value {
            "" => Self::Unset,
            "AWS" => Self::Aws,
            "Azure" => Self::Azure,
            "VSphere" => Self::VSphere,
            "Libvirt" => Self::Libvirt,
            "OpenStack" => Self::OpenStack,
            "None" => Self::None,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<Option<String>> for PlatformType {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map_or(Self::Unset, Self::from)
    }
}

impl From<PlatformType> for String {
    fn from(platform: PlatformType) -> Self {
        platform.as_str().to_string()
    }
}

impl Display for PlatformType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object metadata (only the fields observers read)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectMeta {
    /// Object name
    pub name: String,
}

/// Reference to a key in a config map in the global config namespace
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigMapFileReference {
    /// Config map name; empty when no cloud config is declared
    pub name: String,
    /// Key within the config map
    pub key: String,
}

/// Desired infrastructure settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InfrastructureSpec {
    /// Cloud provider configuration blob
    pub cloud_config: ConfigMapFileReference,
}

/// Observed infrastructure state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InfrastructureStatus {
    /// Platform the cluster was installed on
    pub platform: PlatformType,
}

/// The cluster infrastructure resource
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Infrastructure {
    /// Object metadata
    pub metadata: ObjectMeta,
    /// Desired state
    pub spec: InfrastructureSpec,
    /// Observed state
    pub status: InfrastructureStatus,
}

impl Infrastructure {
    /// Create named infrastructure on the given platform
    #[must_use]
    pub fn new(name: impl Into<String>, platform: PlatformType) -> Self {
        Self {
            metadata: ObjectMeta { name: name.into() },
            spec: InfrastructureSpec::default(),
            status: InfrastructureStatus { platform },
        }
    }

    /// With cloud config map name
    #[inline]
    #[must_use]
    pub fn with_cloud_config(mut self, name: impl Into<String>) -> Self {
        self.spec.cloud_config.name = name.into();
        self
    }

    /// Platform reported in status
    #[inline]
    #[must_use]
    pub fn platform(&self) -> &PlatformType {
        &self.status.platform
    }

    /// Name of the declared cloud config map (may be empty)
    #[inline]
    #[must_use]
    pub fn cloud_config_name(&self) -> &str {
        &self.spec.cloud_config.name
    }
}

/// Read-only access to infrastructure resources
pub trait InfrastructureLister: Send + Sync {
    /// Get infrastructure by name
    ///
    /// # Errors
    /// - `ListerError::NotFound` if no such object exists
    /// - `ListerError::Unavailable` for any other retrieval failure
    fn get(&self, name: &str) -> Result<Infrastructure, ListerError>;
}

/// Lister serving a single infrastructure manifest from disk
///
/// The manifest is re-read on every `get`. A missing file means the
/// resource does not exist.
#[derive(Debug, Clone)]
pub struct FileInfrastructureLister {
    path: PathBuf,
}

impl FileInfrastructureLister {
    /// Create lister for manifest at `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Manifest location
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<Infrastructure>, ConfigError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConfigError::io_error(&self.path, e)),
        };

        let document: serde_yaml::Value =
            serde_yaml::from_str(&raw).map_err(|e| ConfigError::InvalidYaml {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        if let Some(kind) = document.get("kind").and_then(serde_yaml::Value::as_str) {
            if kind != KIND {
                return Err(ConfigError::InvalidDocument {
                    path: self.path.clone(),
                    message: format!("expected kind {KIND}, found {kind}"),
                });
            }
        }

        serde_yaml::from_value(document)
            .map(Some)
            .map_err(|e| ConfigError::InvalidDocument {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }
}

impl InfrastructureLister for FileInfrastructureLister {
    fn get(&self, name: &str) -> Result<Infrastructure, ListerError> {
        match self.load() {
            Ok(Some(infrastructure)) if infrastructure.metadata.name == name => Ok(infrastructure),
            Ok(_) => Err(ListerError::not_found(RESOURCE, name)),
            Err(e) => Err(ListerError::Unavailable(e.to_string())),
        }
    }
}
