//! Observer configuration
//!
//! The defaults are the values the operator ships with. Files only exist so
//! a development cluster with different namespaces can be observed.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Namespace the kube-controller-manager runs in
pub const TARGET_NAMESPACE: &str = "openshift-kube-controller-manager";

/// Namespace holding user-provided global configuration
pub const CONFIG_NAMESPACE: &str = "openshift-config";

/// Name of the replicated cloud config map in the target namespace
pub const CLOUD_CONFIG_MAP_NAME: &str = "cloud-config";

/// Well-known name of the infrastructure singleton
pub const INFRASTRUCTURE_NAME: &str = "cluster";

/// Where the replicated cloud config is mounted in the static pod
pub const CLOUD_CONFIG_FILE_PATH: &str =
    "/etc/kubernetes/static-pod-resources/configmaps/cloud-config/config";

/// Fixed names and paths used by the cloud provider observer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObserverConfig {
    /// Namespace the cloud config is replicated into
    pub target_namespace: String,
    /// Namespace the cloud config is replicated from
    pub config_namespace: String,
    /// Name of the replicated config map
    pub cloud_config_map_name: String,
    /// Name of the infrastructure singleton
    pub infrastructure_name: String,
    /// Mount path of the replicated config file
    pub cloud_config_file_path: String,
}

impl ObserverConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With target namespace
    #[inline]
    #[must_use]
    pub fn with_target_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.target_namespace = namespace.into();
        self
    }

    /// With source config namespace
    #[inline]
    #[must_use]
    pub fn with_config_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config_namespace = namespace.into();
        self
    }

    /// With infrastructure singleton name
    #[inline]
    #[must_use]
    pub fn with_infrastructure_name(mut self, name: impl Into<String>) -> Self {
        self.infrastructure_name = name.into();
        self
    }

    /// With cloud config mount path
    #[inline]
    #[must_use]
    pub fn with_cloud_config_file_path(mut self, path: impl Into<String>) -> Self {
        self.cloud_config_file_path = path.into();
        self
    }

    /// Parse from TOML string
    ///
    /// # Errors
    /// Returns error if TOML is invalid
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::InvalidToml {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    /// Parse from YAML (or JSON) string
    ///
    /// # Errors
    /// Returns error if YAML is invalid
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(raw).map_err(|e| ConfigError::InvalidYaml {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    /// Load from file; `.toml` is parsed as TOML, anything else as YAML
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;

        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let parsed = if is_toml {
            Self::from_toml(&raw)
        } else {
            Self::from_yaml(&raw)
        };

        parsed.map_err(|e| match e {
            ConfigError::InvalidToml { message, .. } => ConfigError::InvalidToml {
                path: path.to_path_buf(),
                message,
            },
            ConfigError::InvalidYaml { message, .. } => ConfigError::InvalidYaml {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Serialize to TOML string
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidToml {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            target_namespace: TARGET_NAMESPACE.to_string(),
            config_namespace: CONFIG_NAMESPACE.to_string(),
            cloud_config_map_name: CLOUD_CONFIG_MAP_NAME.to_string(),
            infrastructure_name: INFRASTRUCTURE_NAME.to_string(),
            cloud_config_file_path: CLOUD_CONFIG_FILE_PATH.to_string(),
        }
    }
}
