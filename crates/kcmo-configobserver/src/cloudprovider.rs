//! Cloud provider observer
//!
//! Derives `extendedArguments.cloud-provider` and `extendedArguments.cloud-config`
//! from the cluster infrastructure resource.
//!
//! # Outcomes
//!
//! | Infrastructure lookup | Returned fragment |
//! |---|---|
//! | found | freshly observed values |
//! | not found | empty (no opinion during bootstrap) |
//! | any other error | previously observed values |

use crate::error::ObserveError;
use crate::events::Recorder;
use crate::infrastructure::{PlatformType, RESOURCE};
use crate::listers::Listers;
use crate::options::ObserverConfig;
use crate::path::ConfigPath;
use crate::resource_sync::ResourceLocation;
use crate::unstructured::{nested_string_slice, set_nested_string_slice, ObservedConfig};

/// Event reason for observer-level failures
pub const REASON_OBSERVER: &str = "ObserverCloudProviderNames";

/// Event reason for platform mapping problems
pub const REASON_PLATFORM: &str = "ObserveCloudProvidersFailed";

/// Path of the provider name list
#[must_use]
pub fn cloud_provider_path() -> ConfigPath {
    ConfigPath::from_segments(&["extendedArguments", "cloud-provider"])
}

/// Path of the cloud config file list
#[must_use]
pub fn cloud_config_path() -> ConfigPath {
    ConfigPath::from_segments(&["extendedArguments", "cloud-config"])
}

/// An observer contributing a fragment of operand configuration
pub trait ConfigObserver: Send + Sync {
    /// Compute the next fragment from cluster state and the config in effect
    ///
    /// Never fails outright: problems are returned alongside a best-effort fragment.
    fn observe(
        &self,
        listers: &dyn Listers,
        recorder: &dyn Recorder,
        existing: &ObservedConfig,
    ) -> (ObservedConfig, Vec<ObserveError>);
}

/// Map a platform to the kube-controller-manager `--cloud-provider` value
///
/// Returns an empty string when the cluster should run without a cloud
/// provider. Unset and unrecognized platforms are reported as warnings.
pub fn platform_name(platform: &PlatformType, recorder: &dyn Recorder) -> &'static str {
    match platform {
        PlatformType::Unset => {
            recorder.warning(
                REASON_PLATFORM,
                &format!("Required status.platform field is not set in {RESOURCE}/cluster"),
            );
            ""
        }
        PlatformType::Aws => "aws",
        PlatformType::Azure => "azure",
        PlatformType::VSphere => "vsphere",
        PlatformType::Libvirt => "",
        // TODO: map to "openstack" once the cloud provider config can be written on masters
        PlatformType::OpenStack => "",
        PlatformType::None => "",
        // Unrecognized platforms are treated the same as bare metal.
        PlatformType::Other(_) => {
            recorder.warning(
                REASON_PLATFORM,
                &format!("No recognized cloud provider platform found in {RESOURCE}/cluster.status.platform"),
            );
            ""
        }
    }
}

/// Observer for the cloud provider name and replicated cloud config
#[derive(Debug, Clone, Default)]
pub struct CloudProviderObserver {
    config: ObserverConfig,
}

impl CloudProviderObserver {
    /// Create observer with default names
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create observer with custom names
    #[inline]
    #[must_use]
    pub fn with_config(config: ObserverConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    /// Owned keys copied out of `existing`
    fn previously_observed(
        existing: &ObservedConfig,
        errs: &mut Vec<ObserveError>,
    ) -> ObservedConfig {
        let mut previous = ObservedConfig::new();

        for path in [cloud_provider_path(), cloud_config_path()] {
            let current = match nested_string_slice(existing, &path) {
                Ok(current) => current.unwrap_or_default(),
                Err(e) => {
                    tracing::debug!(%path, error = %e, "ignoring malformed existing value");
                    Vec::new()
                }
            };
            if current.is_empty() {
                continue;
            }
            if let Err(e) = set_nested_string_slice(&mut previous, &current, &path) {
                errs.push(e.into());
            }
        }

        previous
    }
}

impl ConfigObserver for CloudProviderObserver {
    fn observe(
        &self,
        listers: &dyn Listers,
        recorder: &dyn Recorder,
        existing: &ObservedConfig,
    ) -> (ObservedConfig, Vec<ObserveError>) {
        let mut errs = Vec::new();
        let provider_path = cloud_provider_path();
        let config_path = cloud_config_path();

        let previous = Self::previously_observed(existing, &mut errs);
        let mut observed = ObservedConfig::new();

        let name = &self.config.infrastructure_name;
        let infrastructure = match listers.infrastructure_lister().get(name) {
            Ok(infrastructure) => infrastructure,
            Err(e) if e.is_not_found() => {
                recorder.warning(REASON_OBSERVER, &format!("Required {RESOURCE}/{name} not found"));
                return (observed, errs);
            }
            Err(e) => {
                tracing::warn!(error = %e, "infrastructure lookup failed, keeping previous cloud provider config");
                return (previous, errs);
            }
        };

        let cloud_provider = platform_name(infrastructure.platform(), recorder);
        tracing::debug!(platform = %infrastructure.platform(), cloud_provider, "observed platform");
        if !cloud_provider.is_empty() {
            if let Err(e) =
                set_nested_string_slice(&mut observed, &[cloud_provider.to_string()], &provider_path)
            {
                errs.push(e.into());
            }
        }

        let source_config_map = infrastructure.cloud_config_name();
        if source_config_map.is_empty() {
            return (observed, errs);
        }

        let destination = ResourceLocation::new(
            &self.config.target_namespace,
            &self.config.cloud_config_map_name,
        );
        let source = ResourceLocation::new(&self.config.config_namespace, source_config_map);
        tracing::debug!(%source, %destination, "syncing cloud config");

        if let Err(e) = listers.resource_syncer().sync_config_map(destination, source) {
            errs.push(e.into());
            return (observed, errs);
        }

        if let Err(e) = set_nested_string_slice(
            &mut observed,
            &[self.config.cloud_config_file_path.clone()],
            &config_path,
        ) {
            recorder.warning(REASON_OBSERVER, &format!("Failed setting cloud-config : {e}"));
            errs.push(e.into());
        }

        (observed, errs)
    }
}

/// Observe the cloud provider with the default names
///
/// Convenience wrapper around [`CloudProviderObserver`] matching the
/// signature observers are registered with.
pub fn observe_cloud_provider_names(
    listers: &dyn Listers,
    recorder: &dyn Recorder,
    existing: &ObservedConfig,
) -> (ObservedConfig, Vec<ObserveError>) {
    CloudProviderObserver::new().observe(listers, recorder, existing)
}
