//! KCMO Config Observation
//!
//! Observers derive fragments of the kube-controller-manager configuration
//! from cluster state. Each observer reads through listers, may ask a syncer
//! to replicate resources, and returns its fragment with any soft errors.
//!
//! # Core Concepts
//!
//! - [`ConfigObserver`]: one observer, stateless between invocations
//! - [`Listers`]: read-only listers plus the resource syncer
//! - [`Recorder`]: sink for operator-facing warnings
//! - [`ObservedConfig`]: untyped nested configuration fragment
//!
//! # Example
//!
//! ```rust,ignore
//! use kcmo_configobserver::prelude::*;
//!
//! let listers = StaticListers::new(
//!     FileInfrastructureLister::new("infrastructure.yaml"),
//!     DryRunSyncer::new(),
//! );
//! let recorder = InMemoryRecorder::new();
//!
//! let (observed, errs) = observe_cloud_provider_names(&listers, &recorder, &ObservedConfig::new());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cloudprovider;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod listers;
pub mod options;
pub mod path;
pub mod resource_sync;
pub mod unstructured;

// Re-exports for convenience
pub use cloudprovider::{observe_cloud_provider_names, CloudProviderObserver, ConfigObserver};
pub use error::{ConfigError, FieldError, ListerError, ObserveError, SyncError};
pub use events::{Event, EventType, InMemoryRecorder, Recorder, TracingRecorder};
pub use infrastructure::{FileInfrastructureLister, Infrastructure, InfrastructureLister, PlatformType};
pub use listers::{Listers, StaticListers};
pub use options::ObserverConfig;
pub use path::ConfigPath;
pub use resource_sync::{DryRunSyncer, ResourceLocation, ResourceSyncer, SyncRequest};
pub use unstructured::ObservedConfig;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for writing and running observers
    pub use crate::cloudprovider::{observe_cloud_provider_names, CloudProviderObserver, ConfigObserver};
    pub use crate::error::{ListerError, ObserveError, SyncError};
    pub use crate::events::{InMemoryRecorder, Recorder, TracingRecorder};
    pub use crate::infrastructure::{FileInfrastructureLister, Infrastructure, InfrastructureLister, PlatformType};
    pub use crate::listers::{Listers, StaticListers};
    pub use crate::options::ObserverConfig;
    pub use crate::resource_sync::{DryRunSyncer, ResourceLocation, ResourceSyncer};
    pub use crate::unstructured::ObservedConfig;
}
