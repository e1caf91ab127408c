//! Resource replication between namespaces
//!
//! Observers never copy data themselves. They ask a [`ResourceSyncer`] to
//! mirror a config map into the operand namespace and let it converge.

use std::fmt::{self, Display, Formatter};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Namespaced object location
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceLocation {
    /// Namespace
    pub namespace: String,
    /// Object name
    pub name: String,
}

impl ResourceLocation {
    /// Create location
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl Display for ResourceLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A single replication request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Where the copy lands
    pub destination: ResourceLocation,
    /// What gets copied
    pub source: ResourceLocation,
}

/// Replicates config maps between namespaces
///
/// Implementations must treat repeated identical requests as a no-op once
/// the destination is in sync.
pub trait ResourceSyncer: Send + Sync {
    /// Request that `source` be mirrored to `destination`
    ///
    /// # Errors
    /// Returns error if the request cannot be accepted
    fn sync_config_map(
        &self,
        destination: ResourceLocation,
        source: ResourceLocation,
    ) -> Result<(), SyncError>;
}

/// Syncer that records requests instead of performing them
///
/// Used by the command line to show what would be replicated.
#[derive(Debug, Default)]
pub struct DryRunSyncer {
    requests: Mutex<Vec<SyncRequest>>,
    fail_with: Option<String>,
}

impl DryRunSyncer {
    /// Create syncer that accepts every request
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create syncer that rejects every request with `reason`
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_with: Some(reason.into()),
        }
    }

    /// Requests received so far, in order
    #[must_use]
    pub fn requests(&self) -> Vec<SyncRequest> {
        self.requests.lock().clone()
    }
}

impl ResourceSyncer for DryRunSyncer {
    fn sync_config_map(
        &self,
        destination: ResourceLocation,
        source: ResourceLocation,
    ) -> Result<(), SyncError> {
        self.requests.lock().push(SyncRequest {
            destination: destination.clone(),
            source: source.clone(),
        });

        if let Some(reason) = &self.fail_with {
            tracing::warn!(%source, %destination, reason = %reason, "rejecting configmap sync");
            return Err(SyncError::failed(destination, source, reason.clone()));
        }

        tracing::info!(%source, %destination, "would sync configmap");
        Ok(())
    }
}
