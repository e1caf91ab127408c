//! Collaborators handed to every observer

use crate::infrastructure::InfrastructureLister;
use crate::resource_sync::ResourceSyncer;

/// Read-only listers plus the resource syncer
///
/// Observers only read through listers; the syncer is the single
/// side-effecting collaborator they may call.
pub trait Listers: Send + Sync {
    /// Lister for `infrastructures.config.openshift.io`
    fn infrastructure_lister(&self) -> &dyn InfrastructureLister;

    /// Syncer for mirroring config maps into the operand namespace
    fn resource_syncer(&self) -> &dyn ResourceSyncer;
}

/// [`Listers`] built from concrete collaborators
#[derive(Debug, Clone, Default)]
pub struct StaticListers<L, S> {
    infrastructure: L,
    syncer: S,
}

impl<L, S> StaticListers<L, S>
where
    L: InfrastructureLister,
    S: ResourceSyncer,
{
    /// Create listers
    #[inline]
    #[must_use]
    pub fn new(infrastructure: L, syncer: S) -> Self {
        Self {
            infrastructure,
            syncer,
        }
    }

    /// Concrete infrastructure lister
    #[inline]
    #[must_use]
    pub fn infrastructure(&self) -> &L {
        &self.infrastructure
    }

    /// Concrete syncer
    #[inline]
    #[must_use]
    pub fn syncer(&self) -> &S {
        &self.syncer
    }
}

impl<L, S> Listers for StaticListers<L, S>
where
    L: InfrastructureLister,
    S: ResourceSyncer,
{
    fn infrastructure_lister(&self) -> &dyn InfrastructureLister {
        &self.infrastructure
    }

    fn resource_syncer(&self) -> &dyn ResourceSyncer {
        &self.syncer
    }
}
