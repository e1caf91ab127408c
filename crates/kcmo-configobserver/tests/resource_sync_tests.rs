use kcmo_configobserver::prelude::*;
use kcmo_configobserver::SyncError;
use kcmo_test_utils::{cluster_infrastructure, observed_config, StaticInfrastructureLister};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::json;

mockall::mock! {
    Syncer {}

    impl ResourceSyncer for Syncer {
        fn sync_config_map(
            &self,
            destination: ResourceLocation,
            source: ResourceLocation,
        ) -> Result<(), SyncError>;
    }
}

#[test]
fn test_sync_called_once_with_fixed_locations() {
    let mut syncer = MockSyncer::new();
    syncer
        .expect_sync_config_map()
        .with(
            eq(ResourceLocation::new("openshift-kube-controller-manager", "cloud-config")),
            eq(ResourceLocation::new("openshift-config", "azure-cloud")),
        )
        .times(1)
        .returning(|_, _| Ok(()));

    let listers = StaticListers::new(
        StaticInfrastructureLister::found(cluster_infrastructure("Azure", "azure-cloud")),
        syncer,
    );
    let (observed, errs) =
        observe_cloud_provider_names(&listers, &InMemoryRecorder::new(), &ObservedConfig::new());

    assert!(errs.is_empty());
    assert_eq!(observed.len(), 1);
}

#[test]
fn test_sync_never_called_without_cloud_config() {
    let mut syncer = MockSyncer::new();
    syncer.expect_sync_config_map().times(0);

    let listers = StaticListers::new(
        StaticInfrastructureLister::found(cluster_infrastructure("AWS", "")),
        syncer,
    );
    let (observed, errs) =
        observe_cloud_provider_names(&listers, &InMemoryRecorder::new(), &ObservedConfig::new());

    assert!(errs.is_empty());
    assert_eq!(
        observed,
        observed_config(json!({"extendedArguments": {"cloud-provider": ["aws"]}}))
    );
}

#[test]
fn test_sync_never_called_when_lookup_fails() {
    for lister in [
        StaticInfrastructureLister::not_found(),
        StaticInfrastructureLister::unavailable("informer stopped"),
    ] {
        let mut syncer = MockSyncer::new();
        syncer.expect_sync_config_map().times(0);

        let listers = StaticListers::new(lister, syncer);
        let _ = observe_cloud_provider_names(&listers, &InMemoryRecorder::new(), &ObservedConfig::new());
    }
}

#[test]
fn test_sync_error_is_returned_verbatim() {
    let mut syncer = MockSyncer::new();
    syncer
        .expect_sync_config_map()
        .times(1)
        .returning(|dst, src| Err(SyncError::failed(dst, src, "quota exceeded")));

    let listers = StaticListers::new(
        StaticInfrastructureLister::found(cluster_infrastructure("VSphere", "vsphere-creds")),
        syncer,
    );
    let (observed, errs) =
        observe_cloud_provider_names(&listers, &InMemoryRecorder::new(), &ObservedConfig::new());

    assert_eq!(
        observed,
        observed_config(json!({"extendedArguments": {"cloud-provider": ["vsphere"]}}))
    );
    assert_eq!(
        errs,
        vec![ObserveError::Sync(SyncError::failed(
            ResourceLocation::new("openshift-kube-controller-manager", "cloud-config"),
            ResourceLocation::new("openshift-config", "vsphere-creds"),
            "quota exceeded",
        ))]
    );
}
