use std::fs;

use kcmo_configobserver::prelude::*;
use kcmo_test_utils::{existing_with, observed_config};
use pretty_assertions::assert_eq;
use serde_json::json;

const AWS_MANIFEST: &str = r"
apiVersion: config.openshift.io/v1
kind: Infrastructure
metadata:
  name: cluster
spec:
  cloudConfig:
    name: user-ca
    key: config
status:
  platform: AWS
";

#[test]
fn test_manifest_on_disk_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("infrastructure.yaml");
    fs::write(&manifest, AWS_MANIFEST).unwrap();

    let listers = StaticListers::new(FileInfrastructureLister::new(&manifest), DryRunSyncer::new());
    let recorder = InMemoryRecorder::new();
    let (observed, errs) = observe_cloud_provider_names(&listers, &recorder, &ObservedConfig::new());

    assert!(errs.is_empty());
    assert_eq!(
        observed,
        existing_with(
            "aws",
            "/etc/kubernetes/static-pod-resources/configmaps/cloud-config/config"
        )
    );
    assert_eq!(listers.syncer().requests().len(), 1);
}

#[test]
fn test_manifest_removed_goes_empty() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("infrastructure.yaml");

    let listers = StaticListers::new(FileInfrastructureLister::new(&manifest), DryRunSyncer::new());
    let recorder = InMemoryRecorder::new();
    let existing = existing_with("aws", "/etc/cloud.conf");
    let (observed, errs) = observe_cloud_provider_names(&listers, &recorder, &existing);

    assert!(observed.is_empty());
    assert!(errs.is_empty());
    assert_eq!(recorder.warnings().len(), 1);
}

#[test]
fn test_corrupt_manifest_keeps_previous() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("infrastructure.yaml");
    fs::write(&manifest, "metadata: [unterminated").unwrap();

    let listers = StaticListers::new(FileInfrastructureLister::new(&manifest), DryRunSyncer::new());
    let recorder = InMemoryRecorder::new();
    let existing = existing_with("azure", "/etc/cloud.conf");
    let (observed, errs) = observe_cloud_provider_names(&listers, &recorder, &existing);

    assert_eq!(observed, existing);
    assert!(errs.is_empty());
    assert!(recorder.events().is_empty());
}

#[test]
fn test_dry_run_failure_truncates_output() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("infrastructure.yaml");
    fs::write(&manifest, AWS_MANIFEST).unwrap();

    let listers = StaticListers::new(
        FileInfrastructureLister::new(&manifest),
        DryRunSyncer::failing("not connected"),
    );
    let (observed, errs) =
        observe_cloud_provider_names(&listers, &InMemoryRecorder::new(), &ObservedConfig::new());

    assert_eq!(
        observed,
        observed_config(json!({"extendedArguments": {"cloud-provider": ["aws"]}}))
    );
    assert_eq!(errs.len(), 1);
}

#[test]
fn test_null_platform_manifest_is_unset() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("infrastructure.yaml");
    fs::write(
        &manifest,
        "kind: Infrastructure\nmetadata:\n  name: cluster\nstatus:\n  platform: null\n",
    )
    .unwrap();

    let listers = StaticListers::new(FileInfrastructureLister::new(&manifest), DryRunSyncer::new());
    let recorder = InMemoryRecorder::new();
    let existing = existing_with("aws", "/etc/cloud.conf");
    let (observed, errs) = observe_cloud_provider_names(&listers, &recorder, &existing);

    assert!(observed.is_empty());
    assert!(errs.is_empty());
    let warnings = recorder.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].reason, "ObserveCloudProvidersFailed");
}
