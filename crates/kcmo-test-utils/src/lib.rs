//! Testing utilities for KCMO workspace
//!
//! Shared fakes, fixtures, and assertions.

#![allow(missing_docs)]

use kcmo_configobserver::{
    DryRunSyncer, Infrastructure, InfrastructureLister, ListerError, ObservedConfig, PlatformType,
    StaticListers,
};
use parking_lot::Mutex;
use serde_json::Value as JsonValue;

/// Outcome the fake lister returns for every lookup
#[derive(Debug, Clone)]
pub enum ListerOutcome {
    Found(Infrastructure),
    NotFound,
    Unavailable(String),
}

/// Lister returning a fixed outcome and counting lookups
#[derive(Debug)]
pub struct StaticInfrastructureLister {
    outcome: ListerOutcome,
    lookups: Mutex<Vec<String>>,
}

impl StaticInfrastructureLister {
    pub fn new(outcome: ListerOutcome) -> Self {
        Self {
            outcome,
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn found(infrastructure: Infrastructure) -> Self {
        Self::new(ListerOutcome::Found(infrastructure))
    }

    pub fn not_found() -> Self {
        Self::new(ListerOutcome::NotFound)
    }

    pub fn unavailable(reason: &str) -> Self {
        Self::new(ListerOutcome::Unavailable(reason.to_string()))
    }

    /// Names requested so far
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }
}

impl InfrastructureLister for StaticInfrastructureLister {
    fn get(&self, name: &str) -> Result<Infrastructure, ListerError> {
        self.lookups.lock().push(name.to_string());
        match &self.outcome {
            ListerOutcome::Found(infrastructure) if infrastructure.metadata.name == name => {
                Ok(infrastructure.clone())
            }
            ListerOutcome::Found(_) | ListerOutcome::NotFound => Err(ListerError::not_found(
                "infrastructures.config.openshift.io",
                name,
            )),
            ListerOutcome::Unavailable(reason) => Err(ListerError::Unavailable(reason.clone())),
        }
    }
}

pub type TestListers = StaticListers<StaticInfrastructureLister, DryRunSyncer>;

pub fn listers(lister: StaticInfrastructureLister, syncer: DryRunSyncer) -> TestListers {
    StaticListers::new(lister, syncer)
}

/// `cluster` infrastructure on `platform` with optional cloud config map
pub fn cluster_infrastructure(platform: &str, cloud_config: &str) -> Infrastructure {
    Infrastructure::new("cluster", PlatformType::from(platform)).with_cloud_config(cloud_config)
}

/// Build an [`ObservedConfig`] from a `serde_json::json!` literal
pub fn observed_config(value: JsonValue) -> ObservedConfig {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("observed config fixture must be an object, got {other}"),
    }
}

/// Existing config holding both owned keys
pub fn existing_with(provider: &str, cloud_config: &str) -> ObservedConfig {
    observed_config(serde_json::json!({
        "extendedArguments": {
            "cloud-provider": [provider],
            "cloud-config": [cloud_config],
        }
    }))
}
