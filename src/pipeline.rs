// Copyright 2025 Cowboy AI, LLC.

//! Kick-off of the external transform and publish pipeline
//!
//! The pipeline runs elsewhere; it reports progress back through
//! [`update_job`](crate::commands::update_job).

use crate::entity::ResourceId;
use crate::errors::{DomainError, DomainResult};
use crate::model::{Job, JobKind, Table};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// What the pipeline needs to start a run
#[derive(Debug, Clone, PartialEq)]
pub struct JobTrigger {
    /// The job the run reports to
    pub job: ResourceId<Job>,
    /// Transform or publish
    pub kind: JobKind,
    /// Tables the run processes
    pub tables: Vec<ResourceId<Table>>,
}

/// Payload as sent to a pipeline runner
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerPayload<'a> {
    job: &'a str,
    kind: &'a JobKind,
    tables: Vec<&'a str>,
}

impl JobTrigger {
    /// JSON payload for runners that take one
    pub fn to_json(&self) -> DomainResult<String> {
        let payload = TriggerPayload {
            job: self.job.as_str(),
            kind: &self.kind,
            tables: self.tables.iter().map(ResourceId::as_str).collect(),
        };
        Ok(serde_json::to_string(&payload)?)
    }
}

/// Fire-and-forget start of a pipeline run
#[async_trait]
pub trait PipelineTrigger: Send + Sync {
    /// Start a run; returns once the runner accepted it
    async fn trigger(&self, trigger: &JobTrigger) -> DomainResult<()>;
}

/// Pipeline trigger recording every run it was asked to start
#[derive(Clone, Default)]
pub struct RecordingPipelineTrigger {
    triggered: Arc<RwLock<Vec<JobTrigger>>>,
    rejecting: bool,
}

impl RecordingPipelineTrigger {
    /// Create a trigger accepting every run
    pub fn new() -> Self {
        Self::default()
    }

    /// A trigger rejecting every run
    pub fn rejecting() -> Self {
        Self {
            rejecting: true,
            ..Self::default()
        }
    }

    /// Runs started so far
    pub async fn triggered(&self) -> Vec<JobTrigger> {
        self.triggered.read().await.clone()
    }
}

#[async_trait]
impl PipelineTrigger for RecordingPipelineTrigger {
    async fn trigger(&self, trigger: &JobTrigger) -> DomainResult<()> {
        if self.rejecting {
            return Err(DomainError::ExternalServiceError {
                service: "pipeline".to_string(),
                message: format!("run for {} rejected", trigger.job),
            });
        }
        self.triggered.write().await.push(trigger.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_json() {
        let trigger = JobTrigger {
            job: ResourceId::new("http://example.com/p/jobs/abc").unwrap(),
            kind: JobKind::Publish { revision: 2 },
            tables: vec![ResourceId::new("http://example.com/p/csv-mapping/table-a").unwrap()],
        };

        let json: serde_json::Value = serde_json::from_str(&trigger.to_json().unwrap()).unwrap();
        assert_eq!(json["job"], "http://example.com/p/jobs/abc");
        assert_eq!(json["kind"]["Publish"]["revision"], 2);
        assert_eq!(json["tables"][0], "http://example.com/p/csv-mapping/table-a");
    }

    #[tokio::test]
    async fn test_recording_trigger() {
        let pipeline = RecordingPipelineTrigger::new();
        let trigger = JobTrigger {
            job: ResourceId::new("http://example.com/p/jobs/abc").unwrap(),
            kind: JobKind::Transform,
            tables: vec![],
        };

        pipeline.trigger(&trigger).await.unwrap();
        assert_eq!(pipeline.triggered().await, vec![trigger.clone()]);
        assert!(RecordingPipelineTrigger::rejecting().trigger(&trigger).await.is_err());
    }
}
