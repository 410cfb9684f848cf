// Copyright 2025 Cowboy AI, LLC.

//! Transform and publish jobs
//!
//! A job is created when a run is triggered and afterwards only changes when
//! the external pipeline runner reports progress. The runner decides the
//! status; [`Job::apply`] records whatever it reports.

use crate::entity::ResourceId;
use crate::errors::{DomainError, DomainResult};
use crate::model::Project;
use crate::state_machine::{State, StateTransition};
use crate::vocab::Schema;
use chrono::{DateTime, Utc};
use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};

/// Status of a job, following schema.org `ActionStatusType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionStatus {
    /// Queued, not started yet
    Potential,
    /// Running
    Active,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
}

impl ActionStatus {
    /// The schema.org IRI of this status
    pub fn iri(&self) -> &'static str {
        match self {
            ActionStatus::Potential => Schema::POTENTIAL_ACTION_STATUS,
            ActionStatus::Active => Schema::ACTIVE_ACTION_STATUS,
            ActionStatus::Completed => Schema::COMPLETED_ACTION_STATUS,
            ActionStatus::Failed => Schema::FAILED_ACTION_STATUS,
        }
    }

    /// Parse a schema.org status IRI
    pub fn from_iri(iri: &str) -> DomainResult<Self> {
        match iri {
            Schema::POTENTIAL_ACTION_STATUS => Ok(ActionStatus::Potential),
            Schema::ACTIVE_ACTION_STATUS => Ok(ActionStatus::Active),
            Schema::COMPLETED_ACTION_STATUS => Ok(ActionStatus::Completed),
            Schema::FAILED_ACTION_STATUS => Ok(ActionStatus::Failed),
            other => Err(DomainError::ValidationError(format!(
                "unknown action status {other}"
            ))),
        }
    }
}

impl State for ActionStatus {
    fn name(&self) -> &'static str {
        match self {
            ActionStatus::Potential => "Potential",
            ActionStatus::Active => "Active",
            ActionStatus::Completed => "Completed",
            ActionStatus::Failed => "Failed",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, ActionStatus::Completed | ActionStatus::Failed)
    }
}

/// What a job does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    /// Transform the project's CSV files into the cube graph
    Transform,
    /// Publish the transformed cube as the given revision
    Publish {
        /// Revision this publish produces
        revision: u32,
    },
}

impl JobKind {
    /// Label prefix used for new jobs
    pub fn label(&self) -> &'static str {
        match self {
            JobKind::Transform => "Transformation",
            JobKind::Publish { .. } => "Publication",
        }
    }
}

/// Error reported by the pipeline runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobError {
    /// Short error name
    pub name: String,
    /// Details, e.g. a stack trace or validation report summary
    pub description: Option<String>,
}

/// One status report from the pipeline runner
#[derive(Debug, Clone, PartialEq)]
pub struct JobUpdate {
    /// When the runner produced the report
    pub modified: DateTime<Utc>,
    /// New status, if the report carries one
    pub action_status: Option<ActionStatus>,
    /// Links to logs and artifacts; empty keeps the current links
    pub see_also: Vec<NamedNode>,
    /// Error details; `None` clears a previous error
    pub error: Option<JobError>,
}

impl JobUpdate {
    /// A report carrying only a timestamp and a status
    pub fn status(modified: DateTime<Utc>, action_status: ActionStatus) -> Self {
        Self {
            modified,
            action_status: Some(action_status),
            see_also: Vec::new(),
            error: None,
        }
    }
}

/// A transform or publish run of a project
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    /// Job identifier
    pub id: ResourceId<Job>,
    /// Project the job runs for
    pub project: ResourceId<Project>,
    /// Display label
    pub label: String,
    /// Transform or publish
    pub kind: JobKind,
    /// Current status
    pub action_status: ActionStatus,
    /// Creation time
    pub created: DateTime<Utc>,
    /// Time of the last status report
    pub modified: DateTime<Utc>,
    /// Links to logs and artifacts
    pub see_also: Vec<NamedNode>,
    /// Error reported by the last status update
    pub error: Option<JobError>,
}

impl Job {
    /// Create a pending job
    pub fn new(
        id: ResourceId<Job>,
        project: ResourceId<Project>,
        kind: JobKind,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            project,
            label: format!("{} {}", kind.label(), created.format("%Y-%m-%d %H:%M:%S")),
            kind,
            action_status: ActionStatus::Potential,
            created,
            modified: created,
            see_also: Vec::new(),
            error: None,
        }
    }

    /// Revision of a publish job, `None` for transforms
    pub fn revision(&self) -> Option<u32> {
        match self.kind {
            JobKind::Publish { revision } => Some(revision),
            JobKind::Transform => None,
        }
    }

    /// Apply a status report
    ///
    /// Returns the status transition when the report carried a status.
    pub fn apply(&mut self, update: JobUpdate) -> Option<StateTransition<ActionStatus>> {
        self.modified = update.modified;

        let transition = update.action_status.map(|status| {
            let transition = StateTransition::new(self.action_status, status, update.modified);
            self.action_status = status;
            transition
        });

        if !update.see_also.is_empty() {
            self.see_also = update.see_also;
        }
        self.error = update.error;

        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn job(kind: JobKind) -> Job {
        let project = ResourceId::<Project>::new("http://example.com/cube-project/ubd").unwrap();
        Job::new(
            project.child("jobs/abc"),
            project,
            kind,
            Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test_case(ActionStatus::Potential ; "potential")]
    #[test_case(ActionStatus::Active ; "active")]
    #[test_case(ActionStatus::Completed ; "completed")]
    #[test_case(ActionStatus::Failed ; "failed")]
    fn test_status_iri_round_trip(status: ActionStatus) {
        assert_eq!(ActionStatus::from_iri(status.iri()).unwrap(), status);
    }

    #[test]
    fn test_unknown_status_iri() {
        assert!(ActionStatus::from_iri("http://schema.org/Whatever")
            .unwrap_err()
            .is_validation_error());
    }

    #[test]
    fn test_new_job_is_pending() {
        let job = job(JobKind::Publish { revision: 3 });
        assert_eq!(job.action_status, ActionStatus::Potential);
        assert_eq!(job.revision(), Some(3));
        assert_eq!(job.label, "Publication 2021-03-01 12:00:00");
    }

    #[test]
    fn test_apply_records_transition() {
        let mut job = job(JobKind::Transform);
        let modified = Utc.with_ymd_and_hms(2021, 3, 1, 12, 5, 0).unwrap();

        let transition = job
            .apply(JobUpdate::status(modified, ActionStatus::Active))
            .unwrap();

        assert_eq!(transition.from, ActionStatus::Potential);
        assert_eq!(transition.to, ActionStatus::Active);
        assert_eq!(job.modified, modified);
        assert!(!transition.reopens_terminal());
    }

    #[test]
    fn test_apply_without_status_keeps_status() {
        let mut job = job(JobKind::Transform);
        let modified = Utc.with_ymd_and_hms(2021, 3, 1, 12, 5, 0).unwrap();
        let update = JobUpdate {
            modified,
            action_status: None,
            see_also: vec![NamedNode::new_unchecked("http://runner/log/1")],
            error: None,
        };

        assert!(job.apply(update).is_none());
        assert_eq!(job.action_status, ActionStatus::Potential);
        assert_eq!(job.see_also.len(), 1);
    }

    #[test]
    fn test_error_is_cleared_and_see_also_kept() {
        let mut job = job(JobKind::Transform);
        let modified = Utc.with_ymd_and_hms(2021, 3, 1, 12, 5, 0).unwrap();
        job.apply(JobUpdate {
            modified,
            action_status: Some(ActionStatus::Failed),
            see_also: vec![NamedNode::new_unchecked("http://runner/log/1")],
            error: Some(JobError {
                name: "Validation failed".into(),
                description: None,
            }),
        });
        assert!(job.error.is_some());

        let transition = job
            .apply(JobUpdate::status(modified, ActionStatus::Active))
            .unwrap();

        assert!(job.error.is_none());
        assert_eq!(job.see_also, vec![NamedNode::new_unchecked("http://runner/log/1")]);
        assert!(transition.reopens_terminal());
    }
}
