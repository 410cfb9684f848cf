// Copyright 2025 Cowboy AI, LLC.

//! Job creation and status reports

use crate::entity::ResourceId;
use crate::errors::{DomainError, DomainResult};
use crate::identifiers;
use crate::model::{ActionStatus, Job, JobKind, JobUpdate, Project};
use crate::pipeline::{JobTrigger, PipelineTrigger};
use crate::queries::TableQueries;
use crate::state_machine::State;
use crate::store::{GraphStore, ResourceStore};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Which run to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    /// Transform the CSV sources into the cube graph
    Transform,
    /// Publish the cube as the next revision
    Publish,
}

/// Start a transform or publish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateJob {
    /// Project to run
    pub project: ResourceId<Project>,
    /// Transform or publish
    pub job_type: JobType,
    /// Creation time
    pub created: DateTime<Utc>,
}

/// Create a pending job and hand it to the pipeline
///
/// The job is committed before the pipeline is triggered; a rejected trigger
/// is returned as an error and the job stays stored.
pub async fn create_job<G: GraphStore + ?Sized>(
    command: CreateJob,
    store: &ResourceStore<G>,
    tables: &dyn TableQueries,
    pipeline: &dyn PipelineTrigger,
) -> DomainResult<ResourceId<Job>> {
    let project = store.get(&command.project).await?;

    let kind = match command.job_type {
        JobType::Transform => JobKind::Transform,
        JobType::Publish => JobKind::Publish {
            revision: project.next_revision(),
        },
    };

    let table_ids = match &project.csv_mapping {
        Some(csv_mapping) => tables.tables_for_mapping(csv_mapping).await?,
        None if kind == JobKind::Transform => {
            return Err(DomainError::rule(format!(
                "project {} has no CSV mapping to transform",
                project.id
            )))
        }
        None => Vec::new(),
    };

    let job = Job::new(
        identifiers::job(&project.id),
        project.id.clone(),
        kind,
        command.created,
    );
    let id = job.id.clone();
    store.create(job).await?;
    store.save().await?;
    info!(job = %id, kind = ?kind, tables = table_ids.len(), "created job");

    let trigger = JobTrigger {
        job: id.clone(),
        kind,
        tables: table_ids,
    };
    if let Err(error) = pipeline.trigger(&trigger).await {
        warn!(job = %id, %error, "pipeline rejected job");
        return Err(error);
    }
    Ok(id)
}

/// Apply a status report of the pipeline runner to a job
///
/// A completed publish job bumps the project's published revision; the first
/// revision also stamps the dataset's publish date.
pub async fn update_job<G: GraphStore + ?Sized>(
    job_id: &ResourceId<Job>,
    update: JobUpdate,
    store: &ResourceStore<G>,
) -> DomainResult<ResourceId<Job>> {
    let mut job = store.get(job_id).await?;

    if let Some(transition) = job.apply(update) {
        if transition.reopens_terminal() {
            warn!(
                job = %job.id,
                from = transition.from.name(),
                to = transition.to.name(),
                "job left a final status"
            );
        } else {
            debug!(
                job = %job.id,
                from = transition.from.name(),
                to = transition.to.name(),
                "job status changed"
            );
        }

        if let (ActionStatus::Completed, Some(revision)) = (transition.to, job.revision()) {
            let mut project = store.get(&job.project).await?;
            let published_revision = project.increment_published_revision();

            if revision == 1 {
                let mut dataset = store.get(&project.dataset).await?;
                if dataset.set_published_date(job.modified) {
                    store.update(dataset).await;
                }
            }

            info!(project = %project.id, published_revision, "publish completed");
            store.update(project).await;
        }
    }

    let id = job.id.clone();
    store.update(job).await;
    store.save().await?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{project_with_source, Fixture};
    use crate::model::{Dataset, JobError};
    use crate::pipeline::RecordingPipelineTrigger;
    use crate::queries::MockTableQueries;
    use chrono::TimeZone;
    use oxrdf::NamedNode;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 1, 12, minute, 0).unwrap()
    }

    #[tokio::test]
    async fn test_publish_job_gets_next_revision_and_is_triggered() {
        let fixture = project_with_source(&["year"]).await;
        let pipeline = RecordingPipelineTrigger::new();

        let id = create_job(
            CreateJob {
                project: fixture.project.clone(),
                job_type: JobType::Publish,
                created: at(0),
            },
            &fixture.store(),
            fixture.graph.as_ref(),
            &pipeline,
        )
        .await
        .unwrap();

        let job = fixture.graph.get(&id).await.unwrap();
        assert_eq!(job.kind, JobKind::Publish { revision: 1 });
        assert_eq!(job.action_status, ActionStatus::Potential);
        assert!(id.as_str().starts_with("http://example.com/cube-project/ubd/jobs/"));

        let triggered = pipeline.triggered().await;
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].job, id);
    }

    #[tokio::test]
    async fn test_rejected_trigger_keeps_job() {
        let fixture = project_with_source(&["year"]).await;
        let mut tables = MockTableQueries::new();
        tables.expect_tables_for_mapping().returning(|_| Ok(vec![]));

        let err = create_job(
            CreateJob {
                project: fixture.project.clone(),
                job_type: JobType::Transform,
                created: at(0),
            },
            &fixture.store(),
            &tables,
            &RecordingPipelineTrigger::rejecting(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DomainError::ExternalServiceError { .. }));
        assert_eq!(fixture.graph.all::<Job>().await.len(), 1);
    }

    async fn publish_job(fixture: &Fixture, revision: u32) -> ResourceId<Job> {
        let job = Job::new(
            identifiers::job(&fixture.project),
            fixture.project.clone(),
            JobKind::Publish { revision },
            at(0),
        );
        let id = job.id.clone();
        fixture.graph.insert(job).await;
        id
    }

    async fn state(fixture: &Fixture) -> (u32, Option<DateTime<Utc>>) {
        let project = fixture.graph.get(&fixture.project).await.unwrap();
        let dataset: Dataset = fixture.graph.get(&project.dataset).await.unwrap();
        (project.published_revision(), dataset.published())
    }

    #[tokio::test]
    async fn test_first_publish_stamps_date_once() {
        let fixture = project_with_source(&["year"]).await;
        let job = publish_job(&fixture, 1).await;

        update_job(&job, JobUpdate::status(at(5), ActionStatus::Completed), &fixture.store())
            .await
            .unwrap();
        assert_eq!(state(&fixture).await, (1, Some(at(5))));

        update_job(&job, JobUpdate::status(at(9), ActionStatus::Completed), &fixture.store())
            .await
            .unwrap();
        assert_eq!(state(&fixture).await, (2, Some(at(5))));
    }

    #[tokio::test]
    async fn test_later_revision_does_not_stamp_date() {
        let fixture = project_with_source(&["year"]).await;
        let job = publish_job(&fixture, 2).await;

        update_job(&job, JobUpdate::status(at(5), ActionStatus::Completed), &fixture.store())
            .await
            .unwrap();
        assert_eq!(state(&fixture).await, (1, None));
    }

    #[tokio::test]
    async fn test_transform_completion_has_no_side_effects() {
        let fixture = project_with_source(&["year"]).await;
        let job = Job::new(
            identifiers::job(&fixture.project),
            fixture.project.clone(),
            JobKind::Transform,
            at(0),
        );
        fixture.graph.insert(job.clone()).await;

        let update = JobUpdate::status(at(5), ActionStatus::Completed);
        update_job(&job.id, update, &fixture.store()).await.unwrap();

        assert_eq!(state(&fixture).await, (0, None));
        assert_eq!(
            fixture.graph.get(&job.id).await.unwrap().action_status,
            ActionStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_failed_report_records_error_and_links() {
        let fixture = project_with_source(&["year"]).await;
        let job = publish_job(&fixture, 1).await;
        let log = NamedNode::new_unchecked("http://runner.example.com/logs/42");

        update_job(
            &job,
            JobUpdate {
                modified: at(5),
                action_status: Some(ActionStatus::Failed),
                see_also: vec![log.clone()],
                error: Some(JobError {
                    name: "Transformation failed".to_string(),
                    description: Some("column 'year' is empty".to_string()),
                }),
            },
            &fixture.store(),
        )
        .await
        .unwrap();

        let stored = fixture.graph.get(&job).await.unwrap();
        assert_eq!(stored.action_status, ActionStatus::Failed);
        assert_eq!(stored.modified, at(5));
        assert_eq!(stored.see_also, vec![log]);
        assert!(stored.error.is_some());
        assert_eq!(state(&fixture).await, (0, None));
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let fixture = project_with_source(&["year"]).await;
        let err = update_job(
            &identifiers::job(&fixture.project),
            JobUpdate::status(at(5), ActionStatus::Active),
            &fixture.store(),
        )
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
