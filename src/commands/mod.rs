// Copyright 2025 Cowboy AI, LLC.

//! Domain commands
//!
//! Every command is a free function taking its parameters, a
//! [`ResourceStore`] and the collaborators it consults. A command either
//! fails before anything is written or ends with exactly one
//! [`save`](ResourceStore::save).
//!
//! [`CubeProjectCommands`] wires the collaborators once and opens a fresh
//! unit of work per call.

mod column_mapping;
mod csv_source;
mod job;
mod project;
mod table;

#[cfg(test)]
pub(crate) mod fixtures;

pub use column_mapping::{
    create_column_mapping, delete_column_mapping, ColumnMappingPayload, CreateColumnMapping,
};
pub use csv_source::{create_source, delete_source, CreateSource};
pub use job::{create_job, update_job, CreateJob, JobType};
pub use project::{create_project, CreateProject};
pub use table::{create_table, delete_table, CreateTable};

use crate::config::CoreConfig;
use crate::entity::ResourceId;
use crate::errors::DomainResult;
use crate::model::{ColumnMapping, CsvSource, Job, JobUpdate, Project, Table};
use crate::pipeline::PipelineTrigger;
use crate::queries::QueryServices;
use crate::storage::MediaStorage;
use crate::store::{GraphStore, ResourceStore};
use chrono::Utc;
use std::sync::Arc;

/// Command handler for cube projects
pub struct CubeProjectCommands<G: ?Sized> {
    graph: Arc<G>,
    config: CoreConfig,
    queries: QueryServices,
    media: Arc<dyn MediaStorage>,
    pipeline: Arc<dyn PipelineTrigger>,
}

impl<G: GraphStore + ?Sized> CubeProjectCommands<G> {
    /// Create a handler over a graph store and its collaborators
    pub fn new(
        graph: Arc<G>,
        config: CoreConfig,
        queries: QueryServices,
        media: Arc<dyn MediaStorage>,
        pipeline: Arc<dyn PipelineTrigger>,
    ) -> Self {
        Self {
            graph,
            config,
            queries,
            media,
            pipeline,
        }
    }

    /// The configuration identifiers are minted with
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    fn unit_of_work(&self) -> ResourceStore<G> {
        ResourceStore::new(self.graph.clone())
    }

    /// See [`create_project`]
    pub async fn create_project(&self, command: CreateProject) -> DomainResult<ResourceId<Project>> {
        create_project(command, &self.config, &self.unit_of_work()).await
    }

    /// See [`create_source`]
    pub async fn create_source(&self, command: CreateSource) -> DomainResult<ResourceId<CsvSource>> {
        create_source(command, &self.unit_of_work(), self.queries.sources.as_ref()).await
    }

    /// See [`delete_source`]
    pub async fn delete_source(&self, source: &ResourceId<CsvSource>) -> DomainResult<()> {
        delete_source(
            source,
            &self.unit_of_work(),
            self.queries.tables.as_ref(),
            self.media.as_ref(),
        )
        .await
    }

    /// See [`create_table`]
    pub async fn create_table(&self, command: CreateTable) -> DomainResult<ResourceId<Table>> {
        create_table(
            command,
            &self.unit_of_work(),
            self.queries.dimension_metadata.as_ref(),
        )
        .await
    }

    /// See [`delete_table`]
    pub async fn delete_table(&self, table: &ResourceId<Table>) -> DomainResult<()> {
        delete_table(
            table,
            &self.unit_of_work(),
            self.queries.dimension_metadata.as_ref(),
            self.queries.column_mappings.as_ref(),
        )
        .await
    }

    /// See [`create_column_mapping`]
    pub async fn create_column_mapping(
        &self,
        command: CreateColumnMapping,
    ) -> DomainResult<ResourceId<ColumnMapping>> {
        create_column_mapping(
            command,
            &self.unit_of_work(),
            self.queries.dimension_metadata.as_ref(),
        )
        .await
    }

    /// See [`delete_column_mapping`]
    pub async fn delete_column_mapping(
        &self,
        column_mapping: &ResourceId<ColumnMapping>,
    ) -> DomainResult<()> {
        delete_column_mapping(
            column_mapping,
            &self.unit_of_work(),
            self.queries.tables.as_ref(),
            self.queries.dimension_metadata.as_ref(),
            self.queries.column_mappings.as_ref(),
        )
        .await
    }

    /// Start a job now; see [`create_job`]
    pub async fn create_job(
        &self,
        project: &ResourceId<Project>,
        job_type: JobType,
    ) -> DomainResult<ResourceId<Job>> {
        let command = CreateJob {
            project: project.clone(),
            job_type,
            created: Utc::now(),
        };
        create_job(
            command,
            &self.unit_of_work(),
            self.queries.tables.as_ref(),
            self.pipeline.as_ref(),
        )
        .await
    }

    /// See [`update_job`]
    pub async fn update_job(
        &self,
        job: &ResourceId<Job>,
        update: JobUpdate,
    ) -> DomainResult<ResourceId<Job>> {
        update_job(job, update, &self.unit_of_work()).await
    }
}
