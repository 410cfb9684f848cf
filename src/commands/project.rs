// Copyright 2025 Cowboy AI, LLC.

//! Project creation

use crate::config::CoreConfig;
use crate::entity::ResourceId;
use crate::errors::{DomainError, DomainResult};
use crate::identifiers;
use crate::model::{CsvMapping, Dataset, DimensionMetadataCollection, Project, ProjectSourceKind};
use crate::store::{GraphStore, ResourceStore};
use oxrdf::NamedNode;
use tracing::info;

/// Create a cube project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProject {
    /// Label the project identifier is minted from
    pub label: String,
    /// Creating user
    pub creator: NamedNode,
    /// Maintaining organization
    pub maintainer: NamedNode,
    /// Cube identifier within the maintainer's namespace
    pub cube_identifier: String,
    /// CSV upload or existing cube
    pub source_kind: ProjectSourceKind,
}

/// Create a project with its dataset and dimension metadata collection
///
/// CSV projects also get their CSV mapping.
pub async fn create_project<G: GraphStore + ?Sized>(
    command: CreateProject,
    config: &CoreConfig,
    store: &ResourceStore<G>,
) -> DomainResult<ResourceId<Project>> {
    if command.label.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "project label must not be blank".to_string(),
        ));
    }

    let id = identifiers::cube_project(&config.api_core_base, &command.label)?;
    let mut project = Project::new(
        id,
        command.label,
        command.creator,
        command.maintainer,
        command.cube_identifier,
    );
    let dataset = Dataset::new(&project);
    let collection = DimensionMetadataCollection::new(&dataset);

    if command.source_kind == ProjectSourceKind::Csv {
        let mapping = CsvMapping::new(&project.id);
        project.csv_mapping = Some(mapping.id.clone());
        store.create(mapping).await?;
    }

    let id = project.id.clone();
    store.create(project).await?;
    store.create(dataset).await?;
    store.create(collection).await?;
    store.save().await?;

    info!(project = %id, source_kind = ?command.source_kind, "created project");
    Ok(id)
}
