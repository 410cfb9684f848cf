// Copyright 2025 Cowboy AI, LLC.

//! Cube projects and their published dataset

use crate::entity::ResourceId;
use crate::identifiers;
use crate::model::{CsvMapping, DimensionMetadataCollection};
use chrono::{DateTime, Utc};
use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};

/// Where the data of a project comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectSourceKind {
    /// Uploaded CSV files mapped to a cube
    #[serde(rename = "CSV")]
    Csv,
    /// An already existing cube; no CSV mapping is created
    #[serde(rename = "ExistingCube")]
    ExistingCube,
}

/// A cube project
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Project identifier
    pub id: ResourceId<Project>,
    /// Human label the identifier was minted from
    pub label: String,
    /// User who created the project
    pub creator: NamedNode,
    /// Organization maintaining the published cube
    pub maintainer: NamedNode,
    /// Identifier of the cube inside the maintainer's namespace
    pub cube_identifier: String,
    /// CSV mapping, only for CSV projects
    pub csv_mapping: Option<ResourceId<CsvMapping>>,
    /// Dataset the cube is published as
    pub dataset: ResourceId<Dataset>,
    /// Named graph receiving the transformed cube
    pub cube_graph: NamedNode,
    /// Collection holding the project's jobs
    pub job_collection: NamedNode,
    published_revision: u32,
}

impl Project {
    /// Create a project with derived child identifiers and revision 0
    pub fn new(
        id: ResourceId<Project>,
        label: impl Into<String>,
        creator: NamedNode,
        maintainer: NamedNode,
        cube_identifier: impl Into<String>,
    ) -> Self {
        Self {
            dataset: identifiers::dataset(&id),
            cube_graph: identifiers::cube_graph(&id),
            job_collection: identifiers::job_collection(&id),
            id,
            label: label.into(),
            creator,
            maintainer,
            cube_identifier: cube_identifier.into(),
            csv_mapping: None,
            published_revision: 0,
        }
    }

    /// Number of successfully completed publish runs
    pub fn published_revision(&self) -> u32 {
        self.published_revision
    }

    /// Revision the next publish job will produce
    pub fn next_revision(&self) -> u32 {
        self.published_revision + 1
    }

    /// Record one more successful publish
    pub fn increment_published_revision(&mut self) -> u32 {
        self.published_revision += 1;
        self.published_revision
    }
}

/// The linked-data dataset a project publishes
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Dataset identifier
    pub id: ResourceId<Dataset>,
    /// Owning project
    pub project: ResourceId<Project>,
    /// Dimension display metadata of the cube
    pub dimension_metadata: ResourceId<DimensionMetadataCollection>,
    published: Option<DateTime<Utc>>,
}

impl Dataset {
    /// Create the dataset of a project
    pub fn new(project: &Project) -> Self {
        Self {
            id: project.dataset.clone(),
            project: project.id.clone(),
            dimension_metadata: identifiers::dimension_metadata_collection(&project.dataset),
            published: None,
        }
    }

    /// Date of the first successful publish, if any
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published
    }

    /// Stamp the first publish date; later calls leave it untouched
    ///
    /// Returns `true` when the date was set by this call.
    pub fn set_published_date(&mut self, date: DateTime<Utc>) -> bool {
        if self.published.is_some() {
            return false;
        }
        self.published = Some(date);
        true
    }
}
