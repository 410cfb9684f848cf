// Copyright 2025 Cowboy AI, LLC.

//! Shared setup for command tests

use super::{create_project, create_source, CreateProject, CreateSource};
use crate::config::CoreConfig;
use crate::entity::ResourceId;
use crate::model::{CsvMapping, CsvSource, Project, ProjectSourceKind};
use crate::store::{InMemoryGraphStore, ResourceStore};
use oxrdf::NamedNode;
use std::sync::Arc;

pub(crate) struct Fixture {
    pub graph: Arc<InMemoryGraphStore>,
    pub project: ResourceId<Project>,
    pub csv_mapping: ResourceId<CsvMapping>,
    pub source: CsvSource,
}

impl Fixture {
    pub fn store(&self) -> ResourceStore<InMemoryGraphStore> {
        ResourceStore::new(self.graph.clone())
    }

    /// Identifier of a column of the main source
    pub fn column(&self, name: &str) -> NamedNode {
        column_of(&self.source, name)
    }

    pub async fn add_source(&self, file_name: &str, header: &[&str]) -> CsvSource {
        upload(&self.graph, &self.csv_mapping, file_name, header).await
    }
}

pub(crate) fn column_of(source: &CsvSource, name: &str) -> NamedNode {
    source
        .columns()
        .iter()
        .find(|column| column.name == name)
        .map(|column| column.id.clone())
        .unwrap()
}

async fn upload(
    graph: &Arc<InMemoryGraphStore>,
    csv_mapping: &ResourceId<CsvMapping>,
    file_name: &str,
    header: &[&str],
) -> CsvSource {
    let id = create_source(
        CreateSource {
            csv_mapping: csv_mapping.clone(),
            file_name: file_name.to_string(),
            media_path: Some(format!("ubd/{file_name}")),
            dialect: None,
            header: header.iter().map(|name| name.to_string()).collect(),
        },
        &ResourceStore::new(graph.clone()),
        graph.as_ref(),
    )
    .await
    .unwrap();
    graph.get(&id).await.unwrap()
}

/// A CSV project whose mapping namespace is `http://example.com/`, with one
/// uploaded source `observations.csv`
pub(crate) async fn project_with_source(header: &[&str]) -> Fixture {
    let graph = Arc::new(InMemoryGraphStore::new());
    let project = create_project(
        CreateProject {
            label: "UBD".to_string(),
            creator: NamedNode::new_unchecked("http://example.com/user/john"),
            maintainer: NamedNode::new_unchecked("http://example.com/org/bafu"),
            cube_identifier: "ubd/28".to_string(),
            source_kind: ProjectSourceKind::Csv,
        },
        &CoreConfig::new("http://example.com/"),
        &ResourceStore::new(graph.clone()),
    )
    .await
    .unwrap();

    let csv_mapping = crate::identifiers::csv_mapping(&project);
    let mapping = graph.get(&csv_mapping).await.unwrap();
    graph
        .insert(mapping.with_namespace("http://example.com/"))
        .await;

    let source = upload(&graph, &csv_mapping, "observations.csv", header).await;
    Fixture {
        graph,
        project,
        csv_mapping,
        source,
    }
}
