// Copyright 2025 Cowboy AI, LLC.

//! Table creation and deletion

use crate::entity::ResourceId;
use crate::errors::{DomainError, DomainResult};
use crate::identifiers;
use crate::model::{identifier_template, ColumnMapping, CsvSource, Table};
use crate::queries::{ColumnMappingQueries, DimensionMetadataQueries};
use crate::store::{GraphStore, ResourceStore};
use futures::future::try_join_all;
use oxrdf::NamedNode;
use std::collections::HashSet;
use tracing::{debug, info};

/// Create a table on a CSV source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    /// Table collection the table is posted to
    pub table_collection: NamedNode,
    /// Display name; required
    pub name: Option<String>,
    /// Source providing the rows
    pub csv_source: ResourceId<CsvSource>,
    /// Explicit identifier template; synthesized from the columns when blank
    pub identifier_template: Option<String>,
    /// Display color
    pub color: Option<String>,
    /// Whether rows become observations
    pub is_observation_table: bool,
    /// Columns to map with default literal mappings
    pub columns: Vec<NamedNode>,
}

/// Create a table, its default column mappings and, for observation tables,
/// their dimension metadata
pub async fn create_table<G: GraphStore + ?Sized>(
    command: CreateTable,
    store: &ResourceStore<G>,
    dimension_metadata: &dyn DimensionMetadataQueries,
) -> DomainResult<ResourceId<Table>> {
    let name = match command.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            return Err(DomainError::ValidationError(
                "table name missing from the payload".to_string(),
            ))
        }
    };

    let mut seen = HashSet::with_capacity(command.columns.len());
    if let Some(column) = command.columns.iter().find(|&column| !seen.insert(column)) {
        return Err(DomainError::ValidationError(format!(
            "column {column} is listed more than once"
        )));
    }

    let csv_mapping_id = identifiers::csv_mapping_of_table_collection(&command.table_collection)?;
    let (mut csv_mapping, source) =
        tokio::try_join!(store.get(&csv_mapping_id), store.get(&command.csv_source))?;

    let template = identifier_template(command.identifier_template.as_deref(), source.columns());
    let mut table = Table::new(
        identifiers::table(&csv_mapping.id, &name)?,
        csv_mapping.id.clone(),
        source.id.clone(),
        name,
        template,
        command.is_observation_table,
    )
    .with_color(command.color);

    let mut collection = None;
    if table.is_observation_table && !command.columns.is_empty() {
        let collection_id = dimension_metadata
            .get_dimension_metadata_collection(&csv_mapping.id)
            .await?;
        collection = Some(store.get(&collection_id).await?);
    }

    let mut column_mappings = Vec::with_capacity(command.columns.len());
    for column_id in &command.columns {
        let column = source.require_column(column_id)?;
        let column_mapping = ColumnMapping::from_column(&table.id, column);

        if let Some(collection) = collection.as_mut() {
            let dimension = csv_mapping.resolve(&column_mapping.target_property)?;
            collection.add_dimension_metadata(dimension, Some(column.name.clone()));
        }

        table.add_column_mapping(column_mapping.id.clone());
        column_mappings.push(column_mapping);
    }

    let id = table.id.clone();
    let mapped = column_mappings.len();
    store.create(table).await?;
    for column_mapping in column_mappings {
        store.create(column_mapping).await?;
    }
    csv_mapping.add_table(id.clone());
    store.update(csv_mapping).await;
    if let Some(collection) = collection {
        store.update(collection).await;
    }
    store.save().await?;

    info!(table = %id, column_mappings = mapped, "created table");
    Ok(id)
}

/// Delete a table with all of its column mappings
///
/// For observation tables, dimension metadata is removed unless another
/// mapping, in any table of the project, still targets the same property.
pub async fn delete_table<G: GraphStore + ?Sized>(
    table_id: &ResourceId<Table>,
    store: &ResourceStore<G>,
    dimension_metadata: &dyn DimensionMetadataQueries,
    column_mapping_queries: &dyn ColumnMappingQueries,
) -> DomainResult<()> {
    let table = store.get(table_id).await?;
    let mut csv_mapping = store.get(&table.csv_mapping).await?;
    let column_mappings = try_join_all(table.column_mappings().map(|id| store.get(id))).await?;

    let mut collection = None;
    if table.is_observation_table && !column_mappings.is_empty() {
        let collection_id = dimension_metadata
            .get_dimension_metadata_collection(&csv_mapping.id)
            .await?;
        collection = Some(store.get(&collection_id).await?);
    }

    for column_mapping in &column_mappings {
        if let Some(collection) = collection.as_mut() {
            let dimension = csv_mapping.resolve(&column_mapping.target_property)?;
            let shared = column_mapping_queries
                .dimension_is_used_by_other_mapping(&csv_mapping.id, &dimension, &column_mapping.id)
                .await?;
            if shared {
                debug!(dimension = %dimension, "dimension still mapped elsewhere");
            } else {
                collection.remove_dimension_metadata(&dimension);
            }
        }
        store.delete(&column_mapping.id).await;
    }

    store.delete(&table.id).await;
    csv_mapping.remove_table(&table.id);
    store.update(csv_mapping).await;
    if let Some(collection) = collection {
        store.update(collection).await;
    }
    store.save().await?;

    info!(table = %table.id, column_mappings = column_mappings.len(), "deleted table");
    Ok(())
}
