// Copyright 2025 Cowboy AI, LLC.

//! Column mapping creation and deletion

use crate::entity::ResourceId;
use crate::errors::{DomainError, DomainResult};
use crate::model::{ColumnMapping, IdentifierMapping, Table, TargetProperty};
use crate::queries::{ColumnMappingQueries, DimensionMetadataQueries, TableQueries};
use crate::store::{GraphStore, ResourceStore};
use futures::future::try_join_all;
use oxrdf::{Literal, NamedNode};
use tracing::{debug, info};

/// Shape of a new column mapping
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnMappingPayload {
    /// Map one column of the table's source to a literal value
    Literal {
        /// Column providing the value
        source_column: NamedNode,
        /// Datatype of the produced literals
        datatype: Option<NamedNode>,
        /// Language tag of the produced literals
        language: Option<String>,
        /// Value for empty cells
        default_value: Option<Literal>,
    },
    /// Link rows to rows of another table
    Reference {
        /// Table whose rows are linked
        referenced_table: ResourceId<Table>,
        /// Identifier column pairs joining the two tables
        identifier_mappings: Vec<IdentifierMapping>,
    },
}

/// Create a column mapping on a table
#[derive(Debug, Clone, PartialEq)]
pub struct CreateColumnMapping {
    /// Owning table
    pub table: ResourceId<Table>,
    /// Property the mapping produces
    pub target_property: TargetProperty,
    /// Literal or reference specifics
    pub payload: ColumnMappingPayload,
}

/// Create a column mapping and, for observation tables, its dimension metadata
///
/// Observation tables reject a second mapping to the same resolved property.
/// Every referenced column is resolved before anything is staged.
pub async fn create_column_mapping<G: GraphStore + ?Sized>(
    command: CreateColumnMapping,
    store: &ResourceStore<G>,
    dimension_metadata: &dyn DimensionMetadataQueries,
) -> DomainResult<ResourceId<ColumnMapping>> {
    let mut table = store.get(&command.table).await?;

    let mut observation = None;
    if table.is_observation_table {
        let csv_mapping = store.get(&table.csv_mapping).await?;
        let dimension = csv_mapping.resolve(&command.target_property)?;
        let existing = try_join_all(table.column_mappings().map(|id| store.get(id))).await?;
        for column_mapping in &existing {
            if csv_mapping.resolve(&column_mapping.target_property)? == dimension {
                return Err(DomainError::rule(format!(
                    "table {} already maps property {}",
                    table.id,
                    dimension.as_str()
                )));
            }
        }
        observation = Some((csv_mapping, dimension));
    }

    let column_mapping = match command.payload {
        ColumnMappingPayload::Literal {
            source_column,
            datatype,
            language,
            default_value,
        } => {
            let source = store.get(&table.csv_source).await?;
            let column = source.require_column(&source_column)?;
            ColumnMapping::literal(
                &table.id,
                column,
                command.target_property,
                datatype,
                language,
                default_value,
            )
        }
        ColumnMappingPayload::Reference {
            referenced_table,
            identifier_mappings,
        } => {
            let referenced = store.get(&referenced_table).await?;
            let (source, referenced_source) = tokio::try_join!(
                store.get(&table.csv_source),
                store.get(&referenced.csv_source)
            )?;
            for pair in &identifier_mappings {
                source.require_column(&pair.source_column)?;
                referenced_source.require_column(&pair.referenced_column)?;
            }
            debug!(
                referenced_table = %referenced.id,
                pairs = identifier_mappings.len(),
                "resolved identifier mappings"
            );
            ColumnMapping::reference(
                &table.id,
                command.target_property,
                referenced.id,
                identifier_mappings,
            )
        }
    };

    let mut collection = None;
    if let Some((csv_mapping, dimension)) = observation {
        let collection_id = dimension_metadata
            .get_dimension_metadata_collection(&csv_mapping.id)
            .await?;
        let mut dimensions = store.get(&collection_id).await?;
        dimensions.add_dimension_metadata(dimension, Some(column_mapping.target_property.label()));
        collection = Some(dimensions);
    }

    let id = column_mapping.id.clone();
    table.add_column_mapping(id.clone());
    store.create(column_mapping).await?;
    store.update(table).await;
    if let Some(collection) = collection {
        store.update(collection).await;
    }
    store.save().await?;

    info!(column_mapping = %id, table = %command.table, "created column mapping");
    Ok(id)
}

/// Delete a column mapping
///
/// For observation tables the dimension metadata is removed unless another
/// mapping, in any table of the project, still targets the same property.
pub async fn delete_column_mapping<G: GraphStore + ?Sized>(
    column_mapping_id: &ResourceId<ColumnMapping>,
    store: &ResourceStore<G>,
    table_queries: &dyn TableQueries,
    dimension_metadata: &dyn DimensionMetadataQueries,
    column_mapping_queries: &dyn ColumnMappingQueries,
) -> DomainResult<()> {
    let column_mapping = store.get(column_mapping_id).await?;
    let table_id = table_queries.table_for_column_mapping(column_mapping_id).await?;
    let mut table = store.get(&table_id).await?;
    let csv_mapping = store.get(&table.csv_mapping).await?;

    if table.is_observation_table {
        let dimension = csv_mapping.resolve(&column_mapping.target_property)?;
        let shared = column_mapping_queries
            .dimension_is_used_by_other_mapping(&csv_mapping.id, &dimension, column_mapping_id)
            .await?;
        if shared {
            debug!(dimension = %dimension, "dimension still mapped elsewhere");
        } else {
            let collection_id = dimension_metadata
                .get_dimension_metadata_collection(&csv_mapping.id)
                .await?;
            let mut collection = store.get(&collection_id).await?;
            if collection.remove_dimension_metadata(&dimension).is_some() {
                store.update(collection).await;
            }
        }
    }

    table.remove_column_mapping(column_mapping_id);
    store.update(table).await;
    store.delete(column_mapping_id).await;
    store.save().await?;

    info!(column_mapping = %column_mapping_id, "deleted column mapping");
    Ok(())
}
