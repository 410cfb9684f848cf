// Copyright 2025 Cowboy AI, LLC.

//! Read-only lookups across resources
//!
//! Commands use these for invariants that span more than the resources they
//! load themselves. Queries see committed state only; nothing staged in the
//! caller's unit of work is visible to them.

mod in_memory;

use crate::entity::ResourceId;
use crate::errors::DomainResult;
use crate::model::{ColumnMapping, CsvMapping, CsvSource, DimensionMetadataCollection, Table};
use async_trait::async_trait;
use oxrdf::NamedNode;
use std::sync::Arc;

/// Lookups of a project's dimension metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DimensionMetadataQueries: Send + Sync {
    /// The dimension metadata collection of the project owning `csv_mapping`
    ///
    /// Fails with `NotFound` when there is none and with `InconsistentState`
    /// when there is more than one.
    async fn get_dimension_metadata_collection(
        &self,
        csv_mapping: &ResourceId<CsvMapping>,
    ) -> DomainResult<ResourceId<DimensionMetadataCollection>>;
}

/// Lookups across column mappings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ColumnMappingQueries: Send + Sync {
    /// Whether a mapping in any table of `csv_mapping`, other than `except`,
    /// targets the resolved property `dimension`
    async fn dimension_is_used_by_other_mapping(
        &self,
        csv_mapping: &ResourceId<CsvMapping>,
        dimension: &NamedNode,
        except: &ResourceId<ColumnMapping>,
    ) -> DomainResult<bool>;
}

/// Lookups of tables
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableQueries: Send + Sync {
    /// Tables built on a source
    async fn linked_tables_for_source(
        &self,
        source: &ResourceId<CsvSource>,
    ) -> DomainResult<Vec<ResourceId<Table>>>;

    /// Tables of a CSV mapping
    async fn tables_for_mapping(
        &self,
        csv_mapping: &ResourceId<CsvMapping>,
    ) -> DomainResult<Vec<ResourceId<Table>>>;

    /// The table owning a column mapping; `NotFound` if no table links it
    async fn table_for_column_mapping(
        &self,
        column_mapping: &ResourceId<ColumnMapping>,
    ) -> DomainResult<ResourceId<Table>>;
}

/// Lookups of CSV sources
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CsvSourceQueries: Send + Sync {
    /// Whether `csv_mapping` already has a source with this file name
    async fn source_with_filename_exists(
        &self,
        csv_mapping: &ResourceId<CsvMapping>,
        file_name: &str,
    ) -> DomainResult<bool>;
}

/// The query collaborators commands depend on
#[derive(Clone)]
pub struct QueryServices {
    /// Dimension metadata lookups
    pub dimension_metadata: Arc<dyn DimensionMetadataQueries>,
    /// Column mapping lookups
    pub column_mappings: Arc<dyn ColumnMappingQueries>,
    /// Table lookups
    pub tables: Arc<dyn TableQueries>,
    /// CSV source lookups
    pub sources: Arc<dyn CsvSourceQueries>,
}

impl QueryServices {
    /// Answer every query from one backend
    pub fn from_backend<Q>(backend: Arc<Q>) -> Self
    where
        Q: DimensionMetadataQueries
            + ColumnMappingQueries
            + TableQueries
            + CsvSourceQueries
            + 'static,
    {
        Self {
            dimension_metadata: backend.clone(),
            column_mappings: backend.clone(),
            tables: backend.clone(),
            sources: backend,
        }
    }
}
