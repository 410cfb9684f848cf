// Copyright 2025 Cowboy AI, LLC.

//! Queries answered by scanning an [`InMemoryGraphStore`]

use super::{ColumnMappingQueries, CsvSourceQueries, DimensionMetadataQueries, TableQueries};
use crate::entity::{ResourceId, StoredResource};
use crate::errors::{DomainError, DomainResult};
use crate::model::{
    ColumnMapping, CsvMapping, CsvSource, DimensionMetadataCollection, Project, Table,
};
use crate::store::InMemoryGraphStore;
use async_trait::async_trait;
use oxrdf::NamedNode;
use std::collections::HashSet;

impl InMemoryGraphStore {
    async fn require<T: StoredResource>(&self, id: &ResourceId<T>) -> DomainResult<T> {
        self.get(id)
            .await
            .ok_or_else(|| DomainError::not_found(T::ENTITY_TYPE, id))
    }
}

#[async_trait]
impl DimensionMetadataQueries for InMemoryGraphStore {
    async fn get_dimension_metadata_collection(
        &self,
        csv_mapping: &ResourceId<CsvMapping>,
    ) -> DomainResult<ResourceId<DimensionMetadataCollection>> {
        let mapping = self.require(csv_mapping).await?;
        let project: Project = self.require(&mapping.project).await?;

        let mut collections: Vec<_> = self
            .all::<DimensionMetadataCollection>()
            .await
            .into_iter()
            .filter(|collection| collection.dataset == project.dataset)
            .map(|collection| collection.id)
            .collect();

        match collections.len() {
            0 => Err(DomainError::not_found(
                "DimensionMetadataCollection",
                format!("of project {}", project.id),
            )),
            1 => Ok(collections.remove(0)),
            n => Err(DomainError::InconsistentState(format!(
                "project {} has {n} dimension metadata collections",
                project.id
            ))),
        }
    }
}

#[async_trait]
impl ColumnMappingQueries for InMemoryGraphStore {
    async fn dimension_is_used_by_other_mapping(
        &self,
        csv_mapping: &ResourceId<CsvMapping>,
        dimension: &NamedNode,
        except: &ResourceId<ColumnMapping>,
    ) -> DomainResult<bool> {
        let mapping = self.require(csv_mapping).await?;
        let tables: HashSet<_> = self
            .all::<Table>()
            .await
            .into_iter()
            .filter(|table| &table.csv_mapping == csv_mapping)
            .map(|table| table.id)
            .collect();

        for column_mapping in self.all::<ColumnMapping>().await {
            if &column_mapping.id == except || !tables.contains(&column_mapping.table) {
                continue;
            }
            if &mapping.resolve(&column_mapping.target_property)? == dimension {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[async_trait]
impl TableQueries for InMemoryGraphStore {
    async fn linked_tables_for_source(
        &self,
        source: &ResourceId<CsvSource>,
    ) -> DomainResult<Vec<ResourceId<Table>>> {
        Ok(self
            .all::<Table>()
            .await
            .into_iter()
            .filter(|table| &table.csv_source == source)
            .map(|table| table.id)
            .collect())
    }

    async fn tables_for_mapping(
        &self,
        csv_mapping: &ResourceId<CsvMapping>,
    ) -> DomainResult<Vec<ResourceId<Table>>> {
        Ok(self
            .all::<Table>()
            .await
            .into_iter()
            .filter(|table| &table.csv_mapping == csv_mapping)
            .map(|table| table.id)
            .collect())
    }

    async fn table_for_column_mapping(
        &self,
        column_mapping: &ResourceId<ColumnMapping>,
    ) -> DomainResult<ResourceId<Table>> {
        self.all::<Table>()
            .await
            .into_iter()
            .find(|table| table.column_mappings().any(|id| id == column_mapping))
            .map(|table| table.id)
            .ok_or_else(|| DomainError::not_found("Table", format!("owning {column_mapping}")))
    }
}

#[async_trait]
impl CsvSourceQueries for InMemoryGraphStore {
    async fn source_with_filename_exists(
        &self,
        csv_mapping: &ResourceId<CsvMapping>,
        file_name: &str,
    ) -> DomainResult<bool> {
        Ok(self
            .all::<CsvSource>()
            .await
            .iter()
            .any(|source| &source.csv_mapping == csv_mapping && source.name == file_name))
    }
}
