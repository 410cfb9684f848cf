// Copyright 2025 Cowboy AI, LLC.

//! Upload bookkeeping of CSV sources

use crate::entity::ResourceId;
use crate::errors::{DomainError, DomainResult};
use crate::identifiers;
use crate::model::{CsvDialect, CsvMapping, CsvSource};
use crate::queries::{CsvSourceQueries, TableQueries};
use crate::storage::MediaStorage;
use crate::store::{GraphStore, ResourceStore};
use tracing::{info, warn};

/// Register an uploaded CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSource {
    /// Mapping the source is added to
    pub csv_mapping: ResourceId<CsvMapping>,
    /// Uploaded file name
    pub file_name: String,
    /// Where the bytes are stored
    pub media_path: Option<String>,
    /// Parsing dialect; defaults when absent
    pub dialect: Option<CsvDialect>,
    /// Header row, one entry per column
    pub header: Vec<String>,
}

/// Create a CSV source and link it from its mapping
///
/// File names are unique within a mapping.
pub async fn create_source<G: GraphStore + ?Sized>(
    command: CreateSource,
    store: &ResourceStore<G>,
    sources: &dyn CsvSourceQueries,
) -> DomainResult<ResourceId<CsvSource>> {
    if command.file_name.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "file name must not be blank".to_string(),
        ));
    }

    let mut csv_mapping = store.get(&command.csv_mapping).await?;
    if sources
        .source_with_filename_exists(&csv_mapping.id, &command.file_name)
        .await?
    {
        return Err(DomainError::rule(format!(
            "a file named '{}' was already uploaded",
            command.file_name
        )));
    }

    let id = identifiers::csv_source(&csv_mapping.project, &command.file_name)?;
    let mut source = CsvSource::from_header(
        id.clone(),
        csv_mapping.id.clone(),
        command.file_name,
        command.dialect.unwrap_or_default(),
        command.header,
    )?;
    if let Some(path) = command.media_path {
        source = source.with_media(path);
    }

    let columns = source.columns().len();
    store.create(source).await?;
    csv_mapping.add_source(id.clone());
    store.update(csv_mapping).await;
    store.save().await?;

    info!(source = %id, columns, "created csv source");
    Ok(id)
}

/// Delete a CSV source and its stored file
///
/// The stored file is removed on a best-effort basis. Tables built on the
/// source are left in place; callers delete them separately.
pub async fn delete_source<G: GraphStore + ?Sized>(
    source_id: &ResourceId<CsvSource>,
    store: &ResourceStore<G>,
    tables: &dyn TableQueries,
    media: &dyn MediaStorage,
) -> DomainResult<()> {
    let source = store.get(source_id).await?;

    // TODO: cascade to (or refuse on) dependent tables once the deletion order is settled
    let dependents = tables.linked_tables_for_source(source_id).await?;
    if !dependents.is_empty() {
        warn!(
            source = %source_id,
            tables = dependents.len(),
            "deleting a source that tables still use"
        );
    }

    if let Some(path) = source.media_path() {
        if let Err(error) = media.delete_file(path).await {
            warn!(source = %source_id, path, %error, "could not delete stored file");
        }
    }

    if let Some(mut csv_mapping) = store.find(&source.csv_mapping).await? {
        csv_mapping.remove_source(source_id);
        store.update(csv_mapping).await;
    }
    store.delete(source_id).await;
    store.save().await?;

    info!(source = %source_id, "deleted csv source");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::project_with_source;
    use crate::commands::{create_table, CreateTable};
    use crate::identifiers::table_collection;
    use crate::model::Table;
    use crate::queries::MockCsvSourceQueries;
    use crate::storage::InMemoryMediaStorage;

    #[tokio::test]
    async fn test_create_links_source_and_orders_columns() {
        let fixture = project_with_source(&["station", "year"]).await;

        let mapping = fixture.graph.get(&fixture.csv_mapping).await.unwrap();
        assert!(mapping.sources.contains(&fixture.source.id));
        assert_eq!(
            fixture.source.id.as_str(),
            "http://example.com/cube-project/ubd/csv-source/observations-csv"
        );
        assert_eq!(fixture.source.media_path(), Some("ubd/observations.csv"));
        let orders: Vec<_> = fixture.source.sorted_columns().iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[tokio::test]
    async fn test_duplicate_file_name_is_rejected() {
        let fixture = project_with_source(&["station"]).await;
        let mut queries = MockCsvSourceQueries::new();
        queries
            .expect_source_with_filename_exists()
            .withf(|_, file_name| file_name == "observations.csv")
            .returning(|_, _| Ok(true));

        let err = create_source(
            CreateSource {
                csv_mapping: fixture.csv_mapping.clone(),
                file_name: "observations.csv".to_string(),
                media_path: None,
                dialect: None,
                header: vec!["a".to_string()],
            },
            &fixture.store(),
            &queries,
        )
        .await
        .unwrap_err();

        assert!(err.is_business_rule_violation());
    }

    #[tokio::test]
    async fn test_delete_removes_file_and_link() {
        let fixture = project_with_source(&["station"]).await;
        let media = InMemoryMediaStorage::new();
        media.put("ubd/observations.csv").await;

        delete_source(&fixture.source.id, &fixture.store(), fixture.graph.as_ref(), &media)
            .await
            .unwrap();

        assert!(fixture.graph.get(&fixture.source.id).await.is_none());
        assert!(!media.contains("ubd/observations.csv").await);
        let mapping = fixture.graph.get(&fixture.csv_mapping).await.unwrap();
        assert!(mapping.sources.is_empty());
    }

    #[tokio::test]
    async fn test_delete_survives_storage_failure_and_leaves_tables() {
        let fixture = project_with_source(&["station"]).await;
        let table = create_table(
            CreateTable {
                table_collection: table_collection(&fixture.csv_mapping),
                name: Some("Stations".to_string()),
                csv_source: fixture.source.id.clone(),
                identifier_template: None,
                color: None,
                is_observation_table: false,
                columns: vec![],
            },
            &fixture.store(),
            fixture.graph.as_ref(),
        )
        .await
        .unwrap();

        delete_source(
            &fixture.source.id,
            &fixture.store(),
            fixture.graph.as_ref(),
            &InMemoryMediaStorage::unavailable(),
        )
        .await
        .unwrap();

        assert!(fixture.graph.get(&fixture.source.id).await.is_none());
        let dangling: Table = fixture.graph.get(&table).await.unwrap();
        assert_eq!(dangling.csv_source, fixture.source.id);
    }

    #[tokio::test]
    async fn test_delete_missing_source_is_not_found() {
        let fixture = project_with_source(&["station"]).await;
        let missing = fixture.project.child::<CsvSource>("csv-source/missing");

        let err = delete_source(
            &missing,
            &fixture.store(),
            fixture.graph.as_ref(),
            &InMemoryMediaStorage::new(),
        )
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
