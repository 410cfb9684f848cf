// Copyright 2025 Cowboy AI, LLC.

//! CSV on the Web description of a table
//!
//! The transform pipeline reads one CSVW table description per mapped table.
//! Literal mappings become columns with a property URL, unmapped source columns
//! are suppressed, and reference mappings become virtual columns whose value
//! URL is the referenced table's identifier template rewritten to this table's
//! column names.

use crate::entity::ResourceId;
use crate::errors::DomainResult;
use crate::model::{
    ColumnMapping, ColumnMappingKind, CsvDialect, CsvMapping, CsvSource, ReferenceMapping, Table,
};
use crate::store::{GraphStore, ResourceStore};
use crate::vocab::Csvw;
use futures::future::try_join_all;
use serde::Serialize;
use tracing::debug;

/// A CSVW table description
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvwTable {
    /// JSON-LD context
    #[serde(rename = "@context")]
    pub context: &'static str,
    /// The CSV file described
    pub url: String,
    /// How to parse the file
    pub dialect: CsvDialect,
    /// Columns and row identifiers
    pub table_schema: CsvwSchema,
}

/// Schema part of a CSVW table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvwSchema {
    /// Row subject template
    pub about_url: String,
    /// Columns in source order, virtual columns last
    #[serde(rename = "column")]
    pub columns: Vec<CsvwColumn>,
}

/// One CSVW column
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvwColumn {
    /// Header name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Predicate of produced triples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_url: Option<String>,
    /// Object IRI template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_url: Option<String>,
    /// Literal datatype
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    /// Literal language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Value for empty cells
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Whether the column produces no triples
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub suppress_output: bool,
    /// Whether the column has no cells of its own
    #[serde(rename = "virtual", skip_serializing_if = "std::ops::Not::not")]
    pub is_virtual: bool,
}

impl CsvwTable {
    /// Serialize to pretty JSON-LD
    pub fn to_json(&self) -> DomainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the CSVW description of a table from its source and column mappings
pub async fn table_csvw<G: GraphStore + ?Sized>(
    table_id: &ResourceId<Table>,
    store: &ResourceStore<G>,
) -> DomainResult<CsvwTable> {
    let table = store.get(table_id).await?;
    let (csv_mapping, source) =
        tokio::try_join!(store.get(&table.csv_mapping), store.get(&table.csv_source))?;
    let column_mappings = try_join_all(table.column_mappings().map(|id| store.get(id))).await?;

    let mut columns = Vec::with_capacity(source.columns().len());
    for column in source.sorted_columns() {
        let literal = column_mappings.iter().find_map(|mapping| match &mapping.kind {
            ColumnMappingKind::Literal(literal) if literal.source_column == column.id => {
                Some((mapping, literal))
            }
            _ => None,
        });

        let csvw_column = match literal {
            Some((mapping, literal)) => CsvwColumn {
                title: Some(column.name.clone()),
                property_url: Some(csv_mapping.resolve(&mapping.target_property)?.into_string()),
                datatype: literal.datatype.as_ref().map(|datatype| datatype.as_str().to_string()),
                lang: literal.language.clone(),
                default: literal.default_value.as_ref().map(|value| value.value().to_string()),
                ..CsvwColumn::default()
            },
            None => CsvwColumn {
                title: Some(column.name.clone()),
                suppress_output: true,
                ..CsvwColumn::default()
            },
        };
        columns.push(csvw_column);
    }

    for mapping in &column_mappings {
        if let ColumnMappingKind::Reference(reference) = &mapping.kind {
            let column = reference_column(&csv_mapping, &source, mapping, reference, store).await?;
            columns.push(column);
        }
    }

    debug!(table = %table.id, columns = columns.len(), "built csvw");
    Ok(CsvwTable {
        context: Csvw::CONTEXT,
        url: source.id.to_string(),
        dialect: source.dialect.clone(),
        table_schema: CsvwSchema {
            about_url: format!("{}{}", csv_mapping.namespace, table.identifier_template),
            columns,
        },
    })
}

async fn reference_column<G: GraphStore + ?Sized>(
    csv_mapping: &CsvMapping,
    source: &CsvSource,
    mapping: &ColumnMapping,
    reference: &ReferenceMapping,
    store: &ResourceStore<G>,
) -> DomainResult<CsvwColumn> {
    let referenced = store.get(&reference.referenced_table).await?;
    let referenced_source = store.get(&referenced.csv_source).await?;

    let mut template = referenced.identifier_template.clone();
    for pair in &reference.identifier_mappings {
        let own = source.require_column(&pair.source_column)?;
        let theirs = referenced_source.require_column(&pair.referenced_column)?;
        template = template.replace(
            &format!("{{{}}}", theirs.name),
            &format!("{{{}}}", own.name),
        );
    }

    Ok(CsvwColumn {
        property_url: Some(csv_mapping.resolve(&mapping.target_property)?.into_string()),
        value_url: Some(format!("{}{}", csv_mapping.namespace, template)),
        is_virtual: true,
        ..CsvwColumn::default()
    })
}
