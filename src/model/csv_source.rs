// Copyright 2025 Cowboy AI, LLC.

//! Uploaded CSV files and their columns

use crate::entity::ResourceId;
use crate::errors::{DomainError, DomainResult};
use crate::identifiers;
use crate::model::CsvMapping;
use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How a CSV file is to be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvDialect {
    /// Field separator
    pub delimiter: char,
    /// Quote character
    pub quote_char: char,
    /// Whether the first row holds column names
    pub header: bool,
}

impl Default for CsvDialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_char: '"',
            header: true,
        }
    }
}

/// Reference to the externally stored bytes of a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaObject {
    /// Media identifier
    pub id: NamedNode,
    /// Storage path of the file
    pub identifier: String,
}

/// A column of a CSV source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvColumn {
    /// Column identifier
    pub id: NamedNode,
    /// Header name
    pub name: String,
    /// Position of the column; unique within its source
    pub order: u32,
}

impl CsvColumn {
    /// Create a column
    pub fn new(id: NamedNode, name: impl Into<String>, order: u32) -> Self {
        Self {
            id,
            name: name.into(),
            order,
        }
    }
}

/// Metadata of an uploaded CSV file
#[derive(Debug, Clone, PartialEq)]
pub struct CsvSource {
    /// Source identifier
    pub id: ResourceId<CsvSource>,
    /// Owning CSV mapping
    pub csv_mapping: ResourceId<CsvMapping>,
    /// File name
    pub name: String,
    /// Stored file, if uploaded
    pub associated_media: Option<MediaObject>,
    /// Parsing dialect
    pub dialect: CsvDialect,
    /// Parse error reported for the file
    pub error: Option<String>,
    columns: Vec<CsvColumn>,
}

impl CsvSource {
    /// Create a source, rejecting duplicate column orders and identifiers
    pub fn new(
        id: ResourceId<CsvSource>,
        csv_mapping: ResourceId<CsvMapping>,
        name: impl Into<String>,
        dialect: CsvDialect,
        columns: Vec<CsvColumn>,
    ) -> DomainResult<Self> {
        let mut orders = HashSet::with_capacity(columns.len());
        if let Some(column) = columns.iter().find(|c| !orders.insert(c.order)) {
            return Err(DomainError::ValidationError(format!(
                "column '{}' of source {id} reuses order {}",
                column.name, column.order
            )));
        }

        let mut ids = HashSet::with_capacity(columns.len());
        if let Some(column) = columns.iter().find(|c| !ids.insert(&c.id)) {
            return Err(DomainError::ValidationError(format!(
                "column '{}' of source {id} reuses identifier {}",
                column.name, column.id
            )));
        }

        Ok(Self {
            id,
            csv_mapping,
            name: name.into(),
            associated_media: None,
            dialect,
            error: None,
            columns,
        })
    }

    /// Create a source from header names, ordered by their position
    pub fn from_header<I, S>(
        id: ResourceId<CsvSource>,
        csv_mapping: ResourceId<CsvMapping>,
        name: impl Into<String>,
        dialect: CsvDialect,
        header: I,
    ) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = header
            .into_iter()
            .zip(0u32..)
            .map(|(column_name, order)| {
                let column_name = column_name.into();
                CsvColumn::new(
                    identifiers::csv_column(&id, order, &column_name),
                    column_name,
                    order,
                )
            })
            .collect();
        Self::new(id, csv_mapping, name, dialect, columns)
    }

    /// Attach the storage path of the uploaded file
    pub fn with_media(mut self, path: impl Into<String>) -> Self {
        self.associated_media = Some(MediaObject {
            id: identifiers::associated_media(&self.id),
            identifier: path.into(),
        });
        self
    }

    /// Columns in insertion order
    pub fn columns(&self) -> &[CsvColumn] {
        &self.columns
    }

    /// Columns sorted by their order index
    pub fn sorted_columns(&self) -> Vec<&CsvColumn> {
        let mut columns: Vec<_> = self.columns.iter().collect();
        columns.sort_by_key(|column| column.order);
        columns
    }

    /// Find a column by identifier
    pub fn column(&self, id: &NamedNode) -> Option<&CsvColumn> {
        self.columns.iter().find(|column| &column.id == id)
    }

    /// Find a column by identifier, failing with `NotFound`
    pub fn require_column(&self, id: &NamedNode) -> DomainResult<&CsvColumn> {
        self.column(id)
            .ok_or_else(|| DomainError::not_found("CsvColumn", id.as_str()))
    }

    /// Storage path of the uploaded file, if any
    pub fn media_path(&self) -> Option<&str> {
        self.associated_media
            .as_ref()
            .map(|media| media.identifier.as_str())
            .filter(|path| !path.is_empty())
    }
}

/// Identifier template of a table
///
/// A non-blank explicit template wins verbatim; otherwise every column becomes
/// a `{name}` placeholder, ordered by column order and joined with `/`.
pub fn identifier_template(explicit: Option<&str>, columns: &[CsvColumn]) -> String {
    if let Some(template) = explicit.filter(|t| !t.trim().is_empty()) {
        return template.to_string();
    }

    let mut sorted: Vec<_> = columns.iter().collect();
    sorted.sort_by_key(|column| column.order);
    sorted
        .iter()
        .map(|column| format!("{{{}}}", column.name))
        .collect::<Vec<_>>()
        .join("/")
}
