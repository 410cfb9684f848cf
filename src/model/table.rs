// Copyright 2025 Cowboy AI, LLC.

//! Tables: views over a CSV source that own column mappings

use crate::entity::ResourceId;
use crate::model::{ColumnMapping, CsvMapping, CsvSource};
use indexmap::IndexSet;

/// A table of a CSV mapping
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Table identifier
    pub id: ResourceId<Table>,
    /// Owning CSV mapping
    pub csv_mapping: ResourceId<CsvMapping>,
    /// Source the rows come from
    pub csv_source: ResourceId<CsvSource>,
    /// Display name
    pub name: String,
    /// Display color
    pub color: Option<String>,
    /// Row identifier template built from `{column}` placeholders
    pub identifier_template: String,
    /// Whether rows become cube observations
    pub is_observation_table: bool,
    column_mappings: IndexSet<ResourceId<ColumnMapping>>,
}

impl Table {
    /// Create a table without column mappings
    pub fn new(
        id: ResourceId<Table>,
        csv_mapping: ResourceId<CsvMapping>,
        csv_source: ResourceId<CsvSource>,
        name: impl Into<String>,
        identifier_template: impl Into<String>,
        is_observation_table: bool,
    ) -> Self {
        Self {
            id,
            csv_mapping,
            csv_source,
            name: name.into(),
            color: None,
            identifier_template: identifier_template.into(),
            is_observation_table,
            column_mappings: IndexSet::new(),
        }
    }

    /// Set the display color
    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    /// Column mappings in creation order
    pub fn column_mappings(&self) -> impl Iterator<Item = &ResourceId<ColumnMapping>> {
        self.column_mappings.iter()
    }

    /// Number of column mappings
    pub fn column_mapping_count(&self) -> usize {
        self.column_mappings.len()
    }

    /// Link a column mapping; returns `false` if it was already linked
    pub fn add_column_mapping(&mut self, mapping: ResourceId<ColumnMapping>) -> bool {
        self.column_mappings.insert(mapping)
    }

    /// Retract a column mapping link
    pub fn remove_column_mapping(&mut self, mapping: &ResourceId<ColumnMapping>) -> bool {
        self.column_mappings.shift_remove(mapping)
    }
}
