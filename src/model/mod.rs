// Copyright 2025 Cowboy AI, LLC.

//! # Domain entities
//!
//! Strongly typed views of the nodes that make up a cube project:
//!
//! - **Project** and its **Dataset**
//! - **CsvMapping**: namespace plus the sources and tables of a project
//! - **CsvSource**: an uploaded CSV file with dialect and ordered columns
//! - **Table**: a view over one source, owning column mappings
//! - **ColumnMapping**: `Literal` or `Reference` rule producing one property
//! - **DimensionMetadataCollection**: display metadata per cube dimension
//! - **Job**: one transform or publish run
//!
//! Entities are plain owned values. Commands load them from a
//! [`ResourceStore`](crate::store::ResourceStore), mutate them and stage them
//! back before the final commit.

mod column_mapping;
mod csv_mapping;
mod csv_source;
mod dimension_metadata;
mod job;
mod project;
mod table;

pub use column_mapping::{
    ColumnMapping, ColumnMappingKind, IdentifierMapping, LiteralMapping, ReferenceMapping,
    TargetProperty,
};
pub use csv_mapping::CsvMapping;
pub use csv_source::{identifier_template, CsvColumn, CsvDialect, CsvSource, MediaObject};
pub use dimension_metadata::{DimensionMetadata, DimensionMetadataCollection};
pub use job::{ActionStatus, Job, JobError, JobKind, JobUpdate};
pub use project::{Dataset, Project, ProjectSourceKind};
pub use table::Table;
