// Copyright 2025 Cowboy AI, LLC.

//! # Cube Creator Domain
//!
//! Domain model and consistency rules for turning uploaded CSV files into
//! RDF data cubes.
//!
//! A cube project owns a dataset, a CSV mapping with its uploaded sources and
//! tables, a collection of dimension metadata and the jobs that transform and
//! publish it. This crate provides:
//!
//! - **Identifiers**: typed resource IRIs minted under a configured base
//! - **Model**: the entities of a project and their local invariants
//! - **Store**: a unit of work over a graph store with one atomic commit
//! - **Queries**: cross-resource lookups used to enforce invariants
//! - **Commands**: create and delete operations that keep tables, column
//!   mappings and dimension metadata in step
//! - **Jobs**: pipeline triggers and status reports, including publish
//!   revision bookkeeping
//! - **CSVW**: the table descriptions the transform pipeline consumes
//!
//! ## Example
//!
//! ```rust
//! use cube_creator_domain::{
//!     CoreConfig, CreateProject, CubeProjectCommands, InMemoryGraphStore,
//!     InMemoryMediaStorage, QueryServices, RecordingPipelineTrigger,
//!     model::ProjectSourceKind,
//! };
//! use oxrdf::NamedNode;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> cube_creator_domain::DomainResult<()> {
//! let graph = Arc::new(InMemoryGraphStore::new());
//! let commands = CubeProjectCommands::new(
//!     graph.clone(),
//!     CoreConfig::new("http://example.com/"),
//!     QueryServices::from_backend(graph.clone()),
//!     Arc::new(InMemoryMediaStorage::new()),
//!     Arc::new(RecordingPipelineTrigger::new()),
//! );
//!
//! let project = commands
//!     .create_project(CreateProject {
//!         label: "Air quality".to_string(),
//!         creator: NamedNode::new_unchecked("http://example.com/user/jane"),
//!         maintainer: NamedNode::new_unchecked("http://example.com/org/bafu"),
//!         cube_identifier: "air-quality".to_string(),
//!         source_kind: ProjectSourceKind::Csv,
//!     })
//!     .await?;
//!
//! assert_eq!(project.as_str(), "http://example.com/cube-project/air-quality");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod entity;
mod errors;
mod state_machine;

pub mod commands;
pub mod csvw;
pub mod identifiers;
pub mod model;
pub mod pipeline;
pub mod queries;
pub mod storage;
pub mod store;
pub mod vocab;

// Re-export core types
pub use config::{CoreConfig, API_CORE_BASE_VAR};
pub use entity::{ResourceId, StoredResource};
pub use errors::{DomainError, DomainResult};
pub use state_machine::{State, StateTransition};

// Re-export the command surface
pub use commands::{
    ColumnMappingPayload, CreateColumnMapping, CreateJob, CreateProject, CreateSource,
    CreateTable, CubeProjectCommands, JobType,
};
pub use csvw::{table_csvw, CsvwTable};
pub use pipeline::{JobTrigger, PipelineTrigger, RecordingPipelineTrigger};
pub use queries::QueryServices;
pub use storage::{InMemoryMediaStorage, MediaStorage};
pub use store::{GraphStore, InMemoryGraphStore, ResourceStore};
