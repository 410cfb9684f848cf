// Copyright 2025 Cowboy AI, LLC.

//! Identifier minting for every resource of a cube project
//!
//! All identifiers except jobs and column mappings are derived
//! deterministically from the parent identifier and a slug of a human label.
//! Jobs and column mappings get a random URL-safe suffix so repeated runs
//! never collide.

use crate::entity::ResourceId;
use crate::errors::{DomainError, DomainResult};
use crate::model::{
    ColumnMapping, CsvMapping, CsvSource, Dataset, DimensionMetadataCollection, Job, Project,
    Table,
};
use oxrdf::NamedNode;
use rand::Rng;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const NANOID_ALPHABET: &[u8; 64] =
    b"_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of random job identifiers
pub const JOB_ID_LENGTH: usize = 21;

/// Length of the random suffix of column mapping identifiers
pub const COLUMN_MAPPING_SUFFIX_LENGTH: usize = 8;

const TABLE_COLLECTION_SEGMENT: &str = "tables";

/// Turn a human label into a URL path segment
///
/// Diacritics are stripped, ASCII letters are lowercased and every run of other
/// characters collapses into a single `-`. An empty or punctuation-only label
/// yields an empty slug.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;

    for c in label.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Generate a random URL-safe identifier
pub fn nanoid(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| NANOID_ALPHABET[rng.gen_range(0..NANOID_ALPHABET.len())] as char)
        .collect()
}

fn non_empty_slug(label: &str, what: &str) -> DomainResult<String> {
    let slug = slugify(label);
    if slug.is_empty() {
        return Err(DomainError::ValidationError(format!(
            "{what} '{label}' does not produce an identifier"
        )));
    }
    Ok(slug)
}

/// Cube project identifier: `{base}cube-project/{slug}`
pub fn cube_project(api_core_base: &str, label: &str) -> DomainResult<ResourceId<Project>> {
    let slug = non_empty_slug(label, "project label")?;
    ResourceId::new(format!("{api_core_base}cube-project/{slug}"))
}

/// The single CSV mapping of a project
pub fn csv_mapping(project: &ResourceId<Project>) -> ResourceId<CsvMapping> {
    project.child("csv-mapping")
}

/// Collection of sources of a CSV mapping
pub fn csv_source_collection(csv_mapping: &ResourceId<CsvMapping>) -> NamedNode {
    csv_mapping.child::<()>("sources").into_named_node()
}

/// Collection of tables of a CSV mapping
pub fn table_collection(csv_mapping: &ResourceId<CsvMapping>) -> NamedNode {
    csv_mapping
        .child::<()>(TABLE_COLLECTION_SEGMENT)
        .into_named_node()
}

/// Recover the CSV mapping a table collection belongs to
pub fn csv_mapping_of_table_collection(
    table_collection: &NamedNode,
) -> DomainResult<ResourceId<CsvMapping>> {
    table_collection
        .as_str()
        .strip_suffix(TABLE_COLLECTION_SEGMENT)
        .and_then(|parent| parent.strip_suffix('/'))
        .ok_or_else(|| {
            DomainError::ValidationError(format!(
                "{} is not a table collection",
                table_collection.as_str()
            ))
        })
        .and_then(ResourceId::new)
}

/// Dataset published by a project
pub fn dataset(project: &ResourceId<Project>) -> ResourceId<Dataset> {
    project.child("dataset")
}

/// Named graph receiving the generated cube
pub fn cube_graph(project: &ResourceId<Project>) -> NamedNode {
    project.child::<()>("cube-data").into_named_node()
}

/// Dimension metadata collection of a dataset
pub fn dimension_metadata_collection(
    dataset: &ResourceId<Dataset>,
) -> ResourceId<DimensionMetadataCollection> {
    dataset.child("dimension-metadata")
}

/// Dimension metadata entry about a (resolved) target property
pub fn dimension_metadata(
    collection: &ResourceId<DimensionMetadataCollection>,
    about: &NamedNode,
) -> NamedNode {
    collection
        .child::<()>(&local_name(about))
        .into_named_node()
}

/// CSV source of a project, keyed by file name
pub fn csv_source(project: &ResourceId<Project>, file_name: &str) -> DomainResult<ResourceId<CsvSource>> {
    let slug = non_empty_slug(file_name, "file name")?;
    Ok(project.child(&format!("csv-source/{slug}")))
}

/// Column of a CSV source, keyed by its position and name
///
/// The position keeps headers that slugify alike (`Year` and `year`) apart.
pub fn csv_column(source: &ResourceId<CsvSource>, order: u32, column_name: &str) -> NamedNode {
    let segment = match slugify(column_name) {
        slug if slug.is_empty() => order.to_string(),
        slug => format!("{order}-{slug}"),
    };
    source
        .child::<()>(&format!("column/{segment}"))
        .into_named_node()
}

/// Externally stored bytes of a CSV source
pub fn associated_media(source: &ResourceId<CsvSource>) -> NamedNode {
    NamedNode::new_unchecked(format!("{}/media/", source.as_str()))
}

/// Table of a CSV mapping
pub fn table(csv_mapping: &ResourceId<CsvMapping>, name: &str) -> DomainResult<ResourceId<Table>> {
    let slug = non_empty_slug(name, "table name")?;
    Ok(csv_mapping.child(&format!("table-{slug}")))
}

/// Column mapping of a table, labelled by its column or property name
pub fn column_mapping(table: &ResourceId<Table>, label: &str) -> ResourceId<ColumnMapping> {
    let suffix = nanoid(COLUMN_MAPPING_SUFFIX_LENGTH);
    match slugify(label) {
        slug if slug.is_empty() => table.child(&suffix),
        slug => table.child(&format!("{slug}-{suffix}")),
    }
}

/// Collection of jobs of a project
pub fn job_collection(project: &ResourceId<Project>) -> NamedNode {
    project.child::<()>("jobs").into_named_node()
}

/// A new, never repeating job identifier
pub fn job(project: &ResourceId<Project>) -> ResourceId<Job> {
    project.child(&format!("jobs/{}", nanoid(JOB_ID_LENGTH)))
}

/// Last path or fragment segment of an IRI, falling back to a slug of the whole IRI
pub fn local_name(iri: &NamedNode) -> String {
    let value = iri.as_str();
    match value.rsplit(['/', '#']).next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => slugify(value),
    }
}
