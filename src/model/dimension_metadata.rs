// Copyright 2025 Cowboy AI, LLC.

//! Dimension metadata
//!
//! One collection per dataset holds an entry per cube dimension, keyed by the
//! resolved target property. Entries outlive the column mappings that created
//! them as long as some mapping of the project still targets the property.

use crate::entity::ResourceId;
use crate::identifiers;
use crate::model::Dataset;
use indexmap::IndexMap;
use oxrdf::NamedNode;

/// Display metadata of one dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionMetadata {
    /// Entry identifier
    pub id: NamedNode,
    /// The dimension property this entry describes
    pub about: NamedNode,
    /// Display name
    pub name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Unit of measurement
    pub unit: Option<NamedNode>,
    /// Scale of measure (nominal, ordinal, interval, ratio)
    pub scale_of_measure: Option<NamedNode>,
}

/// All dimension metadata of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionMetadataCollection {
    /// Collection identifier
    pub id: ResourceId<DimensionMetadataCollection>,
    /// Dataset described by the collection
    pub dataset: ResourceId<Dataset>,
    parts: IndexMap<NamedNode, DimensionMetadata>,
}

impl DimensionMetadataCollection {
    /// Create the empty collection of a dataset
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            id: dataset.dimension_metadata.clone(),
            dataset: dataset.id.clone(),
            parts: IndexMap::new(),
        }
    }

    /// Ensure an entry about `about` exists
    ///
    /// Returns `true` when a new entry was added, `false` when the dimension is
    /// already described (shared by another mapping).
    pub fn add_dimension_metadata(&mut self, about: NamedNode, name: Option<String>) -> bool {
        if self.parts.contains_key(&about) {
            return false;
        }

        let mut id = identifiers::dimension_metadata(&self.id, &about);
        if self.parts.values().any(|part| part.id == id) {
            // same local name in another namespace
            id = NamedNode::new_unchecked(format!(
                "{}-{}",
                id.as_str(),
                identifiers::nanoid(identifiers::COLUMN_MAPPING_SUFFIX_LENGTH)
            ));
        }

        self.parts.insert(
            about.clone(),
            DimensionMetadata {
                id,
                about,
                name,
                description: None,
                unit: None,
                scale_of_measure: None,
            },
        );
        true
    }

    /// Remove the entry about `about`
    pub fn remove_dimension_metadata(&mut self, about: &NamedNode) -> Option<DimensionMetadata> {
        self.parts.shift_remove(about)
    }

    /// Entry about a property
    pub fn get(&self, about: &NamedNode) -> Option<&DimensionMetadata> {
        self.parts.get(about)
    }

    /// Mutable entry about a property, for metadata edits
    pub fn get_mut(&mut self, about: &NamedNode) -> Option<&mut DimensionMetadata> {
        self.parts.get_mut(about)
    }

    /// Whether a property is described
    pub fn contains(&self, about: &NamedNode) -> bool {
        self.parts.contains_key(about)
    }

    /// All entries in insertion order
    pub fn parts(&self) -> impl Iterator<Item = &DimensionMetadata> {
        self.parts.values()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
