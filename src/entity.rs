// Copyright 2025 Cowboy AI, LLC.

//! Resource identity
//!
//! Every domain entity is a node in a graph store, identified by an IRI.
//! [`ResourceId`] wraps that IRI with a phantom type so that a table IRI
//! cannot be passed where a project IRI is expected.

use crate::errors::DomainResult;
use crate::store::Resource;
use oxrdf::NamedNode;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A typed resource identifier using phantom types for type safety
///
/// # Examples
///
/// ```rust
/// use cube_creator_domain::{ResourceId, model::{Project, Table}};
///
/// let project = ResourceId::<Project>::new("http://example.com/cube-project/ubd").unwrap();
/// let table: ResourceId<Table> = project.child("csv-mapping/table-ubd");
///
/// assert_eq!(table.as_str(), "http://example.com/cube-project/ubd/csv-mapping/table-ubd");
/// ```
pub struct ResourceId<T> {
    iri: NamedNode,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> ResourceId<T> {
    /// Parse an absolute IRI into a typed identifier
    pub fn new(iri: impl Into<String>) -> DomainResult<Self> {
        Ok(Self::from_named_node(NamedNode::new(iri)?))
    }

    /// Wrap an already validated IRI
    pub fn from_named_node(iri: NamedNode) -> Self {
        Self {
            iri,
            _phantom: PhantomData,
        }
    }

    /// Append a path segment to this identifier
    ///
    /// The segment must only contain IRI-safe characters (slugs, nanoids or
    /// local names taken from another valid IRI).
    pub fn child<U>(&self, segment: &str) -> ResourceId<U> {
        ResourceId::from_named_node(NamedNode::new_unchecked(format!(
            "{}/{}",
            self.iri.as_str(),
            segment
        )))
    }

    /// Get the IRI as a string slice
    pub fn as_str(&self) -> &str {
        self.iri.as_str()
    }

    /// Get the underlying IRI
    pub fn as_named_node(&self) -> &NamedNode {
        &self.iri
    }

    /// Consume into the underlying IRI
    pub fn into_named_node(self) -> NamedNode {
        self.iri
    }

    /// Convert to a different resource type (use with caution)
    pub fn cast<U>(self) -> ResourceId<U> {
        ResourceId::from_named_node(self.iri)
    }
}

impl<T> Clone for ResourceId<T> {
    fn clone(&self) -> Self {
        Self::from_named_node(self.iri.clone())
    }
}

impl<T> PartialEq for ResourceId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iri == other.iri
    }
}

impl<T> Eq for ResourceId<T> {}

impl<T> PartialOrd for ResourceId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ResourceId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iri.as_str().cmp(other.iri.as_str())
    }
}

impl<T> Hash for ResourceId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iri.hash(state);
    }
}

impl<T> fmt::Debug for ResourceId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({})", self.iri.as_str())
    }
}

impl<T> fmt::Display for ResourceId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iri.as_str())
    }
}

impl<T> From<ResourceId<T>> for NamedNode {
    fn from(id: ResourceId<T>) -> Self {
        id.iri
    }
}

/// A typed entity that can be held by a [`ResourceStore`](crate::store::ResourceStore)
pub trait StoredResource: Clone + Send + Sync + Sized + 'static {
    /// Human readable entity type, used in error messages and logs
    const ENTITY_TYPE: &'static str;

    /// The identifier of this resource
    fn id(&self) -> &ResourceId<Self>;

    /// Wrap into the store's resource enum
    fn into_resource(self) -> Resource;

    /// Unwrap from the store's resource enum, `None` if the variant differs
    fn from_resource(resource: Resource) -> Option<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CsvMapping, Project};
    use std::collections::HashSet;

    #[test]
    fn test_rejects_relative_iri() {
        assert!(ResourceId::<Project>::new("relative/path").is_err());
    }

    #[test]
    fn test_child_appends_segment() {
        let project = ResourceId::<Project>::new("http://example.com/cube-project/a").unwrap();
        let mapping: ResourceId<CsvMapping> = project.child("csv-mapping");
        assert_eq!(mapping.as_str(), "http://example.com/cube-project/a/csv-mapping");
    }

    #[test]
    fn test_equality_and_hash_follow_iri() {
        let a = ResourceId::<Project>::new("http://example.com/p").unwrap();
        let b = ResourceId::<Project>::new("http://example.com/p").unwrap();
        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&b));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "http://example.com/p");
    }
}
