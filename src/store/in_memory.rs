// Copyright 2025 Cowboy AI, LLC.

//! In-memory graph store

use super::{ChangeSet, GraphStore, Resource};
use crate::entity::{ResourceId, StoredResource};
use crate::errors::DomainResult;
use async_trait::async_trait;
use indexmap::IndexMap;
use oxrdf::NamedNode;
use tokio::sync::RwLock;
use tracing::debug;

/// Graph store keeping every resource in a map, in insertion order
///
/// Used by tests and by embedders without a SPARQL backend. Commits take the
/// write lock once, so readers never observe half a change set.
#[derive(Debug, Default)]
pub struct InMemoryGraphStore {
    resources: RwLock<IndexMap<NamedNode, Resource>>,
}

impl InMemoryGraphStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given resources
    pub fn with_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        Self {
            resources: RwLock::new(
                resources
                    .into_iter()
                    .map(|resource| (resource.iri().clone(), resource))
                    .collect(),
            ),
        }
    }

    /// Write a resource directly, bypassing any unit of work
    pub async fn insert<T: StoredResource>(&self, resource: T) {
        let resource = resource.into_resource();
        self.resources
            .write()
            .await
            .insert(resource.iri().clone(), resource);
    }

    /// Read a committed resource of the expected type
    pub async fn get<T: StoredResource>(&self, id: &ResourceId<T>) -> Option<T> {
        self.resources
            .read()
            .await
            .get(id.as_named_node())
            .cloned()
            .and_then(T::from_resource)
    }

    /// All committed resources of one type, in insertion order
    pub async fn all<T: StoredResource>(&self) -> Vec<T> {
        self.resources
            .read()
            .await
            .values()
            .cloned()
            .filter_map(T::from_resource)
            .collect()
    }

    /// Number of committed resources
    pub async fn len(&self) -> usize {
        self.resources.read().await.len()
    }

    /// Whether the store holds nothing
    pub async fn is_empty(&self) -> bool {
        self.resources.read().await.is_empty()
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn load(&self, iri: &NamedNode) -> DomainResult<Option<Resource>> {
        Ok(self.resources.read().await.get(iri).cloned())
    }

    async fn commit(&self, changes: ChangeSet) -> DomainResult<()> {
        let mut resources = self.resources.write().await;
        debug!(
            upserts = changes.upserts.len(),
            deletes = changes.deletes.len(),
            "applying change set"
        );

        for resource in changes.upserts {
            resources.insert(resource.iri().clone(), resource);
        }
        for iri in &changes.deletes {
            resources.shift_remove(iri);
        }
        Ok(())
    }
}
