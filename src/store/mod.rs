// Copyright 2025 Cowboy AI, LLC.

//! Resource store
//!
//! [`ResourceStore`] is the unit of work a command runs in: resources are
//! loaded lazily from a [`GraphStore`], mutated as owned values, staged with
//! [`create`](ResourceStore::create), [`update`](ResourceStore::update) or
//! [`delete`](ResourceStore::delete), and written with one
//! [`save`](ResourceStore::save). Nothing reaches the backend before `save`,
//! so a command that fails early leaves the store untouched.

mod in_memory;
mod resource;

pub use in_memory::InMemoryGraphStore;
pub use resource::Resource;

use crate::entity::{ResourceId, StoredResource};
use crate::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use indexmap::IndexMap;
use oxrdf::NamedNode;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Everything one unit of work writes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    /// Resources created or replaced
    pub upserts: Vec<Resource>,
    /// Resources removed, together with all of their own data
    pub deletes: Vec<NamedNode>,
}

impl ChangeSet {
    /// Whether the change set writes nothing
    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.deletes.is_empty()
    }

    /// Number of written resources
    pub fn len(&self) -> usize {
        self.upserts.len() + self.deletes.len()
    }
}

/// Transactional backend holding one node per resource
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Load the resource stored at `iri`
    async fn load(&self, iri: &NamedNode) -> DomainResult<Option<Resource>>;

    /// Apply a change set atomically; on error nothing is applied
    async fn commit(&self, changes: ChangeSet) -> DomainResult<()>;
}

#[derive(Debug, Clone)]
enum Entry {
    Clean(Resource),
    Dirty(Resource),
    Deleted,
}

/// Request-scoped unit of work over a [`GraphStore`]
pub struct ResourceStore<G: ?Sized> {
    graph: Arc<G>,
    entries: Mutex<IndexMap<NamedNode, Entry>>,
}

impl<G: GraphStore + ?Sized> ResourceStore<G> {
    /// Open a unit of work
    pub fn new(graph: Arc<G>) -> Self {
        Self {
            graph,
            entries: Mutex::new(IndexMap::new()),
        }
    }

    /// The backend this unit of work writes to
    pub fn graph(&self) -> &Arc<G> {
        &self.graph
    }

    async fn lookup(&self, iri: &NamedNode) -> DomainResult<Option<Resource>> {
        if let Some(entry) = self.entries.lock().await.get(iri) {
            return Ok(match entry {
                Entry::Clean(resource) | Entry::Dirty(resource) => Some(resource.clone()),
                Entry::Deleted => None,
            });
        }

        let loaded = self.graph.load(iri).await?;
        if let Some(resource) = &loaded {
            self.entries
                .lock()
                .await
                .entry(iri.clone())
                .or_insert_with(|| Entry::Clean(resource.clone()));
        }
        Ok(loaded)
    }

    /// Fetch a resource, `None` if it does not exist
    ///
    /// Fails with `InconsistentState` when the node holds a different type.
    pub async fn find<T: StoredResource>(&self, id: &ResourceId<T>) -> DomainResult<Option<T>> {
        match self.lookup(id.as_named_node()).await? {
            None => Ok(None),
            Some(resource) => {
                let entity_type = resource.entity_type();
                T::from_resource(resource).map(Some).ok_or_else(|| {
                    DomainError::InconsistentState(format!(
                        "{id} is a {entity_type}, expected {}",
                        T::ENTITY_TYPE
                    ))
                })
            }
        }
    }

    /// Fetch a resource, failing with `NotFound` if it does not exist
    pub async fn get<T: StoredResource>(&self, id: &ResourceId<T>) -> DomainResult<T> {
        self.find(id)
            .await?
            .ok_or_else(|| DomainError::not_found(T::ENTITY_TYPE, id))
    }

    /// Whether any resource exists at `iri`
    pub async fn contains(&self, iri: &NamedNode) -> DomainResult<bool> {
        Ok(self.lookup(iri).await?.is_some())
    }

    /// Stage a new resource, failing with `AlreadyExists` if the node is taken
    pub async fn create<T: StoredResource>(&self, resource: T) -> DomainResult<()> {
        let iri = resource.id().as_named_node().clone();
        if self.contains(&iri).await? {
            return Err(DomainError::AlreadyExists(format!(
                "{} {iri} already exists",
                T::ENTITY_TYPE
            )));
        }

        debug!(entity_type = T::ENTITY_TYPE, id = %iri, "staged create");
        self.entries
            .lock()
            .await
            .insert(iri, Entry::Dirty(resource.into_resource()));
        Ok(())
    }

    /// Stage the new state of a resource
    pub async fn update<T: StoredResource>(&self, resource: T) {
        let iri = resource.id().as_named_node().clone();
        debug!(entity_type = T::ENTITY_TYPE, id = %iri, "staged update");
        self.entries
            .lock()
            .await
            .insert(iri, Entry::Dirty(resource.into_resource()));
    }

    /// Stage the removal of a resource
    ///
    /// Inbound links from other resources are not touched; callers retract them.
    pub async fn delete<T: StoredResource>(&self, id: &ResourceId<T>) {
        debug!(entity_type = T::ENTITY_TYPE, id = %id, "staged delete");
        self.entries
            .lock()
            .await
            .insert(id.as_named_node().clone(), Entry::Deleted);
    }

    /// Whether anything is staged
    pub async fn has_changes(&self) -> bool {
        self.entries
            .lock()
            .await
            .values()
            .any(|entry| !matches!(entry, Entry::Clean(_)))
    }

    /// Commit all staged changes in one change set
    ///
    /// Staged changes are kept when the backend rejects the commit.
    pub async fn save(&self) -> DomainResult<usize> {
        let mut entries = self.entries.lock().await;

        let mut changes = ChangeSet::default();
        for (iri, entry) in entries.iter() {
            match entry {
                Entry::Dirty(resource) => changes.upserts.push(resource.clone()),
                Entry::Deleted => changes.deletes.push(iri.clone()),
                Entry::Clean(_) => {}
            }
        }

        if changes.is_empty() {
            return Ok(0);
        }

        let written = changes.len();
        self.graph.commit(changes).await?;

        entries.retain(|_, entry| !matches!(entry, Entry::Deleted));
        for entry in entries.values_mut() {
            if let Entry::Dirty(resource) = entry {
                *entry = Entry::Clean(resource.clone());
            }
        }

        debug!(resources = written, "committed unit of work");
        Ok(written)
    }
}
