// Copyright 2025 Cowboy AI, LLC.

//! Storage of uploaded CSV bytes

use crate::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// External storage holding the bytes of uploaded files
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Remove a stored file
    async fn delete_file(&self, path: &str) -> DomainResult<()>;
}

/// Media storage keeping file paths in memory
#[derive(Clone, Default)]
pub struct InMemoryMediaStorage {
    files: Arc<RwLock<HashSet<String>>>,
    deleted: Arc<RwLock<Vec<String>>>,
    unavailable: bool,
}

impl InMemoryMediaStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// A storage whose every delete fails
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Register a stored file
    pub async fn put(&self, path: impl Into<String>) {
        self.files.write().await.insert(path.into());
    }

    /// Whether a file is stored
    pub async fn contains(&self, path: &str) -> bool {
        self.files.read().await.contains(path)
    }

    /// Paths deleted so far, in call order
    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }
}

#[async_trait]
impl MediaStorage for InMemoryMediaStorage {
    async fn delete_file(&self, path: &str) -> DomainResult<()> {
        if self.unavailable {
            return Err(DomainError::ExternalServiceError {
                service: "media storage".to_string(),
                message: format!("cannot delete {path}"),
            });
        }

        self.files.write().await.remove(path);
        self.deleted.write().await.push(path.to_string());
        Ok(())
    }
}
