//! InMemoryRepository - throwing-discipline facade over `InMemoryStorage`.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::Repository;
use crate::aggregate::Aggregate;
use crate::error::{RepositoryError, RepositoryResult};
use crate::storage::{GetAllOptions, InMemoryStorage, StorageConfig};

/// In-memory [`Repository`].
///
/// Clone-friendly via Arc: clones share the same storage. Every future
/// returned here resolves on its first poll.
pub struct InMemoryRepository<A: Aggregate> {
    storage: Arc<InMemoryStorage<A>>,
}

impl<A: Aggregate> Clone for InMemoryRepository<A> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<A: Aggregate> InMemoryRepository<A>
where
    A::Id: PartialEq,
{
    /// Create an empty repository comparing ids with `PartialEq`.
    pub fn new(aggregate_name: impl Into<String>) -> Self {
        Self::from_config(StorageConfig::new(aggregate_name))
    }
}

impl<A: Aggregate> InMemoryRepository<A> {
    pub fn from_config(config: StorageConfig<A>) -> Self {
        Self::with_storage(Arc::new(config.build()))
    }

    /// Wrap an existing storage, e.g. one shared with an
    /// [`InMemoryResultRepository`](super::InMemoryResultRepository).
    pub fn with_storage(storage: Arc<InMemoryStorage<A>>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<InMemoryStorage<A>> {
        &self.storage
    }

    /// Live aggregates matching `predicate`.
    pub async fn get_all_by<F>(&self, predicate: F) -> RepositoryResult<Vec<A>>
    where
        F: Fn(&A) -> bool,
    {
        Ok(self.storage.get_all_by(predicate))
    }

    /// First live aggregate matching `predicate`, if any.
    pub async fn find_one_by<F>(&self, predicate: F) -> RepositoryResult<Option<A>>
    where
        F: Fn(&A) -> bool,
    {
        Ok(self.storage.find_one_by(predicate))
    }

    /// First live aggregate matching `predicate`; fails with
    /// [`RepositoryError::NoMatch`] carrying `message` otherwise.
    pub async fn get_one_by<F>(&self, predicate: F, message: impl Into<String>) -> RepositoryResult<A>
    where
        F: Fn(&A) -> bool,
    {
        self.storage
            .get_one_by(predicate, || RepositoryError::NoMatch(message.into()))
    }
}

#[async_trait]
impl<A: Aggregate> Repository<A> for InMemoryRepository<A> {
    async fn get_by_id(&self, id: &A::Id) -> RepositoryResult<A> {
        Ok(self.storage.get_by_id(id)?)
    }

    async fn get_by_ids(&self, ids: &[A::Id]) -> RepositoryResult<Vec<A>> {
        Ok(self.storage.get_by_ids(ids))
    }

    async fn find_by_id(&self, id: &A::Id) -> RepositoryResult<Option<A>> {
        Ok(self.storage.find_by_id(id))
    }

    async fn store(&self, aggregate: A) -> RepositoryResult<A> {
        Ok(self.storage.store(aggregate))
    }

    async fn store_all(&self, aggregates: Vec<A>) -> RepositoryResult<Vec<A>> {
        Ok(self.storage.store_all(aggregates))
    }

    async fn delete(&self, id: &A::Id) -> RepositoryResult<()> {
        self.storage.remove(id);
        Ok(())
    }

    async fn delete_all(&self, ids: &[A::Id]) -> RepositoryResult<()> {
        self.storage.remove_all(ids);
        Ok(())
    }

    async fn get_all(&self, options: GetAllOptions) -> RepositoryResult<Vec<A>> {
        Ok(self.storage.get_all(options))
    }
}

impl<A: Aggregate> fmt::Debug for InMemoryRepository<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("storage", &self.storage)
            .finish()
    }
}
