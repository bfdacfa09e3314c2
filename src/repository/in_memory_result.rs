//! InMemoryResultRepository - explicit-result facade over `InMemoryStorage`.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::{ErrorBuilder, ResultRepository};
use crate::aggregate::Aggregate;
use crate::storage::{GetAllOptions, InMemoryStorage, StorageConfig};

/// In-memory [`ResultRepository`].
///
/// Not-found lookups resolve to `Err(error_builder(message))`, where the
/// message is the same one [`InMemoryRepository`](super::InMemoryRepository)
/// fails with. Clones share the same storage.
pub struct InMemoryResultRepository<A: Aggregate, E> {
    storage: Arc<InMemoryStorage<A>>,
    error_builder: ErrorBuilder<E>,
}

impl<A: Aggregate, E> Clone for InMemoryResultRepository<A, E> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            error_builder: Arc::clone(&self.error_builder),
        }
    }
}

impl<A: Aggregate, E> InMemoryResultRepository<A, E>
where
    A::Id: PartialEq,
{
    /// Create an empty repository comparing ids with `PartialEq`.
    pub fn new<B>(aggregate_name: impl Into<String>, error_builder: B) -> Self
    where
        B: Fn(String) -> E + Send + Sync + 'static,
    {
        Self::from_config(StorageConfig::new(aggregate_name), error_builder)
    }
}

impl<A: Aggregate, E> InMemoryResultRepository<A, E> {
    pub fn from_config<B>(config: StorageConfig<A>, error_builder: B) -> Self
    where
        B: Fn(String) -> E + Send + Sync + 'static,
    {
        Self::with_storage(Arc::new(config.build()), error_builder)
    }

    /// Wrap an existing storage, e.g. one shared with an
    /// [`InMemoryRepository`](super::InMemoryRepository).
    pub fn with_storage<B>(storage: Arc<InMemoryStorage<A>>, error_builder: B) -> Self
    where
        B: Fn(String) -> E + Send + Sync + 'static,
    {
        Self {
            storage,
            error_builder: Arc::new(error_builder),
        }
    }

    pub fn storage(&self) -> &Arc<InMemoryStorage<A>> {
        &self.storage
    }

    /// Live aggregates matching `predicate`.
    pub async fn get_all_by<F>(&self, predicate: F) -> Result<Vec<A>, E>
    where
        F: Fn(&A) -> bool,
    {
        Ok(self.storage.get_all_by(predicate))
    }

    /// First live aggregate matching `predicate`, if any.
    pub async fn find_one_by<F>(&self, predicate: F) -> Result<Option<A>, E>
    where
        F: Fn(&A) -> bool,
    {
        Ok(self.storage.find_one_by(predicate))
    }

    /// First live aggregate matching `predicate`, or the error from `on_none`.
    pub async fn get_one_by<F, O>(&self, predicate: F, on_none: O) -> Result<A, E>
    where
        F: Fn(&A) -> bool,
        O: FnOnce() -> E,
    {
        self.storage.get_one_by(predicate, on_none)
    }
}

#[async_trait]
impl<A, E> ResultRepository<A, E> for InMemoryResultRepository<A, E>
where
    A: Aggregate,
    E: Send + 'static,
{
    async fn get_by_id(&self, id: &A::Id) -> Result<A, E> {
        self.storage
            .get_by_id(id)
            .map_err(|err| (self.error_builder)(err.to_string()))
    }

    async fn get_by_ids(&self, ids: &[A::Id]) -> Result<Vec<A>, E> {
        Ok(self.storage.get_by_ids(ids))
    }

    async fn find_by_id(&self, id: &A::Id) -> Result<Option<A>, E> {
        Ok(self.storage.find_by_id(id))
    }

    async fn store(&self, aggregate: A) -> Result<A, E> {
        Ok(self.storage.store(aggregate))
    }

    async fn store_all(&self, aggregates: Vec<A>) -> Result<Vec<A>, E> {
        Ok(self.storage.store_all(aggregates))
    }

    async fn delete(&self, id: &A::Id) -> Result<(), E> {
        self.storage.remove(id);
        Ok(())
    }

    async fn delete_all(&self, ids: &[A::Id]) -> Result<(), E> {
        self.storage.remove_all(ids);
        Ok(())
    }

    async fn get_all(&self, options: GetAllOptions) -> Result<Vec<A>, E> {
        Ok(self.storage.get_all(options))
    }
}

impl<A: Aggregate, E> fmt::Debug for InMemoryResultRepository<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryResultRepository")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}
