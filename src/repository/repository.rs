use std::sync::Arc;

use async_trait::async_trait;

use crate::aggregate::Aggregate;
use crate::error::RepositoryResult;
use crate::storage::GetAllOptions;

/// Repository contract, throwing discipline.
///
/// A lookup that requires a record fails with
/// [`RepositoryError::NotFound`](crate::RepositoryError::NotFound);
/// optional reads resolve to `Ok(None)`. Callers propagate failures with `?`.
#[async_trait]
pub trait Repository<A: Aggregate>: Send + Sync {
    async fn get_by_id(&self, id: &A::Id) -> RepositoryResult<A>;

    /// Aggregates whose id is in `ids`, in the store's order. Missing ids
    /// are omitted.
    async fn get_by_ids(&self, ids: &[A::Id]) -> RepositoryResult<Vec<A>>;

    async fn find_by_id(&self, id: &A::Id) -> RepositoryResult<Option<A>>;

    async fn store(&self, aggregate: A) -> RepositoryResult<A>;

    async fn store_all(&self, aggregates: Vec<A>) -> RepositoryResult<Vec<A>>;

    async fn delete(&self, id: &A::Id) -> RepositoryResult<()>;

    async fn delete_all(&self, ids: &[A::Id]) -> RepositoryResult<()>;

    async fn get_all(&self, options: GetAllOptions) -> RepositoryResult<Vec<A>>;
}

/// Builds the caller's error value from a diagnostic message.
pub type ErrorBuilder<E> = Arc<dyn Fn(String) -> E + Send + Sync>;

/// Repository contract, explicit-result discipline.
///
/// Same operations as [`Repository`], but every failure is a value of the
/// caller's error type, produced from the diagnostic message by an injected
/// [`ErrorBuilder`].
#[async_trait]
pub trait ResultRepository<A: Aggregate, E: Send + 'static>: Send + Sync {
    async fn get_by_id(&self, id: &A::Id) -> Result<A, E>;

    async fn get_by_ids(&self, ids: &[A::Id]) -> Result<Vec<A>, E>;

    async fn find_by_id(&self, id: &A::Id) -> Result<Option<A>, E>;

    async fn store(&self, aggregate: A) -> Result<A, E>;

    async fn store_all(&self, aggregates: Vec<A>) -> Result<Vec<A>, E>;

    async fn delete(&self, id: &A::Id) -> Result<(), E>;

    async fn delete_all(&self, ids: &[A::Id]) -> Result<(), E>;

    async fn get_all(&self, options: GetAllOptions) -> Result<Vec<A>, E>;
}
