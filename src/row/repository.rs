//! RowRepository - throwing-discipline adapter over a `RowBackend`.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use super::{BackendError, RowBackend, RowDeserializer, RowRepositoryConfig, RowSerializer};
use crate::aggregate::Aggregate;
use crate::error::{NotFound, RepositoryError, RepositoryResult};
use crate::repository::Repository;
use crate::storage::GetAllOptions;

/// [`Repository`] backed by a [`RowBackend`].
///
/// Backend failures surface as [`RepositoryError::Backend`], rows that do
/// not convert as [`RepositoryError::Serialization`].
pub struct RowRepository<A: Aggregate, B> {
    backend: B,
    config: RowRepositoryConfig,
    serializer: RowSerializer<A>,
    deserializer: RowDeserializer<A, String>,
}

impl<A: Aggregate, B: RowBackend> RowRepository<A, B> {
    pub fn new(
        backend: B,
        config: RowRepositoryConfig,
        serializer: RowSerializer<A>,
        deserializer: RowDeserializer<A, String>,
    ) -> Self {
        Self {
            backend,
            config,
            serializer,
            deserializer,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &RowRepositoryConfig {
        &self.config
    }

    fn backend_result<T>(&self, operation: &'static str, result: Result<T, BackendError>) -> RepositoryResult<T> {
        result.map_err(|err| {
            warn!(table = %self.config.table, operation, error = %err, "row backend failed");
            RepositoryError::from(err)
        })
    }

    fn to_row(&self, aggregate: &A) -> RepositoryResult<(String, Value)> {
        let row = (self.serializer)(aggregate).map_err(RepositoryError::Serialization)?;
        Ok((aggregate.id().to_string(), row))
    }

    fn from_row(&self, row: Value) -> RepositoryResult<A> {
        (self.deserializer)(row).map_err(RepositoryError::Serialization)
    }

    fn from_rows(&self, rows: Vec<Value>) -> RepositoryResult<Vec<A>> {
        rows.into_iter().map(|row| self.from_row(row)).collect()
    }
}

#[async_trait]
impl<A, B> Repository<A> for RowRepository<A, B>
where
    A: Aggregate,
    B: RowBackend,
{
    async fn get_by_id(&self, id: &A::Id) -> RepositoryResult<A> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| NotFound::new(&self.config.aggregate_name, id).into())
    }

    async fn get_by_ids(&self, ids: &[A::Id]) -> RepositoryResult<Vec<A>> {
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let rows = self.backend.select_many(&self.config.table, &keys).await;
        self.from_rows(self.backend_result("select_many", rows)?)
    }

    async fn find_by_id(&self, id: &A::Id) -> RepositoryResult<Option<A>> {
        let row = self.backend.select_one(&self.config.table, &id.to_string()).await;
        self.backend_result("select_one", row)?
            .map(|row| self.from_row(row))
            .transpose()
    }

    async fn store(&self, aggregate: A) -> RepositoryResult<A> {
        let row = self.to_row(&aggregate)?;
        let result = self.backend.upsert(&self.config.table, vec![row]).await;
        self.backend_result("upsert", result)?;
        Ok(aggregate)
    }

    async fn store_all(&self, aggregates: Vec<A>) -> RepositoryResult<Vec<A>> {
        let rows = aggregates
            .iter()
            .map(|aggregate| self.to_row(aggregate))
            .collect::<RepositoryResult<Vec<_>>>()?;
        let result = self.backend.upsert(&self.config.table, rows).await;
        self.backend_result("upsert", result)?;
        Ok(aggregates)
    }

    async fn delete(&self, id: &A::Id) -> RepositoryResult<()> {
        let keys = [id.to_string()];
        let result = self
            .backend
            .delete(&self.config.table, &keys, self.config.soft_delete)
            .await;
        self.backend_result("delete", result)
    }

    async fn delete_all(&self, ids: &[A::Id]) -> RepositoryResult<()> {
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let result = self
            .backend
            .delete(&self.config.table, &keys, self.config.soft_delete)
            .await;
        self.backend_result("delete", result)
    }

    async fn get_all(&self, options: GetAllOptions) -> RepositoryResult<Vec<A>> {
        let rows = self
            .backend
            .select_all(&self.config.table, options.with_deleted)
            .await;
        self.from_rows(self.backend_result("select_all", rows)?)
    }
}
