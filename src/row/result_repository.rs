//! RowResultRepository - explicit-result adapter over a `RowBackend`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use super::{BackendError, RowBackend, RowDeserializer, RowRepositoryConfig, RowSerializer};
use crate::aggregate::Aggregate;
use crate::error::{NotFound, RepositoryError};
use crate::repository::{ErrorBuilder, ResultRepository};
use crate::storage::GetAllOptions;

/// [`ResultRepository`] backed by a [`RowBackend`].
///
/// Backend failures, serialization failures and missing rows all become
/// `error_builder(message)`, with the same messages
/// [`RowRepository`](super::RowRepository) reports. The deserializer
/// produces the caller's error type directly.
pub struct RowResultRepository<A: Aggregate, B, E> {
    backend: B,
    config: RowRepositoryConfig,
    serializer: RowSerializer<A>,
    deserializer: RowDeserializer<A, E>,
    error_builder: ErrorBuilder<E>,
}

impl<A, B, E> RowResultRepository<A, B, E>
where
    A: Aggregate,
    B: RowBackend,
{
    pub fn new<F>(
        backend: B,
        config: RowRepositoryConfig,
        serializer: RowSerializer<A>,
        deserializer: RowDeserializer<A, E>,
        error_builder: F,
    ) -> Self
    where
        F: Fn(String) -> E + Send + Sync + 'static,
    {
        Self {
            backend,
            config,
            serializer,
            deserializer,
            error_builder: Arc::new(error_builder),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &RowRepositoryConfig {
        &self.config
    }

    fn backend_result<T>(&self, operation: &'static str, result: Result<T, BackendError>) -> Result<T, E> {
        result.map_err(|err| {
            warn!(table = %self.config.table, operation, error = %err, "row backend failed");
            (self.error_builder)(err.to_string())
        })
    }

    fn to_row(&self, aggregate: &A) -> Result<(String, Value), E> {
        let row = (self.serializer)(aggregate)
            .map_err(|message| (self.error_builder)(RepositoryError::Serialization(message).to_string()))?;
        Ok((aggregate.id().to_string(), row))
    }

    fn from_rows(&self, rows: Vec<Value>) -> Result<Vec<A>, E> {
        rows.into_iter().map(|row| (self.deserializer)(row)).collect()
    }
}

#[async_trait]
impl<A, B, E> ResultRepository<A, E> for RowResultRepository<A, B, E>
where
    A: Aggregate,
    B: RowBackend,
    E: Send + 'static,
{
    async fn get_by_id(&self, id: &A::Id) -> Result<A, E> {
        match self.find_by_id(id).await? {
            Some(aggregate) => Ok(aggregate),
            None => {
                let not_found = NotFound::new(&self.config.aggregate_name, id);
                Err((self.error_builder)(not_found.to_string()))
            }
        }
    }

    async fn get_by_ids(&self, ids: &[A::Id]) -> Result<Vec<A>, E> {
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let rows = self.backend.select_many(&self.config.table, &keys).await;
        self.from_rows(self.backend_result("select_many", rows)?)
    }

    async fn find_by_id(&self, id: &A::Id) -> Result<Option<A>, E> {
        let row = self.backend.select_one(&self.config.table, &id.to_string()).await;
        self.backend_result("select_one", row)?
            .map(|row| (self.deserializer)(row))
            .transpose()
    }

    async fn store(&self, aggregate: A) -> Result<A, E> {
        let row = self.to_row(&aggregate)?;
        let result = self.backend.upsert(&self.config.table, vec![row]).await;
        self.backend_result("upsert", result)?;
        Ok(aggregate)
    }

    async fn store_all(&self, aggregates: Vec<A>) -> Result<Vec<A>, E> {
        let rows = aggregates
            .iter()
            .map(|aggregate| self.to_row(aggregate))
            .collect::<Result<Vec<_>, E>>()?;
        let result = self.backend.upsert(&self.config.table, rows).await;
        self.backend_result("upsert", result)?;
        Ok(aggregates)
    }

    async fn delete(&self, id: &A::Id) -> Result<(), E> {
        let keys = [id.to_string()];
        let result = self
            .backend
            .delete(&self.config.table, &keys, self.config.soft_delete)
            .await;
        self.backend_result("delete", result)
    }

    async fn delete_all(&self, ids: &[A::Id]) -> Result<(), E> {
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let result = self
            .backend
            .delete(&self.config.table, &keys, self.config.soft_delete)
            .await;
        self.backend_result("delete", result)
    }

    async fn get_all(&self, options: GetAllOptions) -> Result<Vec<A>, E> {
        let rows = self
            .backend
            .select_all(&self.config.table, options.with_deleted)
            .await;
        self.from_rows(self.backend_result("select_all", rows)?)
    }
}
