use async_trait::async_trait;
use serde_json::Value;

use crate::error::RepositoryError;

/// Failure reported by a row backend (connection, query, lock...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        BackendError(message.into())
    }
}

impl From<BackendError> for RepositoryError {
    fn from(err: BackendError) -> Self {
        RepositoryError::Backend(err.0)
    }
}

/// Table-oriented row storage that a row repository adapts to the
/// repository contract.
///
/// Rows are keyed by the string form of the aggregate id. The backend never
/// interprets row contents. Soft-deleted rows are only visible through
/// `select_all(.., with_deleted = true)`.
#[async_trait]
pub trait RowBackend: Send + Sync {
    /// The live row with this id.
    async fn select_one(&self, table: &str, id: &str) -> Result<Option<Value>, BackendError>;

    /// Live rows whose id is in `ids`, in table order.
    async fn select_many(&self, table: &str, ids: &[String]) -> Result<Vec<Value>, BackendError>;

    /// Every live row, plus soft-deleted rows with `with_deleted`.
    async fn select_all(&self, table: &str, with_deleted: bool) -> Result<Vec<Value>, BackendError>;

    /// Insert rows, replacing (and reviving) rows with the same id.
    async fn upsert(&self, table: &str, rows: Vec<(String, Value)>) -> Result<(), BackendError>;

    /// Delete rows by id; `soft` marks them deleted instead of dropping them.
    async fn delete(&self, table: &str, ids: &[String], soft: bool) -> Result<(), BackendError>;
}
