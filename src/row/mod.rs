//! Row adapters - the repository contract over an external row store.
//!
//! A [`RowBackend`] stands in for a database table: rows are JSON values
//! keyed by the string form of the aggregate id. The row repositories turn
//! aggregates into rows and back with serializer/deserializer functions
//! supplied at construction time, and translate backend failures into the
//! same taxonomy the in-memory repositories use.
//!
//! ## Example
//!
//! ```ignore
//! let repo = RowRepository::new(
//!     InMemoryRowBackend::new(),
//!     RowRepositoryConfig::new("orders", "Order").with_soft_delete(true),
//!     json_serializer::<Order>(),
//!     json_deserializer::<Order>(),
//! );
//! repo.store(order).await?;
//! ```

mod backend;
mod in_memory;
mod repository;
mod result_repository;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Turns an aggregate into a row. Errors are plain messages.
pub type RowSerializer<A> = Arc<dyn Fn(&A) -> Result<Value, String> + Send + Sync>;

/// Turns a row back into an aggregate.
pub type RowDeserializer<A, E> = Arc<dyn Fn(Value) -> Result<A, E> + Send + Sync>;

/// Table and naming options for a row repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRepositoryConfig {
    /// Table (or collection) the rows live in.
    pub table: String,
    /// Name used in not-found diagnostics.
    pub aggregate_name: String,
    /// Mark rows deleted instead of dropping them, so
    /// `get_all(with_deleted)` can still list them.
    #[serde(default)]
    pub soft_delete: bool,
}

impl RowRepositoryConfig {
    pub fn new(table: impl Into<String>, aggregate_name: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            aggregate_name: aggregate_name.into(),
            soft_delete: false,
        }
    }

    pub fn with_soft_delete(mut self, enabled: bool) -> Self {
        self.soft_delete = enabled;
        self
    }
}

/// Serializer backed by the aggregate's `Serialize` implementation.
pub fn json_serializer<A>() -> RowSerializer<A>
where
    A: Serialize + 'static,
{
    Arc::new(|aggregate: &A| serde_json::to_value(aggregate).map_err(|e| e.to_string()))
}

/// Deserializer backed by the aggregate's `Deserialize` implementation.
pub fn json_deserializer<A>() -> RowDeserializer<A, String>
where
    A: DeserializeOwned + 'static,
{
    Arc::new(|row: Value| serde_json::from_value::<A>(row).map_err(|e| e.to_string()))
}

pub use backend::{BackendError, RowBackend};
pub use in_memory::InMemoryRowBackend;
pub use repository::RowRepository;
pub use result_repository::RowResultRepository;
