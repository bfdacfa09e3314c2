mod aggregate;
mod error;
pub mod key;
pub mod predicate;
mod repository;
pub mod row;
mod storage;

pub use aggregate::Aggregate;
pub use error::{NotFound, RepositoryError, RepositoryResult};
pub use key::{by_projection, KeyEq, ProjectedEq, ValueEq};
pub use predicate::Predicate;
pub use repository::{
    ErrorBuilder, InMemoryRepository, InMemoryResultRepository, Repository, ResultRepository,
};
pub use row::{
    BackendError, InMemoryRowBackend, RowBackend, RowRepository, RowRepositoryConfig,
    RowResultRepository,
};
pub use storage::{GetAllOptions, InMemoryStorage, StorageConfig};

// Re-export async_trait so downstream adapters implement the traits with the same macro
pub use async_trait::async_trait;
