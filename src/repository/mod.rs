//! Repositories - the contract callers and adapters share.
//!
//! Two disciplines expose the same operations with the same semantics:
//!
//! - [`Repository`] fails with [`RepositoryError`](crate::RepositoryError),
//!   propagated with `?`.
//! - [`ResultRepository`] fails with the caller's own error type, built from
//!   the diagnostic message by an [`ErrorBuilder`].
//!
//! Both in-memory implementations are thin wrappers over one
//! [`InMemoryStorage`](crate::InMemoryStorage), so for any sequence of
//! operations they succeed with equal values and fail with the same message.
//!
//! ## Example
//!
//! ```ignore
//! let repo = InMemoryRepository::<Order>::new("Order");
//! repo.store(order).await?;
//! let order = repo.get_by_id(&order_id).await?;
//!
//! let repo = InMemoryResultRepository::<Order, AppError>::new("Order", AppError::NotFound);
//! match repo.get_by_id(&order_id).await {
//!     Ok(order) => ship(order),
//!     Err(AppError::NotFound(message)) => warn!(%message),
//! }
//! ```

mod in_memory;
mod in_memory_result;
mod repository;

pub use in_memory::InMemoryRepository;
pub use in_memory_result::InMemoryResultRepository;
pub use repository::{ErrorBuilder, Repository, ResultRepository};
