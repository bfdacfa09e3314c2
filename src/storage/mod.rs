//! Storage - the in-process keyed store behind the in-memory repositories.
//!
//! The store keeps two partitions: live aggregates and trashed (soft-deleted)
//! aggregates. Every read hands back a clone, so nothing a caller holds
//! aliases stored state.
//!
//! ## Example
//!
//! ```ignore
//! use aggregate_repository::{GetAllOptions, InMemoryStorage};
//!
//! let storage = InMemoryStorage::<Order>::new("Order");
//! storage.store(order);
//! storage.remove(&order_id);
//! let everything = storage.get_all(GetAllOptions::including_deleted());
//! ```

mod config;
mod in_memory;

use serde::{Deserialize, Serialize};

/// Options for listing aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllOptions {
    /// Whether trashed aggregates are listed after the live ones.
    #[serde(default)]
    pub with_deleted: bool,
}

impl GetAllOptions {
    /// Create options that also list trashed aggregates.
    pub fn including_deleted() -> Self {
        Self { with_deleted: true }
    }
}

pub use config::StorageConfig;
pub use in_memory::InMemoryStorage;
