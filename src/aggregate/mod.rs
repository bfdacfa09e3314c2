//! Aggregates - identity-bearing records held by a repository.
//!
//! ## Example
//!
//! ```ignore
//! use aggregate_repository::Aggregate;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Order {
//!     id: String,
//!     total: u64,
//! }
//!
//! impl Aggregate for Order {
//!     type Id = String;
//!     fn id(&self) -> &String { &self.id }
//! }
//! ```

use std::fmt;

/// Trait for records that can be stored in a repository.
///
/// The id is opaque to the store. It is only compared through a
/// [`KeyEq`](crate::KeyEq) strategy and rendered with `Display` in
/// not-found diagnostics, so value-object ids work as long as a consistent
/// equality is supplied.
///
/// `Clone` is the copy taken at every storage boundary. It must be a deep
/// copy: an aggregate holding shared interior mutability (`Arc<Mutex<_>>`,
/// `Rc<RefCell<_>>`) would leak mutations between the caller and the store.
pub trait Aggregate: Clone + Send + Sync + 'static {
    type Id: fmt::Display + Send + Sync + 'static;

    /// Returns the unique identifier of this aggregate.
    fn id(&self) -> &Self::Id;
}
