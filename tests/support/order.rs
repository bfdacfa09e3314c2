use std::sync::atomic::{AtomicU64, Ordering};

use aggregate_repository::Aggregate;
use serde::{Deserialize, Serialize};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub fn next_id() -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("order-{}", id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer: String,
    pub total_cents: u64,
    pub lines: Vec<String>,
}

impl Order {
    pub fn new(customer: &str, total_cents: u64) -> Self {
        Self::with_id(&next_id(), customer, total_cents)
    }

    pub fn with_id(id: &str, customer: &str, total_cents: u64) -> Self {
        Self {
            id: id.to_string(),
            customer: customer.to_string(),
            total_cents,
            lines: Vec::new(),
        }
    }
}

impl Aggregate for Order {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// Caller-side error type for the explicit-result repositories.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderError {
    Lookup(String),
    Query(String),
}

pub fn lookup_error(message: String) -> OrderError {
    OrderError::Lookup(message)
}

pub fn ids(orders: &[Order]) -> Vec<String> {
    orders.iter().map(|order| order.id.clone()).collect()
}
