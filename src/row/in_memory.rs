//! InMemoryRowBackend - HashMap-backed row backend for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use super::{BackendError, RowBackend};

/// Internal stored representation of a row.
struct StoredRow {
    id: String,
    row: Value,
}

/// Live rows in upsert order, soft-deleted rows in removal order.
#[derive(Default)]
struct Table {
    live: Vec<StoredRow>,
    trash: Vec<StoredRow>,
}

/// In-memory row backend with a live and a trash list per table.
///
/// Clone-friendly via Arc. Rows are cloned on the way in and out.
/// Soft-deleted rows keep their last snapshot in the trash even when the
/// same id is upserted again, mirroring the in-memory storage core.
#[derive(Clone, Default)]
pub struct InMemoryRowBackend {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryRowBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn select<F>(&self, table: &str, read: F) -> Result<Vec<Value>, BackendError>
    where
        F: Fn(&Table) -> Vec<Value>,
    {
        let tables = self
            .tables
            .read()
            .map_err(|_| BackendError::new("lock poisoned"))?;

        Ok(tables.get(table).map(read).unwrap_or_default())
    }
}

fn rows_where<F>(rows: &[StoredRow], keep: F) -> Vec<Value>
where
    F: Fn(&StoredRow) -> bool,
{
    rows.iter()
        .filter(|&stored| keep(stored))
        .map(|stored| stored.row.clone())
        .collect()
}

fn put(rows: &mut Vec<StoredRow>, stored: StoredRow) {
    match rows.iter_mut().find(|existing| existing.id == stored.id) {
        Some(existing) => existing.row = stored.row,
        None => rows.push(stored),
    }
}

#[async_trait]
impl RowBackend for InMemoryRowBackend {
    async fn select_one(&self, table: &str, id: &str) -> Result<Option<Value>, BackendError> {
        let mut rows = self.select(table, |t| rows_where(&t.live, |stored| stored.id == id))?;
        Ok(rows.pop())
    }

    async fn select_many(&self, table: &str, ids: &[String]) -> Result<Vec<Value>, BackendError> {
        self.select(table, |t| rows_where(&t.live, |stored| ids.contains(&stored.id)))
    }

    async fn select_all(&self, table: &str, with_deleted: bool) -> Result<Vec<Value>, BackendError> {
        self.select(table, |t| {
            let mut rows = rows_where(&t.live, |_| true);
            if with_deleted {
                rows.extend(rows_where(&t.trash, |_| true));
            }
            rows
        })
    }

    async fn upsert(&self, table: &str, rows: Vec<(String, Value)>) -> Result<(), BackendError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| BackendError::new("lock poisoned"))?;
        let stored = tables.entry(table.to_string()).or_default();

        for (id, row) in rows {
            put(&mut stored.live, StoredRow { id, row });
        }

        Ok(())
    }

    async fn delete(&self, table: &str, ids: &[String], soft: bool) -> Result<(), BackendError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| BackendError::new("lock poisoned"))?;
        let Some(stored) = tables.get_mut(table) else {
            return Ok(());
        };

        let (removed, rest): (Vec<StoredRow>, Vec<StoredRow>) = std::mem::take(&mut stored.live)
            .into_iter()
            .partition(|row| ids.contains(&row.id));
        stored.live = rest;

        if soft {
            for row in removed {
                put(&mut stored.trash, row);
            }
        } else {
            stored.trash.retain(|row| !ids.contains(&row.id));
        }

        Ok(())
    }
}
