use aggregate_repository::{async_trait, BackendError, RowBackend};
use serde_json::Value;

/// Row backend whose every call fails with the same message.
pub struct FailingRowBackend {
    message: String,
}

impl FailingRowBackend {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    fn fail<T>(&self) -> Result<T, BackendError> {
        Err(BackendError::new(self.message.clone()))
    }
}

#[async_trait]
impl RowBackend for FailingRowBackend {
    async fn select_one(&self, _table: &str, _id: &str) -> Result<Option<Value>, BackendError> {
        self.fail()
    }

    async fn select_many(&self, _table: &str, _ids: &[String]) -> Result<Vec<Value>, BackendError> {
        self.fail()
    }

    async fn select_all(&self, _table: &str, _with_deleted: bool) -> Result<Vec<Value>, BackendError> {
        self.fail()
    }

    async fn upsert(&self, _table: &str, _rows: Vec<(String, Value)>) -> Result<(), BackendError> {
        self.fail()
    }

    async fn delete(&self, _table: &str, _ids: &[String], _soft: bool) -> Result<(), BackendError> {
        self.fail()
    }
}
