use std::fmt;

/// A required aggregate was absent from the live partition.
///
/// This is the only failure the in-memory storage core produces. Its
/// `Display` output is the diagnostic message shared by both repository
/// disciplines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Aggregate {aggregate} not found with id {id}")]
pub struct NotFound {
    pub aggregate: String,
    pub id: String,
}

impl NotFound {
    pub fn new(aggregate: impl Into<String>, id: &impl fmt::Display) -> Self {
        NotFound {
            aggregate: aggregate.into(),
            id: id.to_string(),
        }
    }
}

/// Errors surfaced by the throwing repository discipline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// A lookup by id found nothing.
    #[error(transparent)]
    NotFound(#[from] NotFound),
    /// A predicate lookup found nothing; carries the caller's message.
    #[error("{0}")]
    NoMatch(String),
    /// The backing store failed (adapters only).
    #[error("{0}")]
    Backend(String),
    /// An aggregate could not be converted to or from a storage row.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// A lookup by id found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }

    /// A predicate lookup found nothing.
    pub fn is_no_match(&self) -> bool {
        matches!(self, RepositoryError::NoMatch(_))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
