use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Page, PageRequest, Retrospective};

/// Errors raised by a [`RetrospectiveStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A save would give two retrospectives the same name.
    #[error("a retrospective named '{0}' already exists")]
    DuplicateName(String),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row could not be turned back into a model.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("database lock poisoned")]
    LockPoisoned,
}

/// Persistence port for retrospectives and the feedback items they own.
///
/// Implementations keep names unique and preserve feedback item order.
/// Paged queries return results in the store's natural (insertion) order.
#[cfg_attr(test, mockall::automock)]
pub trait RetrospectiveStore: Send + Sync {
    /// Exact, case-sensitive lookup by name.
    fn find_by_name(&self, name: &str) -> Result<Option<Retrospective>, StoreError>;

    fn find_all(&self, request: PageRequest) -> Result<Page<Retrospective>, StoreError>;

    /// Retrospectives held on exactly `date`.
    fn find_by_date(
        &self,
        date: NaiveDate,
        request: PageRequest,
    ) -> Result<Page<Retrospective>, StoreError>;

    /// Insert or update by identity.
    ///
    /// Assigns an id to the retrospective if it has none and to every feedback
    /// item without one, then returns the persisted form.
    fn save(&self, retrospective: Retrospective) -> Result<Retrospective, StoreError>;
}
