//! Errors returned by article operations.

use thiserror::Error;

use crate::models::ArticleId;
use crate::store::StoreError;

/// Failure of an article read or write.
#[derive(Debug, Error)]
pub enum ArticleError {
    /// No body is stored under this id.
    #[error("article not found: {0}")]
    NotFound(ArticleId),

    /// The store failed or returned unusable data.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub type ArticleResult<T> = std::result::Result<T, ArticleError>;
