//! Persistence errors

use crate::variants::VariantError;
use shared::error::AppError;
use thiserror::Error;

/// Failure of a store operation; the editor state is never touched
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid variants: {0}")]
    Variant(#[from] VariantError),

    #[error("Storage quota exceeded: {required} bytes needed, quota is {quota}")]
    QuotaExceeded { required: u64, quota: u64 },

    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Remote(err.to_string())
    }
}

impl PersistenceError {
    /// Local database failure (any redb layer)
    pub fn is_database(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Transaction(_)
                | Self::Table(_)
                | Self::Storage(_)
                | Self::Commit(_)
        )
    }
}

impl From<PersistenceError> for AppError {
    fn from(err: PersistenceError) -> Self {
        let message = err.to_string();
        match err {
            PersistenceError::Validation(msg) => AppError::validation(msg),
            PersistenceError::Variant(e) => e.into(),
            PersistenceError::QuotaExceeded { required, quota } => {
                AppError::storage_full(required, quota)
            }
            PersistenceError::Serialization(_) => AppError::corrupted(message),
            PersistenceError::Remote(_) => AppError::network(message),
            PersistenceError::NotFound(id) => AppError::product_not_found(id),
            PersistenceError::PermissionDenied(_) => AppError::permission_denied(message),
            PersistenceError::Database(_)
            | PersistenceError::Transaction(_)
            | PersistenceError::Table(_)
            | PersistenceError::Storage(_)
            | PersistenceError::Commit(_) => AppError::database(message),
        }
    }
}
