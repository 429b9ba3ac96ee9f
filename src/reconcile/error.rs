use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("identity {0} is already indexed")]
    DuplicateIdentity(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
