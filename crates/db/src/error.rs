use labsite_core::error::CoreError;

use crate::documents::DocumentError;

/// Failure of a repository operation that can involve more than SQL:
/// post-merge validation or a JSON document backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),
}
