use thiserror::Error;

use shared_database::DbError;
use shared_models::error::AppError;

#[derive(Debug, Error)]
pub enum CompanyError {
    #[error("Empresa no encontrada")]
    NotFound,

    #[error("{0}")]
    InvalidCapacity(String),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<CompanyError> for AppError {
    fn from(err: CompanyError) -> Self {
        match err {
            CompanyError::NotFound => AppError::NotFound(err.to_string()),
            CompanyError::InvalidCapacity(msg) => AppError::ValidationError(msg),
            CompanyError::Database(db) => db.into(),
        }
    }
}
