use thiserror::Error;

use shared_database::DbError;
use shared_models::error::AppError;
use shared_models::schedule::UnknownWeekday;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Sede no encontrada")]
    NotFound,

    #[error("{0}")]
    InvalidCapacity(String),

    #[error(transparent)]
    InvalidWeekday(#[from] UnknownWeekday),

    #[error("Fecha inválida: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<SiteError> for AppError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::NotFound => AppError::NotFound(err.to_string()),
            SiteError::InvalidCapacity(_) | SiteError::InvalidWeekday(_) | SiteError::InvalidDate(_) => {
                AppError::ValidationError(err.to_string())
            }
            SiteError::Database(db) => db.into(),
        }
    }
}
