use thiserror::Error;

use shared_database::DbError;
use shared_models::availability::CapacityExceeded;
use shared_models::error::AppError;
use shared_models::status::UnknownStatus;

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error("Cita no encontrada")]
    NotFound,

    #[error("El campo {0} es obligatorio")]
    MissingField(&'static str),

    #[error(transparent)]
    InvalidStatus(#[from] UnknownStatus),

    #[error(transparent)]
    CapacityExceeded(#[from] CapacityExceeded),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound => AppError::NotFound(err.to_string()),
            AppointmentError::MissingField(_) | AppointmentError::InvalidStatus(_) => {
                AppError::ValidationError(err.to_string())
            }
            AppointmentError::CapacityExceeded(exceeded) => AppError::CapacityExceeded(exceeded),
            AppointmentError::Database(db) => db.into(),
        }
    }
}

/// Trims a required text field, rejecting it when nothing is left.
pub(crate) fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AppointmentError> {
    match value.trim() {
        "" => Err(AppointmentError::MissingField(field)),
        trimmed => Ok(trimmed),
    }
}
