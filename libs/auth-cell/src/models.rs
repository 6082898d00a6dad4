use thiserror::Error;

use shared_database::DbError;
use shared_models::error::AppError;

#[derive(Debug, Error)]
pub enum UserError {
    /// Same message for unknown users and wrong passwords.
    #[error("Credenciales incorrectas")]
    InvalidCredentials,

    #[error("El usuario no puede estar vacío")]
    EmptyUsername,

    #[error("El nombre de usuario ya existe")]
    UsernameTaken,

    #[error("Usuario no encontrado")]
    NotFound,

    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidCredentials => AppError::Auth(err.to_string()),
            UserError::EmptyUsername | UserError::UsernameTaken => AppError::BadRequest(err.to_string()),
            UserError::NotFound => AppError::NotFound(err.to_string()),
            UserError::Database(db) => db.into(),
        }
    }
}
