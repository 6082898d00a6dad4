use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error status; `detail` is its message.
    #[error("{detail}")]
    Api { status: u16, detail: String },

    #[error("Error de conexión: {0}")]
    Connection(String),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    #[error("Demasiados intentos fallidos. El acceso ha sido bloqueado.")]
    LockedOut,

    #[error("Por favor resuelva el CAPTCHA")]
    ChallengeMissing,

    #[error("Ingrese un número válido")]
    ChallengeInvalid,

    #[error("CAPTCHA incorrecto. Intente nuevamente.")]
    ChallengeFailed,

    #[error("No hay una sesión iniciada")]
    NotLoggedIn,

    #[error("La sede {site} no atiende los días {weekday}")]
    DateNotAllowed { site: String, weekday: String },

    #[error("Fecha inválida: {0}")]
    InvalidDate(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Connection(err.to_string())
        }
    }
}
