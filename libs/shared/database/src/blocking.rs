use tracing::error;

use shared_models::error::AppError;

/// Runs store work on tokio's blocking pool so a held connection lock never
/// parks an async worker.
pub async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        error!("Blocking store task failed: {}", e);
        AppError::Internal("Error interno del servidor".to_string())
    })?
}
