//! SQLite persistence for the clinic scheduling service.

mod appointments;
mod blocking;
mod companies;
mod patients;
mod schema;
pub mod seed;
mod sites;
mod state;
mod users;

pub use appointments::{AppointmentRecord, NewAppointment};
pub use blocking::run_blocking;
pub use companies::CompanyRecord;
pub use patients::PatientRecord;
pub use schema::SCHEMA;
pub use sites::{NewSite, SiteRecord};
pub use state::AppState;
pub use users::UserRecord;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{Connection, TransactionBehavior};
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::error::AppError;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database connection lock poisoned")]
    LockPoisoned,
}

pub type DbResult<T> = Result<T, DbError>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        error!("Database failure: {}", err);
        AppError::Database("Error interno de base de datos".to_string())
    }
}

/// Shared handle to the store. Cloning is cheap; all clones use one connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open database at path, creating it and its reference rows if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        // Other handles on the same file wait for the write lock instead of failing.
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Self::initialize(conn)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    pub fn from_config(config: &AppConfig) -> DbResult<Self> {
        let path = config.database_path();
        debug!("Opening SQLite store at {}", path);
        if path == ":memory:" {
            Self::open_in_memory()
        } else {
            Self::open(path)
        }
    }

    fn initialize(conn: Connection) -> DbResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Session::new(&conn).seed_reference_data()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    /// Runs `f` against the connection without an explicit transaction.
    pub fn session<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<DbError>,
        F: FnOnce(&Session<'_>) -> Result<T, E>,
    {
        let conn = self.lock()?;
        f(&Session::new(&conn))
    }

    /// Runs `f` inside an IMMEDIATE transaction, committing only when it succeeds.
    ///
    /// The write lock is taken up front, so reads made inside `f` cannot be
    /// invalidated by another writer before the commit.
    pub fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<DbError>,
        F: FnOnce(&Session<'_>) -> Result<T, E>,
    {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(DbError::from)?;
        let out = f(&Session::new(&tx))?;
        tx.commit().map_err(DbError::from)?;
        Ok(out)
    }
}

/// Borrowed view of the connection used by one request.
pub struct Session<'c> {
    conn: &'c Connection,
}

impl<'c> Session<'c> {
    fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}
