//! Shared async SQLite connection with embedded migrations.
//!
//! SQLite has a single writer, so the persistence layer holds one
//! `diesel-async` connection behind an async mutex instead of a pool. The
//! sync `SqliteConnection` is wrapped in `SyncConnectionWrapper`, which moves
//! each query onto the blocking thread pool.
//!
//! Opening a connection runs every pending migration before the handle is
//! returned, so repositories can assume the schema exists.

use std::sync::Arc;

use diesel::{Connection, SqliteConnection};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Migrations compiled into the binary.
pub(crate) const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// URL of a private in-memory database.
pub const IN_MEMORY_URL: &str = ":memory:";

/// Async wrapper around the SQLite connection.
pub(crate) type AsyncSqliteConnection = SyncConnectionWrapper<SqliteConnection>;

/// Errors that can occur while opening the database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The database file could not be opened.
    #[error("failed to open database {url}: {message}")]
    Open { url: String, message: String },

    /// A pending migration failed to apply.
    #[error("failed to run migrations: {message}")]
    Migration { message: String },

    /// The blocking open task was cancelled or panicked.
    #[error("database open task failed: {message}")]
    Task { message: String },
}

impl ConnectionError {
    /// Create an open error for `url`.
    pub fn open(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Open {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a migration error with the given message.
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration {
            message: message.into(),
        }
    }

    /// Create a task error with the given message.
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection.
///
/// # Example
///
/// ```ignore
/// let config = ConnectionConfig::new("buildings.sqlite3");
/// let conn = DbConnection::open(config).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    database_url: String,
}

impl ConnectionConfig {
    /// Create a configuration for the given database path or URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Configuration for a fresh in-memory database.
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_URL)
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Cloneable handle to the single migrated SQLite connection.
#[derive(Clone)]
pub struct DbConnection {
    inner: Arc<Mutex<AsyncSqliteConnection>>,
}

impl DbConnection {
    /// Open the database and apply pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::Open` when SQLite refuses the URL and
    /// `ConnectionError::Migration` when the schema cannot be brought up to
    /// date.
    pub async fn open(config: ConnectionConfig) -> Result<Self, ConnectionError> {
        let url = config.database_url;
        let conn = tokio::task::spawn_blocking(move || open_and_migrate(&url))
            .await
            .map_err(|err| ConnectionError::task(err.to_string()))??;

        Ok(Self {
            inner: Arc::new(Mutex::new(SyncConnectionWrapper::new(conn))),
        })
    }

    /// Wait for exclusive use of the connection.
    pub async fn lock(&self) -> MutexGuard<'_, AsyncSqliteConnection> {
        self.inner.lock().await
    }
}

fn open_and_migrate(url: &str) -> Result<SqliteConnection, ConnectionError> {
    let mut conn = SqliteConnection::establish(url)
        .map_err(|err| ConnectionError::open(url, err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| ConnectionError::migration(err.to_string()))?;
    if applied.is_empty() {
        debug!(url, "database schema up to date");
    } else {
        info!(url, count = applied.len(), "applied database migrations");
    }
    Ok(conn)
}

#[cfg(test)]
mod tests {
    //! Connection opening and migration coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_keeps_the_url() {
        assert_eq!(ConnectionConfig::new("a.db").database_url(), "a.db");
        assert_eq!(ConnectionConfig::in_memory().database_url(), IN_MEMORY_URL);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn opening_in_memory_applies_migrations() {
        let conn = DbConnection::open(ConnectionConfig::in_memory())
            .await
            .expect("in-memory database opens");
        drop(conn.lock().await);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn opening_an_unreachable_path_fails() {
        let err = DbConnection::open(ConnectionConfig::new(
            "/nonexistent-directory/for/buildings/test.sqlite3",
        ))
        .await
        .err()
        .expect("open fails");
        assert!(matches!(err, ConnectionError::Open { .. }));
    }

    #[rstest]
    fn error_messages_carry_context() {
        let err = ConnectionError::open("x.db", "locked");
        assert_eq!(err.to_string(), "failed to open database x.db: locked");
    }
}
