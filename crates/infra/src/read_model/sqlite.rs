//! SQLite-backed store handle.
//!
//! The store is owned and written by an external system. This handle never
//! creates the database file and opens every connection read-only.
//!
//! ## Connection lifecycle
//!
//! There is no pool. Each report opens a fresh connection with [`SqliteStore::open`]
//! and hands it back through [`SqliteStore::release`] once the report is done,
//! whether the report succeeded or not. Dropping a connection without
//! releasing it still closes the underlying database handle.

use std::path::PathBuf;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

use storefront_core::ReportError;

/// Convert a driver error into the report taxonomy.
pub fn store_error(err: sqlx::Error) -> ReportError {
    ReportError::store_unavailable(err.to_string())
}

/// Read-only handle to the SQLite store.
///
/// Cheap to clone; holds only connection options.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl SqliteStore {
    /// Create a handle for the database file at `path`.
    ///
    /// No connection is made here; use [`SqliteStore::check`] to verify the
    /// file is a readable database.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false);

        Self { path, options }
    }

    /// Open a fresh connection for one report.
    pub async fn open(&self) -> Result<SqliteConnection, ReportError> {
        self.options.connect().await.map_err(store_error)
    }

    /// Close a connection obtained from [`SqliteStore::open`].
    ///
    /// Close failures are logged and swallowed: the report result is already
    /// decided by the time the connection is released.
    pub async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            tracing::warn!(path = %self.path.display(), "failed to close store connection: {e}");
        }
    }

    /// Open a connection, run a trivial query, and close it again.
    pub async fn check(&self) -> Result<(), ReportError> {
        let mut conn = self.open().await?;
        let probe = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sqlite_master")
            .fetch_one(&mut conn)
            .await
            .map(|_| ())
            .map_err(store_error);
        self.release(conn).await;
        probe
    }
}
