//! SQLite connection manager.
//!
//! Every operation works against one local database file and opens its own
//! physical connection: there is no pool and no long-lived handle. A
//! [`Database`] only describes *where* and *how* to connect; [`Database::acquire`]
//! hands out a [`DbConn`] guard that owns exactly one connection and closes it
//! when released or dropped.
//!
//! # Example
//! ```rust,no_run
//! # async fn demo() -> db::Result<()> {
//! use db::{ConnectOpts, Database};
//!
//! let db = Database::open("sqlite://./data/app.db", ConnectOpts::default())?;
//! db.bootstrap(&["CREATE TABLE IF NOT EXISTS t (id INTEGER PRIMARY KEY)"]).await?;
//!
//! let mut conn = db.acquire().await?;
//! sqlx::query("SELECT 1").execute(&mut *conn).await?;
//! conn.release().await?;
//! # Ok(())
//! # }
//! ```

mod sqlite;

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, Sqlite, Transaction};
use thiserror::Error;

pub use sqlite::absolutize_dsn;
use sqlite::{ensure_parent_dir, is_memory_dsn, parse_sqlite_dsn, Pragmas};

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for the connection manager.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unsupported DSN: {0}")]
    UnsupportedDsn(String),

    #[error("In-memory SQLite is not supported with per-operation connections: {0}")]
    MemoryDsn(String),

    #[error("Empty SQLite path in DSN: {0}")]
    EmptyPath(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Default lock wait applied to every connection, in line with the usual
/// 5 second driver default.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Connection options.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// How long a connection waits on a locked database before failing.
    /// A `busy_timeout` PRAGMA in the DSN takes precedence.
    pub busy_timeout: Option<Duration>,
    /// Create parent directories of the database file if missing.
    pub create_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            busy_timeout: Some(DEFAULT_BUSY_TIMEOUT),
            create_dirs: true,
        }
    }
}

/// Handle to the single local database file.
///
/// Holds no open connection; cloning is cheap.
#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Database {
    /// Resolve a DSN into connect options for a file-backed database.
    ///
    /// Accepts `sqlite://<path>`, `sqlite:<path>` and plain file paths.
    pub fn open(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        if is_memory_dsn(dsn) {
            return Err(DbError::MemoryDsn(dsn.to_string()));
        }

        let parsed = parse_sqlite_dsn(dsn)?;
        if opts.create_dirs {
            ensure_parent_dir(&parsed.path)?;
        }

        let pragmas = Pragmas::from_pairs(&parsed.params);
        let mut options = SqliteConnectOptions::new()
            .filename(&parsed.path)
            .create_if_missing(true);
        if let Some(timeout) = opts.busy_timeout {
            options = options.busy_timeout(timeout);
        }
        options = pragmas.apply(options);

        tracing::debug!(path = %parsed.path.display(), ?pragmas, "SQLite database configured");

        Ok(Self {
            path: parsed.path,
            options,
        })
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh physical connection. No pooling, no retry.
    pub async fn acquire(&self) -> Result<DbConn> {
        let inner = self.options.connect().await?;
        tracing::trace!(path = %self.path.display(), "connection opened");
        Ok(DbConn { inner })
    }

    /// Run idempotent DDL (e.g. `CREATE TABLE IF NOT EXISTS`) on one connection.
    pub async fn bootstrap(&self, statements: &[&str]) -> Result<()> {
        let mut conn = self.acquire().await?;
        for stmt in statements {
            sqlx::query(stmt).execute(&mut *conn).await?;
        }
        conn.release().await
    }
}

/// One physical connection, closed on [`DbConn::release`] or on drop.
#[derive(Debug)]
pub struct DbConn {
    inner: SqliteConnection,
}

impl DbConn {
    /// Start a transaction on this connection.
    ///
    /// Dropping the transaction without committing rolls it back.
    pub async fn begin(&mut self) -> Result<Transaction<'_, Sqlite>> {
        Ok(self.inner.begin().await?)
    }

    /// Close the connection explicitly.
    pub async fn release(self) -> Result<()> {
        self.inner.close().await?;
        tracing::trace!("connection released");
        Ok(())
    }
}

impl Deref for DbConn {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
