/*!
 * Review store connection management.
 *
 * Wraps a single SQLite connection behind a mutex and hands it to async
 * callers through spawn_blocking, keeping store I/O off the runtime threads.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::schema;

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "review.db";

/// Default database directory name under the user's data directory
const DEFAULT_DB_DIRNAME: &str = "transprep";

/// Shared handle to the review store's SQLite connection
#[derive(Clone)]
pub struct StoreConnection {
    /// The connection; every operation serializes on this mutex
    connection: Arc<Mutex<Connection>>,
}

impl StoreConnection {
    /// Open the store at the default location
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_database_path()?)
    }

    /// Open (or create) the store at the given path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create review store directory: {:?}", parent))?;
        }

        info!("Opening review store at: {:?}", db_path);

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open review store: {:?}", db_path))?;
        schema::initialize_schema(&conn)?;

        Ok(Self::wrap(conn))
    }

    /// Open an in-memory store (for testing)
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory review store");

        let conn = Connection::open_in_memory().context("Failed to create in-memory store")?;
        schema::initialize_schema(&conn)?;

        Ok(Self::wrap(conn))
    }

    fn wrap(conn: Connection) -> Self {
        Self {
            connection: Arc::new(Mutex::new(conn)),
        }
    }

    /// Default database path under the user's local data directory
    pub fn default_database_path() -> Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Run a store operation on the blocking pool
    ///
    /// Acquires the connection mutex inside spawn_blocking so neither the
    /// lock wait nor the SQLite call blocks the async runtime.
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| anyhow::anyhow!("Failed to acquire store lock: {}", e))?;

            f(&conn)
        })
        .await
        .context("Review store task panicked")?
    }
}
