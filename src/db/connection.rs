use rusqlite::Connection;
use std::cell::RefCell;
use std::fs;
use tracing::info;

use crate::errors::ServerError;

// Thread-local connection slot, tagged with the path it was opened for.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = RefCell::new(None);
}

#[derive(Clone, Debug)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let stale = !matches!(slot.as_ref(), Some((path, _)) if *path == self.path);
                if stale {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
                    conn.execute_batch("PRAGMA foreign_keys = ON;")
                        .map_err(|e| ServerError::DbError(format!("Enable foreign keys failed: {e}")))?;
                    *slot = Some((self.path.clone(), conn));
                }
                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(ServerError::InternalError),
                }
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

/// Initialize database from a SQL schema file
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), ServerError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| ServerError::DbError(format!("Failed to read schema file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    info!(schema = schema_path, db = db.path(), "database initialized");
    Ok(())
}
