// src/db/session_store.rs
use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

use crate::auth::session::{Session, SessionStore};
use crate::auth::token::hash_token;
use crate::errors::ServerError;

/// Session document for one browser, keyed by the hash of its `session` cookie.
/// Without a cookie the store is empty and refuses writes.
pub struct SqliteSessionStore<'c> {
    conn: &'c Connection,
    key_hash: Option<[u8; 32]>,
    now: i64,
}

impl<'c> SqliteSessionStore<'c> {
    pub fn new(conn: &'c Connection, cookie_key: Option<&str>, now: i64) -> Self {
        Self {
            conn,
            key_hash: cookie_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(hash_token),
            now,
        }
    }

    fn load(&self) -> Result<Option<String>, ServerError> {
        let Some(key_hash) = self.key_hash else {
            return Ok(None);
        };
        self.conn
            .query_row(
                "select value from session_store where key_hash = ?",
                params![key_hash.as_slice()],
                |r| r.get(0),
            )
            .optional()
            .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
    }
}

impl SessionStore for SqliteSessionStore<'_> {
    fn get(&self) -> Option<Session> {
        match self.load() {
            Ok(raw) => raw.as_deref().and_then(Session::from_stored),
            Err(e) => {
                warn!("treating session as absent: {e}");
                None
            }
        }
    }

    fn set(&mut self, session: &Session) -> Result<(), ServerError> {
        let key_hash = self
            .key_hash
            .ok_or_else(|| ServerError::Unauthorized("no session cookie".into()))?;
        let value = session.to_stored()?;

        self.conn
            .execute(
                r#"
                insert into session_store (key_hash, value, updated_at)
                values (?, ?, ?)
                on conflict(key_hash) do update set
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                params![key_hash.as_slice(), value, self.now],
            )
            .map_err(|e| ServerError::DbError(format!("session write failed: {e}")))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ServerError> {
        let Some(key_hash) = self.key_hash else {
            return Ok(());
        };
        self.conn
            .execute(
                "delete from session_store where key_hash = ?",
                params![key_hash.as_slice()],
            )
            .map_err(|e| ServerError::DbError(format!("session delete failed: {e}")))?;
        Ok(())
    }
}
