// src/db/favorites.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection};

/// Idempotent: favoriting twice keeps the first timestamp.
pub fn add_favorite(
    conn: &Connection,
    user_id: i64,
    hostel_id: i64,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "insert or ignore into favorites (user_id, hostel_id, created_at) values (?, ?, ?)",
        params![user_id, hostel_id, now],
    )
    .map_err(|e| ServerError::DbError(format!("add favorite failed: {e}")))?;
    Ok(())
}

pub fn remove_favorite(conn: &Connection, user_id: i64, hostel_id: i64) -> Result<(), ServerError> {
    conn.execute(
        "delete from favorites where user_id = ? and hostel_id = ?",
        params![user_id, hostel_id],
    )
    .map_err(|e| ServerError::DbError(format!("remove favorite failed: {e}")))?;
    Ok(())
}

/// Hostel ids with the time they were added, newest first.
pub fn favorites_for_user(conn: &Connection, user_id: i64) -> Result<Vec<(i64, i64)>, ServerError> {
    let mut stmt = conn
        .prepare(
            "select hostel_id, created_at from favorites where user_id = ? order by created_at desc, id desc",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
