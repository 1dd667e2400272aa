// src/db/notifications.rs
use crate::domain::notification::Notification;
use crate::errors::ServerError;
use rusqlite::{params, Connection};

pub fn insert(
    conn: &Connection,
    user_id: i64,
    kind: &str,
    title: &str,
    message: &str,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        "insert into notifications (user_id, kind, title, message, created_at) values (?, ?, ?, ?, ?)",
        params![user_id, kind, title, message, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert notification failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

/// Newest first.
pub fn list_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Notification>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select id, kind, title, message, created_at, read_at is not null
            from notifications
            where user_id = ?
            order by created_at desc, id desc
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], |r| {
            Ok(Notification {
                id: r.get(0)?,
                kind: r.get(1)?,
                title: r.get(2)?,
                message: r.get(3)?,
                created_at: r.get(4)?,
                read: r.get(5)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn unread_count(conn: &Connection, user_id: i64) -> Result<i64, ServerError> {
    conn.query_row(
        "select count(*) from notifications where user_id = ? and read_at is null",
        params![user_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count notifications failed: {e}")))
}

/// Scoped to the owner: another user's notification id is `NotFound`.
pub fn mark_read(conn: &Connection, user_id: i64, id: i64, now: i64) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            "update notifications set read_at = coalesce(read_at, ?) where id = ? and user_id = ?",
            params![now, id, user_id],
        )
        .map_err(|e| ServerError::DbError(format!("mark notification read failed: {e}")))?;
    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn mark_all_read(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update notifications set read_at = ? where user_id = ? and read_at is null",
        params![now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("mark all read failed: {e}")))?;
    Ok(())
}

pub fn delete(conn: &Connection, user_id: i64, id: i64) -> Result<(), ServerError> {
    let deleted = conn
        .execute(
            "delete from notifications where id = ? and user_id = ?",
            params![id, user_id],
        )
        .map_err(|e| ServerError::DbError(format!("delete notification failed: {e}")))?;
    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn clear_all(conn: &Connection, user_id: i64) -> Result<(), ServerError> {
    conn.execute(
        "delete from notifications where user_id = ?",
        params![user_id],
    )
    .map_err(|e| ServerError::DbError(format!("clear notifications failed: {e}")))?;
    Ok(())
}
