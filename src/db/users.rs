// src/db/users.rs
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::auth::session::{Role, SessionUser};
use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub verified: bool,
}

impl UserRow {
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: Some(self.role.clone()),
            verified: self.verified,
        }
    }
}

pub struct NewUser<'a> {
    /// Already normalized by the caller (trim/lowercase).
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role: Role,
}

/// Insert a user and return the new id. A taken email is a `Conflict`.
pub fn insert_user(conn: &Connection, user: &NewUser<'_>, now: i64) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into users (email, password_hash, first_name, last_name, role, created_at)
        values (?, ?, ?, ?, ?, ?)
        "#,
        params![
            user.email,
            user.password_hash,
            user.first_name,
            user.last_name,
            user.role.as_str(),
            now
        ],
    )
    .map_err(|e| match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => {
            ServerError::Conflict("an account with this email already exists".into())
        }
        _ => ServerError::DbError(format!("insert user failed: {e}")),
    })?;

    Ok(conn.last_insert_rowid())
}

const SELECT_USER: &str =
    "select id, email, password_hash, first_name, last_name, role, verified from users";

fn user_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: r.get(0)?,
        email: r.get(1)?,
        password_hash: r.get(2)?,
        first_name: r.get(3)?,
        last_name: r.get(4)?,
        role: r.get(5)?,
        verified: r.get(6)?,
    })
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>, ServerError> {
    conn.query_row(&format!("{SELECT_USER} where email = ?"), params![email], user_from_row)
        .optional()
        .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

pub fn find_user_by_id(conn: &Connection, user_id: i64) -> Result<Option<UserRow>, ServerError> {
    conn.query_row(&format!("{SELECT_USER} where id = ?"), params![user_id], user_from_row)
        .optional()
        .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

pub fn update_names(
    conn: &Connection,
    user_id: i64,
    first_name: &str,
    last_name: &str,
) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            "update users set first_name = ?, last_name = ? where id = ?",
            params![first_name, last_name, user_id],
        )
        .map_err(|e| ServerError::DbError(format!("update user names failed: {e}")))?;
    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn update_password_hash(conn: &Connection, user_id: i64, hash: &str) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            "update users set password_hash = ? where id = ?",
            params![hash, user_id],
        )
        .map_err(|e| ServerError::DbError(format!("update password failed: {e}")))?;
    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn touch_last_login(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update users set last_login_at = ? where id = ?",
        params![now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last_login_at failed: {e}")))?;
    Ok(())
}
