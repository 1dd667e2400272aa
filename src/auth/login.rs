// src/auth/login.rs
use rusqlite::Connection;
use tracing::info;

use crate::auth::session::{Role, Session, SessionStore, SessionUser};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::generate_token_default;
use crate::db::notifications;
use crate::db::users::{self as db_users, NewUser};
use crate::domain::notification::KIND_WELCOME;
use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct LoginConfig {
    pub min_password_len: usize,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self { min_password_len: 8 }
    }
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

pub struct LoginService {
    cfg: LoginConfig,
}

impl LoginService {
    pub fn new(cfg: LoginConfig) -> Self {
        Self { cfg }
    }

    /// Trim + lowercase, minimal sanity check.
    pub fn normalize_email(email: &str) -> Result<String, ServerError> {
        let e = email.trim().to_lowercase();
        if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
            return Err(ServerError::BadRequest("invalid email".into()));
        }
        Ok(e)
    }

    fn check_password_len(&self, password: &str) -> Result<(), ServerError> {
        if password.chars().count() < self.cfg.min_password_len {
            return Err(ServerError::BadRequest(format!(
                "password must be at least {} characters",
                self.cfg.min_password_len
            )));
        }
        Ok(())
    }

    /// Create the account and greet it with a welcome notification.
    /// Both rows land in one transaction.
    pub fn signup(
        &self,
        conn: &mut Connection,
        form: &SignupForm,
        now: i64,
    ) -> Result<SessionUser, ServerError> {
        let email = Self::normalize_email(&form.email)?;
        self.check_password_len(&form.password)?;

        let first_name = form.first_name.trim();
        if first_name.is_empty() {
            return Err(ServerError::BadRequest("first name is required".into()));
        }

        let hash = hash_password(&form.password)?;

        let tx = conn
            .transaction()
            .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

        let user_id = db_users::insert_user(
            &tx,
            &NewUser {
                email: &email,
                password_hash: &hash,
                first_name,
                last_name: form.last_name.trim(),
                role: form.role,
            },
            now,
        )?;

        notifications::insert(
            &tx,
            user_id,
            KIND_WELCOME,
            "Welcome aboard",
            &format!("Hi {first_name}, your {} account is ready.", form.role),
            now,
        )?;

        tx.commit()
            .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

        info!(user_id, role = form.role.as_str(), "account created");

        Ok(SessionUser {
            id: user_id,
            email,
            first_name: first_name.to_string(),
            last_name: form.last_name.trim().to_string(),
            role: Some(form.role.as_str().to_string()),
            verified: false,
        })
    }

    /// Check credentials. Unknown email and wrong password look the same to the caller.
    pub fn authenticate(
        &self,
        conn: &Connection,
        email: &str,
        password: &str,
        now: i64,
    ) -> Result<SessionUser, ServerError> {
        let email = Self::normalize_email(email)?;
        let rejected = || ServerError::Unauthorized("invalid email or password".into());

        let row = db_users::find_user_by_email(conn, &email)?.ok_or_else(rejected)?;
        if !verify_password(password, &row.password_hash) {
            return Err(rejected());
        }

        db_users::touch_last_login(conn, row.id, now)?;
        Ok(row.to_session_user())
    }

    /// Rename the account and return the updated profile.
    pub fn update_profile(
        &self,
        conn: &Connection,
        user_id: i64,
        first_name: &str,
        last_name: &str,
    ) -> Result<SessionUser, ServerError> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(ServerError::BadRequest("first name is required".into()));
        }
        db_users::update_names(conn, user_id, first_name, last_name.trim())?;
        let row = db_users::find_user_by_id(conn, user_id)?.ok_or(ServerError::NotFound)?;
        info!(user_id, "profile updated");
        Ok(row.to_session_user())
    }

    /// Replace the password after checking the current one.
    pub fn change_password(
        &self,
        conn: &Connection,
        user_id: i64,
        current: &str,
        new: &str,
    ) -> Result<(), ServerError> {
        let row = db_users::find_user_by_id(conn, user_id)?.ok_or(ServerError::NotFound)?;
        if !verify_password(current, &row.password_hash) {
            return Err(ServerError::Unauthorized("current password is incorrect".into()));
        }
        self.check_password_len(new)?;

        let hash = hash_password(new)?;
        db_users::update_password_hash(conn, user_id, &hash)?;
        info!(user_id, "password changed");
        Ok(())
    }

    /// Persist a fresh authenticated session for `user` in `store`.
    pub fn start_session<S: SessionStore>(
        store: &mut S,
        user: &SessionUser,
    ) -> Result<Session, ServerError> {
        let session = Session {
            access_token: Some(generate_token_default()),
            refresh_token: Some(generate_token_default()),
            user: Some(user.clone()),
        };
        store.set(&session)?;
        info!(user_id = user.id, "session started");
        Ok(session)
    }

    pub fn end_session<S: SessionStore>(store: &mut S) -> Result<(), ServerError> {
        let user_id = store.get().and_then(|s| s.user).map(|u| u.id);
        store.clear()?;
        info!(user_id, "session ended");
        Ok(())
    }
}
