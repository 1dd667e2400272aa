// src/auth/session.rs
use crate::domain::lenient::lenient;
use crate::errors::ServerError;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Owner => "owner",
        }
    }

    pub fn landing_path(&self) -> &'static str {
        match self {
            Role::Student => "/student/dashboard",
            Role::Owner => "/owner/dashboard",
        }
    }
}

impl FromStr for Role {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "owner" => Ok(Role::Owner),
            other => Err(ServerError::BadRequest(format!("unknown role: {other}"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display fields of the signed-in user, as persisted with the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Kept as the raw stored string so unknown roles survive a round trip.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

impl SessionUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .collect::<String>()
            .to_uppercase()
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, deserialize_with = "lenient")]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub refresh_token: Option<String>,
    /// A malformed user record reads as no user; the tokens are kept.
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<SessionUser>,
}

impl Session {
    /// Parses a stored session document. Anything unreadable is an absent session.
    pub fn from_stored(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("discarding unreadable session record: {e}");
                None
            }
        }
    }

    pub fn to_stored(&self) -> Result<String, ServerError> {
        serde_json::to_string(self).map_err(|e| {
            error!("serialize session failed: {e}");
            ServerError::InternalError
        })
    }

    pub fn has_token(&self) -> bool {
        self.access_token.as_deref().map_or(false, |t| !t.is_empty())
    }

    pub fn role(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.role.as_deref())
    }
}

/// Durable home of the current browser's session.
///
/// `get` never fails: storage errors and unreadable records both mean "no session".
pub trait SessionStore {
    fn get(&self) -> Option<Session>;
    fn set(&mut self, session: &Session) -> Result<(), ServerError>;
    fn clear(&mut self) -> Result<(), ServerError>;
}

/// Keeps the serialized document in memory, the way browser storage would.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    raw: Option<String>,
}

#[cfg(test)]
impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an arbitrary stored document, well-formed or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

#[cfg(test)]
impl SessionStore for InMemorySessionStore {
    fn get(&self) -> Option<Session> {
        self.raw.as_deref().and_then(Session::from_stored)
    }

    fn set(&mut self, session: &Session) -> Result<(), ServerError> {
        self.raw = Some(session.to_stored()?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ServerError> {
        self.raw = None;
        Ok(())
    }
}

/// Caches the first `get` of the wrapped store.
/// Writes go through and refresh the cache.
pub struct CachedSessionStore<S> {
    inner: S,
    cached: RefCell<Option<Option<Session>>>,
}

impl<S: SessionStore> CachedSessionStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cached: RefCell::new(None),
        }
    }
}

impl<S: SessionStore> SessionStore for CachedSessionStore<S> {
    fn get(&self) -> Option<Session> {
        if let Some(hit) = self.cached.borrow().as_ref() {
            return hit.clone();
        }
        let loaded = self.inner.get();
        self.cached.replace(Some(loaded.clone()));
        loaded
    }

    fn set(&mut self, session: &Session) -> Result<(), ServerError> {
        self.inner.set(session)?;
        self.cached.replace(Some(Some(session.clone())));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ServerError> {
        self.inner.clear()?;
        self.cached.replace(Some(None));
        Ok(())
    }
}

/// Stores whichever parts are given; absent parts keep their stored value.
pub fn set_auth_data<S: SessionStore>(
    store: &mut S,
    access_token: Option<&str>,
    refresh_token: Option<&str>,
    user: Option<&SessionUser>,
) -> Result<(), ServerError> {
    let mut session = store.get().unwrap_or_default();
    if let Some(access) = access_token.filter(|t| !t.is_empty()) {
        session.access_token = Some(access.to_string());
    }
    if let Some(refresh) = refresh_token.filter(|t| !t.is_empty()) {
        session.refresh_token = Some(refresh.to_string());
    }
    if let Some(user) = user {
        session.user = Some(user.clone());
    }
    store.set(&session)
}

pub fn update_stored_user<S: SessionStore>(
    store: &mut S,
    user: &SessionUser,
) -> Result<(), ServerError> {
    set_auth_data(store, None, None, Some(user))
}

pub fn clear_auth<S: SessionStore>(store: &mut S) -> Result<(), ServerError> {
    store.clear()
}
