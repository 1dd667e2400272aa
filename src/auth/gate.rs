// src/auth/gate.rs
use crate::auth::session::{Role, Session, SessionStore};
use tracing::debug;

pub const LOGIN_PATH: &str = "/login";
pub const NEUTRAL_PATH: &str = "/";

/// Outcome of a navigation check. The router performs the actual redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardVerdict {
    pub allow: bool,
    pub redirect_to: Option<String>,
}

impl GuardVerdict {
    pub fn allow() -> Self {
        Self {
            allow: true,
            redirect_to: None,
        }
    }

    pub fn redirect(path: impl Into<String>) -> Self {
        Self {
            allow: false,
            redirect_to: Some(path.into()),
        }
    }
}

/// Decides whether the current session may reach a view.
///
/// Reads only the injected store; never fails. Wrap the store in a
/// `CachedSessionStore` when one request asks several questions.
pub struct AccessGate<S> {
    store: S,
    login_path: String,
    neutral_path: String,
}

impl<S: SessionStore> AccessGate<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            login_path: LOGIN_PATH.to_string(),
            neutral_path: NEUTRAL_PATH.to_string(),
        }
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn session(&self) -> Option<Session> {
        self.store.get()
    }

    /// A non-empty access token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.store.get().map_or(false, |s| s.has_token())
    }

    /// Exact, case-sensitive match on the stored role string.
    pub fn has_role(&self, required: Role) -> bool {
        self.store
            .get()
            .map_or(false, |s| s.role() == Some(required.as_str()))
    }

    pub fn role_based_landing_path<'a>(&self, default_path: &'a str) -> &'a str {
        let session = self.store.get();
        match session.as_ref().and_then(Session::role) {
            Some("student") => Role::Student.landing_path(),
            Some("owner") => Role::Owner.landing_path(),
            _ => default_path,
        }
    }

    /// Protected views: login first, then the role (if any) must match.
    pub fn guard(&self, target: &str, required_role: Option<Role>) -> GuardVerdict {
        let verdict = if !self.is_authenticated() {
            GuardVerdict::redirect(self.login_path.as_str())
        } else if required_role.map_or(false, |role| !self.has_role(role)) {
            GuardVerdict::redirect(self.neutral_path.as_str())
        } else {
            GuardVerdict::allow()
        };

        debug!(
            path = target,
            role = required_role.map(|r| r.as_str()),
            allow = verdict.allow,
            redirect = verdict.redirect_to.as_deref(),
            "guard"
        );
        verdict
    }

    /// Public-only views (login, signup): signed-in users go to their dashboard.
    pub fn public_guard(&self, target: &str) -> GuardVerdict {
        if !self.is_authenticated() {
            return GuardVerdict::allow();
        }
        let landing = self.role_based_landing_path(self.neutral_path.as_str());
        debug!(path = target, redirect = landing, "public guard");
        GuardVerdict::redirect(landing)
    }
}
