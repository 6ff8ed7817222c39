//! Current-session lookup capability.
//!
//! Sign-in, sign-up and token refresh belong to the host's auth provider.
//! Core only needs to know who the current user is, if anyone.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque user identifier issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
}

/// Supplies the active session, if any.
pub trait SessionProvider {
    fn current_session(&self) -> Option<Session>;
}

/// Session provider returning a fixed answer.
///
/// Used by the CLI (user passed on the command line) and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    session: Option<Session>,
}

impl StaticSession {
    /// Provider with a signed-in user.
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            session: Some(Session {
                user_id: UserId::new(user_id),
            }),
        }
    }

    /// Provider with nobody signed in.
    pub fn anonymous() -> Self {
        Self { session: None }
    }
}

impl SessionProvider for StaticSession {
    fn current_session(&self) -> Option<Session> {
        self.session.clone()
    }
}
