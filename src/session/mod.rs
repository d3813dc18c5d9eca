//! Portal session management
//!
//! The portal is cookie-authenticated: a browser login flow (outside this
//! tool) produces a set of cookies that every API call must carry. This
//! module owns loading that session state and refreshing it on demand.

mod store;

pub use store::{FileSessionStore, default_session_path};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// User agent sent when the session file does not carry one
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

/// A single cookie captured from the browser login flow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
}

/// Auth state attached to every portal request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    /// Cookies from the browser login
    pub cookies: Vec<SessionCookie>,
    /// User agent the session was established with
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl SessionState {
    /// Render the cookies as a `Cookie` request header value
    #[must_use]
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// User agent to send, falling back to [`DEFAULT_USER_AGENT`]
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

/// Source of portal session state.
///
/// `reauthenticate` is asked for at most once per gateway call when the
/// portal signals an expired session. It must be safe to call repeatedly.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Current session state
    async fn session(&self) -> Result<SessionState>;

    /// Attempt to refresh the session. Returns `false` when no fresher
    /// state could be obtained.
    async fn reauthenticate(&self) -> Result<bool>;
}
