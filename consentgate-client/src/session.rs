//! Session context and the auth-failure recovery policy.
//!
//! A `Session` is an explicit handle on the token store, cloned into the API
//! client and every workflow that needs it. The session is authenticated exactly
//! when a token is held; only a successful login or registration stores one.
//!
//! Every start or end of a session bumps a shared generation counter. Pages
//! remember the generation their state was derived from through a
//! [`SessionEpoch`] and drop that state once the counter moves on, so a
//! teardown triggered by one page reaches all of them.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use consentgate_core::TokenResponse;
use consentgate_store::TokenStore;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shown in a workflow's status line after the session was torn down
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please sign in again.";

/// Case-insensitive substrings the legacy detector treats as auth failures
pub const LEGACY_AUTH_MARKERS: [&str; 5] = [
    "not authenticated",
    "unauthorized",
    "401",
    "invalid token",
    "token",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Unauthenticated,
}

#[derive(Clone, Debug)]
pub struct Session {
    tokens: TokenStore,
    generation: Arc<AtomicU64>,
}

impl Session {
    pub fn new(tokens: TokenStore) -> Self {
        Self {
            tokens,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(TokenStore::in_memory())
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.get_token()
    }

    pub fn state(&self) -> SessionState {
        if self.tokens.get_token().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Bumped on every login and every teardown
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub(crate) fn begin(&self, token: &TokenResponse) {
        self.tokens.set_token(&token.access_token);
        self.generation.fetch_add(1, Ordering::SeqCst);
        tracing::info!("Session started");
    }

    /// Drop the token. Returns false when the store kept it; page state is
    /// invalidated either way.
    pub fn end(&self) -> bool {
        let cleared = self.tokens.clear_token();
        self.generation.fetch_add(1, Ordering::SeqCst);
        cleared
    }
}

/// The session generation a page's state belongs to
#[derive(Debug, Clone)]
pub struct SessionEpoch {
    session: Session,
    seen: u64,
}

impl SessionEpoch {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            seen: session.generation(),
        }
    }

    /// False once a login or teardown happened since the last sync
    pub fn is_current(&self) -> bool {
        self.seen == self.session.generation()
    }

    /// Catch up with the session. Returns true when it had moved on.
    pub fn sync(&mut self) -> bool {
        let now = self.session.generation();
        let moved = now != self.seen;
        self.seen = now;
        moved
    }
}

/// How a failed call is classified as "the session is no longer valid"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFailureDetection {
    /// 401 or 403 response
    #[default]
    Status,
    /// 401 only; a 403 is reported but keeps the session
    UnauthorizedOnly,
    /// Status-based detection plus substring matching on the message.
    /// Matches unrelated messages that mention "token"; parity use only.
    LegacyMessage,
}

impl AuthFailureDetection {
    pub fn matches(&self, err: &ApiError) -> bool {
        match self {
            AuthFailureDetection::Status => err.is_auth_failure(),
            AuthFailureDetection::UnauthorizedOnly => {
                matches!(err, ApiError::Unauthorized { status: 401, .. })
            }
            AuthFailureDetection::LegacyMessage => {
                if err.is_auth_failure() {
                    return true;
                }
                let message = err.to_string().to_lowercase();
                LEGACY_AUTH_MARKERS.iter().any(|m| message.contains(m))
            }
        }
    }
}

/// Page state that only makes sense while the session is valid
pub trait SessionBound {
    /// Drop profile, fetched records, selections and anything else derived
    /// from the signed-in account.
    fn reset_session_state(&mut self);
}

/// Clears the token and dependent page state when a call fails for auth reasons.
/// Never retries.
#[derive(Clone, Debug)]
pub struct RecoveryPolicy {
    session: Session,
    detection: AuthFailureDetection,
}

impl RecoveryPolicy {
    pub fn new(session: Session, detection: AuthFailureDetection) -> Self {
        Self { session, detection }
    }

    pub fn detection(&self) -> AuthFailureDetection {
        self.detection
    }

    /// Returns true when the session was torn down.
    ///
    /// Only an authenticated session can end; an auth failure without a token
    /// (a rejected login, say) is left to the caller to report.
    pub fn handle<P: SessionBound + ?Sized>(&self, err: &ApiError, page: &mut P) -> bool {
        if !self.detection.matches(err) || !self.session.is_authenticated() {
            return false;
        }
        if !self.session.end() {
            tracing::error!("Token could not be cleared; the next request will still send it");
        }
        page.reset_session_state();
        tracing::info!(error = %err, "Session ended after auth failure");
        true
    }

    /// Passes `result` through unchanged, tearing down the session on auth failure
    pub fn guard<T, P: SessionBound + ?Sized>(
        &self,
        result: crate::Result<T>,
        page: &mut P,
    ) -> crate::Result<T> {
        if let Err(ref err) = result {
            self.handle(err, page);
        }
        result
    }
}
