//! The session registry: issues tokens and resolves them back to sessions.
//!
//! Responsibilities:
//! - Registering a session when its token is issued
//! - Resolving a presented token to the live session (or nothing)
//! - Revoking sessions when their room is evicted
//!
//! # Fail-closed lookups
//!
//! `validate_token` never returns an error. A token that doesn't decode,
//! doesn't verify, names a session we don't know, or disagrees with the
//! stored session all produce `None`. The reason is logged at debug
//! level and goes no further.
//!
//! # Concurrency note
//!
//! Like the room matchmaker, `SessionRegistry` is a plain `HashMap`
//! owner with no internal locking. The lobby keeps it behind a mutex.

use std::collections::HashMap;
use std::sync::Arc;

use tandem_protocol::{SessionId, TokenCodec};

use crate::Session;

/// Maps session IDs to sessions and signs/verifies their tokens.
///
/// ```text
/// matchmaker seats player ──→ issue_token() ──→ [registered]
///                                                   │
///          validate_token(token) ◄──────────────────┤
///                                                   ▼
///                                    revoke() (room evicted)
/// ```
#[derive(Debug)]
pub struct SessionRegistry {
    /// Every live session, keyed by its ID.
    sessions: HashMap<SessionId, Arc<Session>>,

    /// Signs issued tokens and verifies presented ones.
    codec: TokenCodec,
}

impl SessionRegistry {
    /// Creates an empty registry that signs with `codec`.
    pub fn new(codec: TokenCodec) -> Self {
        Self {
            sessions: HashMap::new(),
            codec,
        }
    }

    /// Registers the session and returns its bearer token.
    ///
    /// The same session always yields the same token for a given key.
    /// Registering a session twice is harmless; the entry is replaced
    /// with the identical record.
    pub fn issue_token(&mut self, session: Arc<Session>) -> String {
        let token = self.codec.encode(&session.claims());
        let session_id = session.session_id();

        self.sessions.insert(session_id, session);
        tracing::debug!(%session_id, "session token issued");

        token
    }

    /// Resolves a presented token to its live session.
    ///
    /// Returns `None` for malformed, forged, unknown, or revoked tokens.
    pub fn validate_token(&self, token: &str) -> Option<Arc<Session>> {
        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "token rejected");
                return None;
            }
        };

        let Some(session) = self.sessions.get(&claims.session_id) else {
            tracing::debug!(
                session_id = %claims.session_id,
                "token names an unknown session"
            );
            return None;
        };

        // Only reachable if the signing key was shared with another
        // issuer; the registry's record wins and the token is refused.
        if session.claims() != claims {
            tracing::debug!(
                session_id = %claims.session_id,
                "token claims disagree with registered session"
            );
            return None;
        }

        Some(Arc::clone(session))
    }

    /// Removes a session. Its token stops validating immediately.
    ///
    /// Returns the removed session, or `None` if it wasn't registered.
    pub fn revoke(&mut self, session_id: &SessionId) -> Option<Arc<Session>> {
        let removed = self.sessions.remove(session_id);
        if removed.is_some() {
            tracing::info!(%session_id, "session revoked");
        }
        removed
    }

    /// Looks up a session by ID.
    pub fn get(&self, session_id: &SessionId) -> Option<&Arc<Session>> {
        self.sessions.get(session_id)
    }

    /// Returns the number of registered sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no sessions are registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
