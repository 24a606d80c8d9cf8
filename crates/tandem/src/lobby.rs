//! `Lobby` and its builder.
//!
//! The lobby ties the layers together: room matchmaker → session
//! registry → token codec. A transport holds one `Lobby` (usually in an
//! `Arc`) and calls it from every request handler.

use std::sync::Arc;

use tandem_protocol::{SessionGrant, SessionStatus, TokenCodec};
use tandem_room::{Room, RoomMatchmaker};
use tandem_session::{SessionConfig, SessionRegistry};
use tokio::sync::Mutex;

use crate::TandemError;

/// Environment variable holding the token signing secret.
pub const SECRET_ENV: &str = "TANDEM_SECRET";

/// Environment variable holding the session TTL in seconds.
pub const SESSION_TTL_ENV: &str = "TANDEM_SESSION_TTL_SECS";

/// Builder for configuring a [`Lobby`].
///
/// # Example
///
/// ```rust
/// use tandem::prelude::*;
///
/// let lobby = Lobby::builder()
///     .secret(b"shared across restarts".to_vec())
///     .session_config(SessionConfig { session_ttl_secs: Some(600) })
///     .build()
///     .expect("non-empty secret");
/// ```
#[derive(Debug, Default)]
pub struct LobbyBuilder {
    secret: Option<Vec<u8>>,
    session_config: SessionConfig,
}

impl LobbyBuilder {
    /// Creates a builder with default settings: a random signing key
    /// and no session expiry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads settings from the process environment.
    ///
    /// - `TANDEM_SECRET`: signing secret (random key if unset)
    /// - `TANDEM_SESSION_TTL_SECS`: session TTL (no expiry if unset)
    ///
    /// # Errors
    /// Returns [`TandemError::Config`] if the TTL isn't a number.
    pub fn from_env() -> Result<Self, TandemError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through
    /// `lookup` instead of the real environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, TandemError> {
        let mut builder = Self::new();

        if let Some(secret) = lookup(SECRET_ENV) {
            builder = builder.secret(secret.into_bytes());
        }

        if let Some(raw) = lookup(SESSION_TTL_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                TandemError::Config(format!("{SESSION_TTL_ENV}={raw:?}: {e}"))
            })?;
            builder.session_config.session_ttl_secs = Some(secs);
        }

        Ok(builder)
    }

    /// Sets the token signing secret.
    ///
    /// Lobbies sharing a secret accept each other's tokens at the codec
    /// level (sessions are still per-lobby).
    pub fn secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Builds the lobby.
    ///
    /// # Errors
    /// Returns [`TandemError::Token`] if an empty secret was supplied.
    pub fn build(self) -> Result<Lobby, TandemError> {
        let codec = match &self.secret {
            Some(secret) => TokenCodec::new(secret)?,
            None => TokenCodec::generate(),
        };

        tracing::info!(
            ttl_secs = ?self.session_config.session_ttl_secs,
            generated_key = self.secret.is_none(),
            "lobby ready"
        );

        Ok(Lobby {
            rooms: Mutex::new(RoomMatchmaker::new()),
            sessions: Mutex::new(SessionRegistry::new(codec)),
            config: self.session_config,
        })
    }
}

/// The matchmaking and session-authentication service.
///
/// Shared across request handlers, typically as `Arc<Lobby>`.
///
/// # Lock order
///
/// `rooms` is always taken before `sessions`. `create_session` holds
/// both so that choosing a seat and registering the session are one
/// step from every other joiner's point of view. `validate_session` and
/// `expire_stale` hold both too, so a validation sees a room and its
/// sessions either before or after an eviction, never half of it.
#[derive(Debug)]
pub struct Lobby {
    rooms: Mutex<RoomMatchmaker>,
    sessions: Mutex<SessionRegistry>,
    config: SessionConfig,
}

impl Lobby {
    /// Creates a new builder.
    pub fn builder() -> LobbyBuilder {
        LobbyBuilder::new()
    }

    /// Seats the caller and issues its token.
    ///
    /// The first caller into a room gets seat 1 and `Waiting`; the
    /// second gets seat 2 and `Full`.
    pub async fn create_session(&self) -> SessionGrant {
        let mut rooms = self.rooms.lock().await;
        let (session, status) = rooms.join();
        let token = self
            .sessions
            .lock()
            .await
            .issue_token(Arc::clone(&session));
        drop(rooms);

        SessionGrant {
            token,
            room_id: session.room_id(),
            seat: session.seat(),
            status,
        }
    }

    /// Resolves a token to the caller's room, seat, and current room
    /// status.
    ///
    /// Returns `None` for any token that doesn't resolve to a live
    /// session; the transport should treat that as unauthenticated.
    pub async fn validate_session(&self, token: &str) -> Option<SessionStatus> {
        // Both locks, so an eviction can't land between the lookup and
        // the status read.
        let rooms = self.rooms.lock().await;
        let session = self.sessions.lock().await.validate_token(token)?;
        let status = rooms.room_status(session.room_id());

        Some(SessionStatus {
            room_id: session.room_id(),
            seat: session.seat(),
            status,
        })
    }

    /// `true` if a token was supplied and it resolves to a live session.
    ///
    /// For endpoints that serve anonymous callers too and only vary
    /// their response for authenticated ones.
    pub async fn is_authenticated(&self, token: Option<&str>) -> bool {
        match token {
            Some(token) => self.sessions.lock().await.validate_token(token).is_some(),
            None => false,
        }
    }

    /// Evicts rooms older than the configured TTL, revoking their
    /// sessions. Returns the number of sessions revoked.
    ///
    /// A no-op when no TTL is configured.
    pub async fn expire_stale(&self) -> usize {
        let Some(ttl) = self.config.ttl() else {
            return 0;
        };

        let mut rooms = self.rooms.lock().await;
        let expired = rooms.expire_stale(ttl);
        if expired.is_empty() {
            return 0;
        }

        let mut sessions = self.sessions.lock().await;
        let mut revoked = 0;
        for session in expired.iter().flat_map(Room::members) {
            if sessions.revoke(&session.session_id()).is_some() {
                revoked += 1;
            }
        }

        tracing::info!(rooms = expired.len(), sessions = revoked, "stale rooms evicted");
        revoked
    }

    /// Number of rooms currently open (waiting or full).
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.room_count()
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// The lobby's session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_from_lookup_empty_env_uses_defaults() {
        let builder = LobbyBuilder::from_lookup(env(&[])).unwrap();

        assert!(builder.secret.is_none());
        assert_eq!(builder.session_config.session_ttl_secs, None);
    }

    #[test]
    fn test_from_lookup_reads_secret_and_ttl() {
        let builder = LobbyBuilder::from_lookup(env(&[
            (SECRET_ENV, "s3cret"),
            (SESSION_TTL_ENV, " 120 "),
        ]))
        .unwrap();

        assert_eq!(builder.secret.as_deref(), Some(&b"s3cret"[..]));
        assert_eq!(builder.session_config.session_ttl_secs, Some(120));
    }

    #[test]
    fn test_from_lookup_bad_ttl_returns_config_error() {
        let result = LobbyBuilder::from_lookup(env(&[(SESSION_TTL_ENV, "soon")]));

        assert!(matches!(result, Err(TandemError::Config(msg)) if msg.contains("soon")));
    }

    #[test]
    fn test_build_empty_secret_returns_error() {
        let result = LobbyBuilder::new().secret(Vec::new()).build();

        assert!(matches!(result, Err(TandemError::Token(_))));
    }
}
