//! Session types: the record of one player's place in one room.
//!
//! A session is created exactly once, when the matchmaker seats a
//! player, and is never mutated afterwards. It is shared (via `Arc`)
//! between the room that seated it and the registry that resolves its
//! token, so both see the same record.

use std::time::Duration;

use tandem_protocol::{RoomId, Seat, SessionId, TokenClaims};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session lifetime.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// How long (in seconds) a room and its sessions live after the room
    /// was opened. Expired rooms are only removed when the host calls
    /// `expire_stale`.
    ///
    /// Default: `None`, sessions live for the life of the process.
    /// `Some(0)` expires everything on the next sweep.
    pub session_ttl_secs: Option<u64>,
}

impl SessionConfig {
    /// The TTL as a `Duration`, if one is configured.
    pub fn ttl(&self) -> Option<Duration> {
        self.session_ttl_secs.map(Duration::from_secs)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One player's participation in one room.
///
/// Fields are private so a session can't be edited after creation;
/// use the accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    session_id: SessionId,
    room_id: RoomId,
    seat: Seat,
}

impl Session {
    /// Creates a session with a freshly generated ID.
    pub fn new(room_id: RoomId, seat: Seat) -> Self {
        Self {
            session_id: SessionId::random(),
            room_id,
            seat,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// The fields a token for this session carries.
    pub fn claims(&self) -> TokenClaims {
        TokenClaims {
            session_id: self.session_id,
            room_id: self.room_id,
            seat: self.seat,
        }
    }
}
