//! Identity and status types shared by every Tandem layer.
//!
//! These are the values that cross layer boundaries: the matchmaker
//! hands out `RoomId`s and `Seat`s, the registry keys sessions by
//! `SessionId`, and the lobby returns `SessionGrant` / `SessionStatus`
//! to whatever transport invoked it.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A process-unique identifier for one player's session.
///
/// Backed by a random (v4) UUID. `#[serde(transparent)]` makes it
/// serialize as the bare UUID string rather than `{ "0": "..." }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generates a fresh random session ID.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

/// Identifier of a two-seat room.
///
/// Room IDs are handed out in increasing order by the matchmaker, so
/// ordering by `RoomId` is ordering by creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// A player's position in a room.
///
/// Only two seats exist, so an enum makes "seat 3" unrepresentable.
/// On the wire a seat is the plain integer `1` or `2`; the
/// `into`/`try_from` attributes route serde through the `u8`
/// conversions below, which is also where out-of-range values are
/// rejected during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Seat {
    /// The player who opened the room.
    First,
    /// The player who filled it.
    Second,
}

impl Seat {
    /// Returns the 1-based seat number.
    pub fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }

    /// Index of this seat in a room's member list.
    pub fn index(self) -> usize {
        usize::from(self.number()) - 1
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.number()
    }
}

impl TryFrom<u8> for Seat {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(format!("seat must be 1 or 2, got {other}")),
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// Derived occupancy of a room.
///
/// Never stored: it is computed from the member count every time it is
/// asked for. Serialized lowercase (`"waiting"` / `"full"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Fewer than two members (or the room doesn't exist).
    Waiting,
    /// Both seats taken.
    Full,
}

impl RoomStatus {
    /// Status for a room holding `members` players.
    pub fn from_member_count(members: usize) -> Self {
        if members >= 2 { Self::Full } else { Self::Waiting }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Full => write!(f, "full"),
        }
    }
}

// ---------------------------------------------------------------------------
// Lobby responses
// ---------------------------------------------------------------------------

/// What a caller receives after joining: its bearer token plus where it
/// was seated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    /// Opaque bearer token to present on later requests.
    pub token: String,
    /// The room the caller was placed in.
    pub room_id: RoomId,
    /// The caller's seat in that room.
    pub seat: Seat,
    /// Room occupancy right after this join.
    pub status: RoomStatus,
}

/// What a caller receives when a token is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub room_id: RoomId,
    pub seat: Seat,
    /// Current room occupancy (may have changed since the grant).
    pub status: RoomStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_display() {
        assert_eq!(RoomId(7).to_string(), "R-7");
    }

    #[test]
    fn test_session_id_random_is_unique() {
        assert_ne!(SessionId::random(), SessionId::random());
    }

    #[test]
    fn test_seat_number_and_index() {
        assert_eq!(Seat::First.number(), 1);
        assert_eq!(Seat::Second.number(), 2);
        assert_eq!(Seat::First.index(), 0);
        assert_eq!(Seat::Second.index(), 1);
    }

    #[test]
    fn test_seat_try_from_rejects_out_of_range() {
        assert_eq!(Seat::try_from(1), Ok(Seat::First));
        assert_eq!(Seat::try_from(2), Ok(Seat::Second));
        assert!(Seat::try_from(0).is_err());
        assert!(Seat::try_from(3).is_err());
    }

    #[test]
    fn test_seat_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Seat::Second).unwrap(), "2");
        let seat: Seat = serde_json::from_str("1").unwrap();
        assert_eq!(seat, Seat::First);
        assert!(serde_json::from_str::<Seat>("5").is_err());
    }

    #[test]
    fn test_room_status_from_member_count() {
        assert_eq!(RoomStatus::from_member_count(0), RoomStatus::Waiting);
        assert_eq!(RoomStatus::from_member_count(1), RoomStatus::Waiting);
        assert_eq!(RoomStatus::from_member_count(2), RoomStatus::Full);
    }

    #[test]
    fn test_session_grant_json_shape() {
        // Field names and value shapes are what HTTP clients key on.
        let grant = SessionGrant {
            token: "abc".into(),
            room_id: RoomId(3),
            seat: Seat::First,
            status: RoomStatus::Waiting,
        };

        let json = serde_json::to_value(&grant).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "token": "abc",
                "room_id": 3,
                "seat": 1,
                "status": "waiting",
            })
        );
    }
}
