//! A single two-seat room.

use std::sync::Arc;
use std::time::Instant;

use tandem_protocol::{RoomId, RoomStatus, Seat};
use tandem_session::Session;

/// Number of seats in every room.
pub const SEATS_PER_ROOM: usize = 2;

/// A two-seat match.
///
/// Members are kept in seat order: seat 1 at index 0, seat 2 at index 1.
/// The only way to add a member is [`Room::seat_next`], which refuses
/// once both seats are taken, so a room can never hold more than two.
#[derive(Debug, Clone)]
pub struct Room {
    room_id: RoomId,
    members: Vec<Arc<Session>>,
    /// When the room was opened. Only the eviction sweep reads it.
    opened_at: Instant,
}

impl Room {
    /// Opens an empty room.
    pub(crate) fn open(room_id: RoomId) -> Self {
        Self {
            room_id,
            members: Vec::with_capacity(SEATS_PER_ROOM),
            opened_at: Instant::now(),
        }
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Members in seat order.
    pub fn members(&self) -> &[Arc<Session>] {
        &self.members
    }

    /// The session in the given seat, if it's taken.
    pub fn member(&self, seat: Seat) -> Option<&Arc<Session>> {
        self.members.get(seat.index())
    }

    pub fn opened_at(&self) -> Instant {
        self.opened_at
    }

    /// `Full` with two members, `Waiting` otherwise.
    pub fn status(&self) -> RoomStatus {
        RoomStatus::from_member_count(self.members.len())
    }

    /// `true` if exactly one player is seated and waiting for a partner.
    pub fn is_waiting(&self) -> bool {
        self.members.len() == 1
    }

    /// Creates a session for the next free seat and seats it.
    ///
    /// Returns `None` if the room is already full.
    pub(crate) fn seat_next(&mut self) -> Option<Arc<Session>> {
        let seat = match self.members.len() {
            0 => Seat::First,
            1 => Seat::Second,
            _ => return None,
        };

        let session = Arc::new(Session::new(self.room_id, seat));
        self.members.push(Arc::clone(&session));
        Some(session)
    }
}
