//! Room matchmaker: pairs arrivals into two-seat rooms.
//!
//! # Concurrency note
//!
//! `RoomMatchmaker` does no locking of its own. `join` is a scan followed
//! by a mutation, and two callers interleaving between those steps could
//! both take seat 2 of the same room. The lobby therefore owns the
//! matchmaker behind a mutex and holds it for the whole join.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tandem_protocol::{RoomId, RoomStatus};
use tandem_session::Session;

use crate::Room;

/// Owns every room and decides where each arrival sits.
///
/// Rooms live in a `BTreeMap` keyed by `RoomId`. IDs are allocated in
/// increasing order, so iterating the map visits rooms in the order
/// they were opened.
///
/// Joins only ever open a room when none is waiting, so at most one
/// room is waiting at a time. Its ID is cached; a join never scans the
/// table.
#[derive(Debug)]
pub struct RoomMatchmaker {
    rooms: BTreeMap<RoomId, Room>,

    /// The one room with a single member, if any.
    waiting: Option<RoomId>,

    /// Next room ID to hand out. Starts at 1.
    next_room_id: u64,
}

impl RoomMatchmaker {
    /// Creates a matchmaker with no rooms.
    pub fn new() -> Self {
        Self {
            rooms: BTreeMap::new(),
            waiting: None,
            next_room_id: 1,
        }
    }

    /// Seats the next arrival.
    ///
    /// If a room has exactly one member, it gets the arrival as seat 2
    /// and becomes `Full`. Otherwise a new room is
    /// opened with the arrival as seat 1, `Waiting`.
    ///
    /// Always succeeds. Returns the new session and the room's status
    /// after the join.
    pub fn join(&mut self) -> (Arc<Session>, RoomStatus) {
        let room_id = match self.waiting.take() {
            Some(room_id) => room_id,
            None => self.open_room(),
        };

        let room = self
            .rooms
            .get_mut(&room_id)
            .expect("room id was just taken from the table");
        // A waiting room has one free seat and a fresh room has two.
        let session = room
            .seat_next()
            .expect("selected room always has a free seat");
        let status = room.status();
        if room.is_waiting() {
            self.waiting = Some(room_id);
        }

        tracing::info!(
            %room_id,
            seat = %session.seat(),
            session_id = %session.session_id(),
            %status,
            "player seated"
        );

        (session, status)
    }

    /// Current status of a room. Unknown rooms are `Waiting`.
    pub fn room_status(&self, room_id: RoomId) -> RoomStatus {
        self.rooms
            .get(&room_id)
            .map_or(RoomStatus::Waiting, Room::status)
    }

    /// The room with exactly one member, if any.
    pub fn waiting_room(&self) -> Option<RoomId> {
        self.waiting
    }

    /// Looks up a room.
    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.get(&room_id)
    }

    /// Removes and returns every room opened at least `ttl` ago.
    ///
    /// The caller is responsible for revoking the returned rooms'
    /// sessions. A `ttl` of zero removes every room.
    pub fn expire_stale(&mut self, ttl: Duration) -> Vec<Room> {
        let stale: Vec<RoomId> = self
            .rooms
            .values()
            .filter(|room| room.opened_at().elapsed() >= ttl)
            .map(Room::room_id)
            .collect();

        let mut expired = Vec::with_capacity(stale.len());
        for room_id in stale {
            if let Some(room) = self.rooms.remove(&room_id) {
                if self.waiting == Some(room_id) {
                    self.waiting = None;
                }
                tracing::info!(
                    %room_id,
                    members = room.members().len(),
                    "room expired"
                );
                expired.push(room);
            }
        }
        expired
    }

    /// Returns the number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if there are no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All room IDs, oldest first.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().copied().collect()
    }

    fn open_room(&mut self) -> RoomId {
        let room_id = RoomId(self.next_room_id);
        self.next_room_id += 1;
        self.rooms.insert(room_id, Room::open(room_id));
        tracing::info!(%room_id, "room opened");
        room_id
    }
}

impl Default for RoomMatchmaker {
    fn default() -> Self {
        Self::new()
    }
}
