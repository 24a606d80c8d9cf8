//! Two-seat rooms for Tandem.
//!
//! Every room holds at most two players. The matchmaker fills the
//! half-full room before opening a new one, so arrivals pair off in
//! order.
//!
//! # Key types
//!
//! - [`RoomMatchmaker`]: owns the room table, seats each arrival
//! - [`Room`]: one room: its members and derived status

mod matchmaker;
mod room;

pub use matchmaker::RoomMatchmaker;
pub use room::{Room, SEATS_PER_ROOM};
