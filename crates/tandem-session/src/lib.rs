//! Player sessions for Tandem.
//!
//! This crate answers one question for the layers above: "who is
//! presenting this token?"
//!
//! 1. **Session records**: a player's seat in a room ([`Session`])
//! 2. **Registry**: issuing tokens for sessions and resolving tokens
//!    back to live sessions ([`SessionRegistry`])
//! 3. **Configuration**: how long sessions live ([`SessionConfig`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Room Layer (above)  ← creates sessions when it seats a player
//!     ↕
//! Session Layer (this crate)  ← owns session_id → Session, signs tokens
//!     ↕
//! Protocol Layer (below)  ← provides SessionId, RoomId, Seat, TokenCodec
//! ```

mod registry;
mod session;

pub use registry::SessionRegistry;
pub use session::{Session, SessionConfig};
