//! Shared vocabulary for Tandem.
//!
//! This crate defines what the other layers agree on:
//!
//! - **Types** ([`SessionId`], [`RoomId`], [`Seat`], [`RoomStatus`],
//!   [`SessionGrant`], [`SessionStatus`]): identities and the shapes
//!   handed back to whatever transport sits in front of the lobby.
//! - **Token codec** ([`TokenCodec`], [`TokenClaims`]): how a session's
//!   identity is turned into an opaque, signed bearer string and back.
//! - **Errors** ([`TokenError`]): why a string failed to decode.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about rooms or registries. It only
//! knows how to name things and how to sign/verify a token.
//!
//! ```text
//! Lobby (façade) → Room layer → Session layer → Protocol (this crate)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod error;
mod token;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use error::TokenError;
pub use token::{TokenClaims, TokenCodec};
pub use types::{
    RoomId, RoomStatus, Seat, SessionGrant, SessionId, SessionStatus,
};
