//! # Tandem
//!
//! Two-player matchmaking with signed session tokens.
//!
//! Callers arrive one at a time (usually one per HTTP request). Each is
//! paired into a two-seat room and handed a bearer token that later
//! requests present to prove which room and seat they hold. The
//! [`Lobby`] is the only type a transport needs.
//!
//! ## Quick Start
//!
//! ```rust
//! use tandem::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), TandemError> {
//! let lobby = Lobby::builder().build()?;
//!
//! let alice = lobby.create_session().await;
//! let bob = lobby.create_session().await;
//! assert_eq!(alice.room_id, bob.room_id);
//!
//! let status = lobby.validate_session(&alice.token).await.unwrap();
//! assert_eq!(status.status, RoomStatus::Full);
//! # Ok(())
//! # }
//! ```

mod error;
mod lobby;

pub use error::TandemError;
pub use lobby::{Lobby, LobbyBuilder, SECRET_ENV, SESSION_TTL_ENV};

/// Everything a transport layer typically needs.
pub mod prelude {
    pub use tandem_protocol::{
        RoomId, RoomStatus, Seat, SessionGrant, SessionId, SessionStatus,
    };
    pub use tandem_session::SessionConfig;

    pub use crate::{Lobby, LobbyBuilder, TandemError};
}
