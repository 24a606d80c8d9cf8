//! Signed session tokens.
//!
//! A token carries a session's three identity fields (session ID, room
//! ID, seat) to the client and back. It is *not* the source of
//! truth: the registry still looks the session up by ID. What the token
//! adds is a keyed integrity tag, so a client can't mint a token for a
//! session it was never given.
//!
//! The format is a compact HS256 JSON Web Token:
//!
//! ```text
//! base64url(header) . base64url({"sid":..,"room":..,"seat":..}) . base64url(tag)
//! ```
//!
//! There is deliberately no `exp` claim. Lifetime is enforced on the
//! server side by evicting the session, which also works for tokens
//! that were issued before a TTL was configured.

use std::collections::HashSet;
use std::fmt;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{RoomId, Seat, SessionId, TokenError};

/// Length of a generated signing key, in bytes (256 bits).
const GENERATED_KEY_LEN: usize = 32;

/// The payload of a session token.
///
/// Serialized with short claim names: `sid`, `room`, `seat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "sid")]
    pub session_id: SessionId,
    #[serde(rename = "room")]
    pub room_id: RoomId,
    pub seat: Seat,
}

/// Encodes [`TokenClaims`] into signed strings and verifies them back.
///
/// Stateless apart from the key: the same claims and key always produce
/// the same string, and `decode` never consults any table.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec that signs with the given secret.
    ///
    /// # Errors
    /// Returns [`TokenError::EmptySecret`] if `secret` is empty.
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Our claims carry no registered JWT fields (exp, aud, ...),
        // so none may be required or checked.
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Creates a codec with a freshly generated random key.
    ///
    /// Tokens from such a codec stop verifying once the process exits,
    /// which matches sessions being in-memory only.
    pub fn generate() -> Self {
        let key: [u8; GENERATED_KEY_LEN] = rand::rng().random();
        Self::new(&key).expect("generated key is never empty")
    }

    /// Encodes and signs the claims.
    pub fn encode(&self, claims: &TokenClaims) -> String {
        // HS256 signing can only fail if the claims fail to serialize,
        // and `TokenClaims` is plain data.
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .expect("token claims always serialize")
    }

    /// Verifies the tag and decodes the claims.
    ///
    /// # Errors
    /// - [`TokenError::BadSignature`]: well-formed, but not signed by us
    /// - [`TokenError::Malformed`]: anything else that isn't a valid token
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}

/// Keys are secret; never print them.
impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(seat: Seat) -> TokenClaims {
        TokenClaims {
            session_id: SessionId::random(),
            room_id: RoomId(1),
            seat,
        }
    }

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-secret").unwrap()
    }

    #[test]
    fn test_decode_encoded_claims_preserves_every_field() {
        let codec = codec();

        for room_id in [RoomId(1), RoomId(42), RoomId(u64::MAX)] {
            for seat in [Seat::First, Seat::Second] {
                let original = TokenClaims {
                    session_id: SessionId::random(),
                    room_id,
                    seat,
                };

                let decoded = codec.decode(&codec.encode(&original)).unwrap();

                assert_eq!(decoded, original, "room {room_id}, seat {seat}");
            }
        }
    }

    #[test]
    fn test_encode_payload_uses_short_claim_names() {
        let c = TokenClaims {
            session_id: SessionId::random(),
            room_id: RoomId(7),
            seat: Seat::Second,
        };
        let token = codec().encode(&c);

        // Read the payload back without checking the tag.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;
        let payload = jsonwebtoken::decode::<serde_json::Map<String, serde_json::Value>>(
            &token,
            &DecodingKey::from_secret(b"unused"),
            &validation,
        )
        .unwrap()
        .claims;

        let mut keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["room", "seat", "sid"]);
        assert_eq!(payload["sid"], c.session_id.0.to_string());
        assert_eq!(payload["room"], 7);
        assert_eq!(payload["seat"], 2);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let codec = codec();
        let c = claims(Seat::First);

        assert_eq!(codec.encode(&c), codec.encode(&c));
    }

    #[test]
    fn test_encode_produces_opaque_three_segment_string() {
        let token = codec().encode(&claims(Seat::First));

        assert_eq!(token.split('.').count(), 3);
        assert!(!token.contains("session_id"), "payload must be encoded");
    }

    #[test]
    fn test_new_empty_secret_returns_error() {
        assert!(matches!(TokenCodec::new(b""), Err(TokenError::EmptySecret)));
    }

    #[test]
    fn test_decode_empty_string_is_malformed() {
        assert!(matches!(codec().decode(""), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        let codec = codec();

        for bad in ["not-a-token", "a.b", "a.b.c", "%%%.%%%.%%%"] {
            assert!(
                matches!(codec.decode(bad), Err(TokenError::Malformed(_))),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_decode_truncated_token_is_rejected() {
        let codec = codec();
        let token = codec.encode(&claims(Seat::First));
        let truncated = &token[..token.len() / 2];

        assert!(codec.decode(truncated).is_err());
    }

    #[test]
    fn test_decode_token_from_other_key_is_bad_signature() {
        let token = TokenCodec::new(b"someone-else").unwrap().encode(&claims(Seat::First));

        assert_eq!(codec().decode(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_decode_swapped_payload_is_bad_signature() {
        // Splice the payload of one token onto the tag of another: the
        // forged token must not verify, even though every segment is
        // individually well-formed.
        let codec = codec();
        let a = codec.encode(&claims(Seat::First));
        let b = codec.encode(&claims(Seat::Second));
        let a_parts: Vec<&str> = a.split('.').collect();
        let b_parts: Vec<&str> = b.split('.').collect();
        let forged = format!("{}.{}.{}", a_parts[0], b_parts[1], a_parts[2]);

        assert_eq!(codec.decode(&forged), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_generate_codecs_use_distinct_keys() {
        let c = claims(Seat::First);
        let token = TokenCodec::generate().encode(&c);

        assert_eq!(TokenCodec::generate().decode(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let rendered = format!("{:?}", codec());
        assert!(!rendered.contains("test-secret"));
    }
}
