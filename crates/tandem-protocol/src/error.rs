//! Error types for the token codec.

/// Why a token string could not be turned back into [`TokenClaims`].
///
/// The codec separates "this is not a token at all" from "this is a
/// token, but we did not sign it". Callers that only care about
/// pass/fail (the session registry) collapse both into "no session".
///
/// [`TokenClaims`]: crate::TokenClaims
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The input is not a well-formed token: bad base64, truncated,
    /// not three segments, JSON that doesn't match the claim shape,
    /// or a seat outside 1..=2.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The token is well-formed but its integrity tag does not verify
    /// under this codec's key. Either forged, tampered with, or issued
    /// by a process with a different secret.
    #[error("token signature does not verify")]
    BadSignature,

    /// A codec was constructed with an empty secret.
    #[error("signing secret must not be empty")]
    EmptySecret,
}
