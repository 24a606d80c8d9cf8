//! Unified error type for Tandem.

use tandem_protocol::TokenError;

/// Errors from building a [`Lobby`](crate::Lobby).
///
/// Runtime lobby operations never fail; bad tokens are reported as
/// `None`, not as errors. What can go wrong is setup: an unusable
/// signing secret or a malformed configuration value.
#[derive(Debug, thiserror::Error)]
pub enum TandemError {
    /// The token codec rejected its configuration.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_error() {
        let err: TandemError = TokenError::EmptySecret.into();
        assert!(matches!(err, TandemError::Token(TokenError::EmptySecret)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_config_error_display() {
        let err = TandemError::Config("TANDEM_SESSION_TTL_SECS".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: TANDEM_SESSION_TTL_SECS"
        );
    }
}
