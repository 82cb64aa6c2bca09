//! Error types for token issuance and validation.

use thiserror::Error;

use crate::privilege::Privilege;

/// Errors that can occur while building, encoding, or validating a token.
///
/// Issuance only ever produces [`TokenError::InvalidInput`]. Validation may
/// produce any variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// A caller-supplied parameter was rejected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The token bytes are structurally invalid.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The token decoded but its signature does not verify.
    #[error("bad token signature")]
    BadSignature,

    /// The signature is valid but the privilege has expired.
    #[error("privilege {privilege:?} expired at {expired_at} (now {now})")]
    Expired {
        privilege: Privilege,
        expired_at: u32,
        now: u32,
    },
}

impl TokenError {
    /// Whether the caller sent something unusable, as opposed to a token
    /// that was well-formed but not acceptable.
    pub fn is_client_error(&self) -> bool {
        matches!(self, TokenError::InvalidInput(_) | TokenError::MalformedToken(_))
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TokenError::InvalidInput(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        TokenError::MalformedToken(msg.into())
    }
}

/// Result type for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(TokenError::invalid("empty channel").is_client_error());
        assert!(TokenError::malformed("short buffer").is_client_error());
        assert!(!TokenError::BadSignature.is_client_error());
        assert!(!TokenError::Expired {
            privilege: Privilege::JoinChannel,
            expired_at: 10,
            now: 11,
        }
        .is_client_error());
    }

    #[test]
    fn test_expired_message_names_privilege() {
        let err = TokenError::Expired {
            privilege: Privilege::PublishAudioStream,
            expired_at: 4600,
            now: 5000,
        };
        let msg = err.to_string();
        assert!(msg.contains("PublishAudioStream"));
        assert!(msg.contains("4600"));
    }
}
