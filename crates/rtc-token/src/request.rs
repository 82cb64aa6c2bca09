//! The inbound request contract.
//!
//! A caller asks for a token with two path segments, `channel_name` and
//! `uid`, and receives `{"token": "..."}`. The transport itself lives
//! outside this crate.

use serde::{Deserialize, Serialize};

use rtc_token_core::{Result, Token, TokenError, WILDCARD_UID};

/// Parse a user id path segment.
///
/// `"0"` is the wildcard user. Anything that is not a plain decimal u32
/// is rejected.
pub fn parse_uid(segment: &str) -> Result<u32> {
    if segment == "0" {
        return Ok(WILDCARD_UID);
    }
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TokenError::InvalidInput(format!(
            "user id must be a decimal number, got {segment:?}"
        )));
    }
    segment
        .parse()
        .map_err(|_| TokenError::InvalidInput(format!("user id {segment} is out of range")))
}

/// A request for a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequest {
    /// Channel to join.
    pub channel_name: String,
    /// User id (0 = wildcard).
    pub uid: u32,
}

impl TokenRequest {
    /// Build a request from raw path segments.
    pub fn from_path(channel_name: &str, uid: &str) -> Result<Self> {
        Ok(Self {
            channel_name: channel_name.to_string(),
            uid: parse_uid(uid)?,
        })
    }
}

/// The response body: `{"token": "<opaque>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: Token,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uid() {
        assert_eq!(parse_uid("0").unwrap(), 0);
        assert_eq!(parse_uid("42").unwrap(), 42);
        assert_eq!(parse_uid("007").unwrap(), 7);
        assert_eq!(parse_uid("4294967295").unwrap(), u32::MAX);
    }

    #[test]
    fn test_parse_uid_rejects_garbage() {
        for bad in ["", "-1", "+5", "abc", "12a", " 1", "4294967296"] {
            assert!(
                matches!(parse_uid(bad), Err(TokenError::InvalidInput(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_request_from_path() {
        let request = TokenRequest::from_path("lobby", "0").unwrap();
        assert_eq!(request.channel_name, "lobby");
        assert_eq!(request.uid, WILDCARD_UID);
    }
}
