//! The outer token envelope.
//!
//! A token is `base64url(version || signature || claim bytes)` without
//! padding, so it can travel in JSON bodies, URLs, and headers unchanged.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::crypto::{Signature, SIGNATURE_LEN};
use crate::error::{Result, TokenError};

/// The envelope version written by this crate.
pub const TOKEN_VERSION: u8 = 1;

/// Envelope versions this crate can read.
pub const SUPPORTED_VERSIONS: &[u8] = &[TOKEN_VERSION];

/// Bytes before the claims: version byte plus signature.
const HEADER_LEN: usize = 1 + SIGNATURE_LEN;

/// An opaque, text-safe access token.
///
/// Deserializing runs the same envelope check as parsing.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Get the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the token text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head: String = self.0.chars().take(12).collect();
        write!(f, "Token({head}...)")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Token {
    type Err = TokenError;

    /// Accepts any string that unwraps to a supported envelope.
    fn from_str(s: &str) -> Result<Self> {
        Token::try_from(s.to_string())
    }
}

impl TryFrom<String> for Token {
    type Error = TokenError;

    fn try_from(s: String) -> Result<Self> {
        unwrap(&s)?;
        Ok(Token(s))
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

/// A decoded envelope: still signed, not yet verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Envelope format version.
    pub version: u8,

    /// Signature over `claims`.
    pub signature: Signature,

    /// Encoded claim bytes.
    pub claims: Vec<u8>,
}

/// Assemble and text-encode a token.
pub fn wrap(version: u8, signature: &Signature, claims: &[u8]) -> Result<Token> {
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(TokenError::invalid(format!(
            "cannot write unsupported token version {version}"
        )));
    }

    let mut buf = Vec::with_capacity(HEADER_LEN + claims.len());
    buf.push(version);
    buf.extend_from_slice(signature.as_bytes());
    buf.extend_from_slice(claims);

    Ok(Token(URL_SAFE_NO_PAD.encode(buf)))
}

/// Text-decode a token and split it into its parts.
pub fn unwrap(token: &str) -> Result<Envelope> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|e| TokenError::malformed(format!("invalid base64: {e}")))?;

    if bytes.len() < HEADER_LEN {
        return Err(TokenError::malformed(format!(
            "token is {} bytes, need at least {HEADER_LEN}",
            bytes.len()
        )));
    }

    let version = bytes[0];
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(TokenError::malformed(format!(
            "unsupported token version {version}"
        )));
    }

    let signature = Signature::from_slice(&bytes[1..HEADER_LEN])
        .ok_or_else(|| TokenError::malformed("invalid signature length"))?;

    Ok(Envelope {
        version,
        signature,
        claims: bytes[HEADER_LEN..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_token(bytes: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(bytes)
    }

    #[test]
    fn test_wrap_unwrap_roundtrip() {
        let sig = Signature::from_bytes([0x11; SIGNATURE_LEN]);
        let token = wrap(TOKEN_VERSION, &sig, b"claims").unwrap();
        let envelope = unwrap(token.as_str()).unwrap();

        assert_eq!(envelope.version, TOKEN_VERSION);
        assert_eq!(envelope.signature, sig);
        assert_eq!(envelope.claims, b"claims");
    }

    #[test]
    fn test_token_is_url_safe() {
        let sig = Signature::from_bytes([0xfb; SIGNATURE_LEN]);
        let token = wrap(TOKEN_VERSION, &sig, &[0xff; 40]).unwrap();
        assert!(token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut bytes = vec![0u8; HEADER_LEN + 4];
        for version in [0u8, 2, 7, 255] {
            bytes[0] = version;
            let result = unwrap(&raw_token(&bytes));
            assert!(
                matches!(result, Err(TokenError::MalformedToken(_))),
                "version {version} should be rejected"
            );
        }
    }

    #[test]
    fn test_wrap_refuses_unknown_version() {
        let sig = Signature::from_bytes([0; SIGNATURE_LEN]);
        assert!(matches!(
            wrap(9, &sig, b"x"),
            Err(TokenError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_short_token_rejected() {
        let bytes = vec![TOKEN_VERSION; HEADER_LEN - 1];
        assert!(matches!(
            unwrap(&raw_token(&bytes)),
            Err(TokenError::MalformedToken(_))
        ));
        assert!(matches!(unwrap(""), Err(TokenError::MalformedToken(_))));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(matches!(
            unwrap("not base64 at all!"),
            Err(TokenError::MalformedToken(_))
        ));
        // standard alphabet with padding is not accepted
        assert!(matches!(unwrap("ab+/=="), Err(TokenError::MalformedToken(_))));
    }

    #[test]
    fn test_token_from_str_validates() {
        let sig = Signature::from_bytes([0x22; SIGNATURE_LEN]);
        let token = wrap(TOKEN_VERSION, &sig, b"c").unwrap();
        let parsed: Token = token.as_str().parse().unwrap();
        assert_eq!(parsed, token);
        assert!("%%%".parse::<Token>().is_err());
    }

    #[test]
    fn test_token_serializes_as_string() {
        let sig = Signature::from_bytes([0x33; SIGNATURE_LEN]);
        let token = wrap(TOKEN_VERSION, &sig, b"c").unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, format!("\"{}\"", token.as_str()));
    }

    #[test]
    fn test_token_deserialize_validates() {
        let sig = Signature::from_bytes([0x44; SIGNATURE_LEN]);
        let token = wrap(TOKEN_VERSION, &sig, b"c").unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(serde_json::from_str::<Token>(&json).unwrap(), token);

        assert!(serde_json::from_str::<Token>("\"not a token\"").is_err());
        assert!(serde_json::from_str::<Token>("\"\"").is_err());

        let mut bytes = vec![0u8; HEADER_LEN + 1];
        bytes[0] = 2;
        let wrong_version = format!("\"{}\"", raw_token(&bytes));
        assert!(serde_json::from_str::<Token>(&wrong_version).is_err());
    }
}
