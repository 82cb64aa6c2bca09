//! Signing primitives: the [`Signer`] capability and its HMAC-SHA256
//! implementation.
//!
//! The MAC covers exactly the encoded claim bytes, keyed by the app
//! certificate. Two implementations sharing a certificate must produce
//! identical signatures for identical claim bytes.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Signature length in bytes.
pub const SIGNATURE_LEN: usize = 32;

/// A fixed-size message authentication code.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; SIGNATURE_LEN]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice of exactly [`SIGNATURE_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; SIGNATURE_LEN] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Compare with another signature in constant time.
    pub fn ct_matches(&self, other: &Signature) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sig({}...)", &self.to_hex()[..8])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SIGNATURE_LEN]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }
}

/// A keyed signing scheme over claim bytes.
pub trait Signer: Send + Sync {
    /// Compute the signature of `message` under `secret`.
    fn sign(&self, message: &[u8], secret: &[u8]) -> Signature;

    /// Check `signature` against `message` under `secret`.
    ///
    /// The default recomputes the signature and compares in constant time.
    fn verify(&self, message: &[u8], secret: &[u8], signature: &Signature) -> bool {
        self.sign(message, secret).ct_matches(signature)
    }
}

/// HMAC-SHA256 keyed by the app certificate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Signer;

impl Signer for HmacSha256Signer {
    fn sign(&self, message: &[u8], secret: &[u8]) -> Signature {
        let mut mac =
            HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
        mac.update(message);
        Signature(mac.finalize().into_bytes().into())
    }
}
