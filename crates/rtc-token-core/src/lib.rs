//! # RTC Token Core
//!
//! Pure primitives for channel access tokens: privileges, claim sets, the
//! binary claim encoding, signing, and the text envelope.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation; time and randomness come in through [`Clock`] and
//! [`SaltSource`].
//!
//! ## Key Types
//!
//! - [`ClaimSet`] - What a token asserts (app, channel, uid, privileges)
//! - [`Privilege`] / [`Role`] - Permitted actions and the roles bundling them
//! - [`Signer`] - Keyed MAC over claim bytes ([`HmacSha256Signer`] by default)
//! - [`Token`] - The opaque, URL-safe credential
//!
//! ## Token Layout
//!
//! ```text
//! base64url( version:u8 | signature:[u8; 32] | claim bytes )
//! ```
//!
//! Claim bytes are described in [`codec`].

pub mod claims;
pub mod clock;
pub mod codec;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod privilege;
pub mod validation;

pub use claims::{ClaimSet, ClaimSetBuilder, MAX_CHANNEL_NAME_LEN, WILDCARD_UID};
pub use clock::{Clock, RandomSalt, SaltSource, SystemClock};
pub use codec::{decode, encode};
pub use crypto::{HmacSha256Signer, Signature, Signer, SIGNATURE_LEN};
pub use envelope::{unwrap, wrap, Envelope, Token, SUPPORTED_VERSIONS, TOKEN_VERSION};
pub use error::{Result, TokenError};
pub use privilege::{privileges_for_role, Privilege, Role};
pub use validation::{validate, validate_privilege, validate_with};
