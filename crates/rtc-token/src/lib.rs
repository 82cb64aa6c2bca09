//! # RTC Token
//!
//! Issue and validate short-lived access tokens for real-time channels.
//!
//! ## Overview
//!
//! A token authorizes one user to join one channel with one role until an
//! expiry. It is signed with the application's certificate, so anyone
//! holding the certificate can verify or reissue it; nothing is stored.
//!
//! - **Issuance**: [`TokenIssuer::issue`] builds the claims, encodes,
//!   signs, and wraps them.
//! - **Validation**: [`validate`] (or [`TokenIssuer::validate`]) reverses
//!   the chain and checks signature, expiry, and app id.
//! - **Configuration**: [`IssuerConfig::from_env`] loads the credential
//!   and request defaults at startup.
//!
//! ## Usage
//!
//! ```rust
//! use rtc_token::{validate, Clock, Role, TokenIssuer};
//!
//! let issuer = TokenIssuer::new();
//! let now = issuer.clock().now_secs();
//! let token = issuer
//!     .issue("demoApp", "demoCert", "lobby", 42, Role::Publisher, now + 3600)
//!     .unwrap();
//!
//! let claims = validate(token.as_str(), "demoApp", "demoCert", now).unwrap();
//! assert_eq!(claims.uid, 42);
//! ```
//!
//! ## Re-exports
//!
//! - `rtc_token::core` - Claims, codec, signer, and envelope primitives

pub mod config;
pub mod error;
pub mod issuer;
pub mod request;

// Re-export component crate
pub use rtc_token_core as core;

// Re-export main types for convenience
pub use config::{AppCredential, IssuerConfig, DEFAULT_TTL_SECS};
pub use error::ConfigError;
pub use issuer::TokenIssuer;
pub use request::{parse_uid, TokenRequest, TokenResponse};

// Re-export commonly used core types
pub use rtc_token_core::{
    validate, validate_privilege, validate_with, ClaimSet, ClaimSetBuilder, Clock,
    HmacSha256Signer, Privilege, RandomSalt, Role, SaltSource, Signature, Signer, SystemClock,
    Token, TokenError,
};
