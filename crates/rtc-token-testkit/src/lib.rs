//! # RTC Token Testkit
//!
//! Testing utilities for RTC tokens.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with expected claim bytes, signatures, and tokens
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Deterministic clocks, salt sources, and a pinned issuer
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the wire format across implementations:
//!
//! ```rust
//! use rtc_token_testkit::vectors::{all_vectors, token_from_vector};
//!
//! for vector in all_vectors() {
//!     let token = token_from_vector(&vector);
//!     assert_eq!(token.as_str(), vector.expected_token);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use rtc_token_core::{decode, encode};
//! use rtc_token_testkit::generators::claims;
//!
//! proptest! {
//!     #[test]
//!     fn encoding_is_lossless(claims in claims()) {
//!         prop_assert_eq!(decode(&encode(&claims).unwrap()).unwrap(), claims);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use rtc_token_testkit::fixtures::{demo_credential, fixed_issuer};
//! use rtc_token_core::Role;
//!
//! let issuer = fixed_issuer(1000, 7);
//! let token = issuer
//!     .issue_for_credential(&demo_credential(), "lobby", 42, Role::Publisher, 4600)
//!     .unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    demo_credential, fixed_issuer, FixedClock, FixedSalt, SequenceSalt, DEMO_APP_CERTIFICATE,
    DEMO_APP_ID,
};
pub use vectors::{all_vectors, claims_from_vector, token_from_vector, verify_all_vectors, GoldenVector};
