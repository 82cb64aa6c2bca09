//! Test fixtures and helpers.
//!
//! Deterministic clocks and salt sources, plus a ready-made issuer.

use std::sync::atomic::{AtomicU32, Ordering};

use rtc_token::{AppCredential, TokenIssuer};
use rtc_token_core::{Clock, HmacSha256Signer, SaltSource};

/// App id used across fixtures.
pub const DEMO_APP_ID: &str = "demoApp";
/// Certificate used across fixtures.
pub const DEMO_APP_CERTIFICATE: &str = "demoCert";

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedClock(AtomicU32);

impl FixedClock {
    /// Create a clock reading `now`.
    pub fn new(now: u32) -> Self {
        Self(AtomicU32::new(now))
    }

    /// Jump to `now`.
    pub fn set(&self, now: u32) {
        self.0.store(now, Ordering::SeqCst);
    }

    /// Move forward by `secs`.
    pub fn advance(&self, secs: u32) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_secs(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Always returns the same salt.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSalt(pub u32);

impl SaltSource for FixedSalt {
    fn next_salt(&self) -> u32 {
        self.0
    }
}

/// Returns `start`, `start + 1`, ... on successive calls.
#[derive(Debug, Default)]
pub struct SequenceSalt(AtomicU32);

impl SequenceSalt {
    /// Start the sequence at `start`.
    pub fn new(start: u32) -> Self {
        Self(AtomicU32::new(start))
    }
}

impl SaltSource for SequenceSalt {
    fn next_salt(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// The demo credential.
pub fn demo_credential() -> AppCredential {
    AppCredential::new(DEMO_APP_ID, DEMO_APP_CERTIFICATE).expect("demo credential is non-empty")
}

/// An issuer pinned to `now` with a fixed salt.
pub fn fixed_issuer(now: u32, salt: u32) -> TokenIssuer<FixedClock, FixedSalt, HmacSha256Signer> {
    TokenIssuer::with_parts(FixedClock::new(now), FixedSalt(salt), HmacSha256Signer)
}
