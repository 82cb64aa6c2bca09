//! Injected sources of time and randomness.
//!
//! Issuance reads the current time and draws a salt; both go through these
//! traits so tests can pin them.

use rand::RngCore;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of the current Unix time in seconds.
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds.
    fn now_secs(&self) -> u32;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u32 {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        // Saturate rather than wrap after 2106.
        u32::try_from(secs).unwrap_or(u32::MAX)
    }
}

/// A source of per-token salts.
pub trait SaltSource: Send + Sync {
    /// Draw a fresh 32-bit salt.
    fn next_salt(&self) -> u32;
}

/// Salts from the thread-local OS-seeded generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSalt;

impl SaltSource for RandomSalt {
    fn next_salt(&self) -> u32 {
        rand::thread_rng().next_u32()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_secs(&self) -> u32 {
        (**self).now_secs()
    }
}

impl<T: SaltSource + ?Sized> SaltSource for &T {
    fn next_salt(&self) -> u32 {
        (**self).next_salt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_recent() {
        // 2023-11-14, well before any test run
        assert!(SystemClock.now_secs() > 1_700_000_000);
    }

    #[test]
    fn test_random_salt_varies() {
        let salts: Vec<u32> = (0..8).map(|_| RandomSalt.next_salt()).collect();
        assert!(salts.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_reference_forwarding() {
        let clock = SystemClock;
        let by_ref: &dyn Clock = &clock;
        assert!(by_ref.now_secs() > 0);
    }
}
