//! Claim sets: what a token asserts.
//!
//! A claim set is immutable once built. Construction goes through
//! [`ClaimSet::build`] (one expiry for the whole role) or
//! [`ClaimSetBuilder`] (per-privilege expiries); both enforce the same
//! invariants the decoder checks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, TokenError};
use crate::privilege::{privileges_for_role, Privilege, Role};

/// Maximum channel name length in bytes.
pub const MAX_CHANNEL_NAME_LEN: usize = 64;

/// Maximum app id length in bytes (bounded by the u16 length prefix).
pub const MAX_APP_ID_LEN: usize = u16::MAX as usize;

/// The user id that means "any user".
pub const WILDCARD_UID: u32 = 0;

/// The facts a token asserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Application identity.
    pub app_id: String,

    /// Channel the holder may join.
    pub channel_name: String,

    /// Numeric user id (0 = wildcard).
    pub uid: u32,

    /// Per-token random value. Uniqueness only, not secret.
    pub salt: u32,

    /// Issue time (Unix seconds).
    pub issued_at: u32,

    /// Privilege to expiry (Unix seconds), ordered by wire tag.
    pub privileges: BTreeMap<Privilege, u32>,
}

impl ClaimSet {
    /// Build a claim set granting every privilege of `role` until
    /// `issued_at + ttl_seconds`.
    pub fn build(
        app_id: &str,
        channel_name: &str,
        uid: u32,
        role: Role,
        issued_at: u32,
        ttl_seconds: i64,
        salt: u32,
    ) -> Result<Self> {
        if ttl_seconds <= 0 {
            return Err(TokenError::invalid(format!(
                "ttl must be positive, got {ttl_seconds}"
            )));
        }

        let expire_at = i64::from(issued_at)
            .checked_add(ttl_seconds)
            .and_then(|ts| u32::try_from(ts).ok())
            .ok_or_else(|| {
                TokenError::invalid(format!(
                    "expiry {issued_at} + {ttl_seconds} does not fit in 32 bits"
                ))
            })?;

        let mut builder = ClaimSetBuilder::new(app_id, channel_name, uid)
            .issued_at(issued_at)
            .salt(salt);
        for privilege in privileges_for_role(role) {
            builder = builder.privilege(*privilege, expire_at);
        }
        builder.build()
    }

    /// Expiry of a privilege, if granted.
    pub fn expires_at(&self, privilege: Privilege) -> Option<u32> {
        self.privileges.get(&privilege).copied()
    }

    /// Whether this token is not pinned to a specific user.
    pub fn is_wildcard_user(&self) -> bool {
        self.uid == WILDCARD_UID
    }

    /// The role whose privilege set this claim set grants exactly.
    ///
    /// Returns `None` for custom privilege sets.
    pub fn role(&self) -> Option<Role> {
        [Role::Subscriber, Role::Publisher].into_iter().find(|role| {
            let expected = privileges_for_role(*role);
            expected.len() == self.privileges.len()
                && expected.iter().all(|p| self.privileges.contains_key(p))
        })
    }

    /// Check that `privilege` is granted and has not expired at `now`.
    ///
    /// A privilege is still valid at exactly its expiry second.
    pub fn check_privilege(&self, privilege: Privilege, now: u32) -> Result<()> {
        let expired_at = self.expires_at(privilege).unwrap_or(0);
        if self.privileges.contains_key(&privilege) && now <= expired_at {
            Ok(())
        } else {
            Err(TokenError::Expired {
                privilege,
                expired_at,
                now,
            })
        }
    }

    /// Check structural invariants.
    pub(crate) fn check_invariants(&self) -> Result<()> {
        check_app_id(&self.app_id)?;
        check_channel_name(&self.channel_name)?;

        if !self.privileges.contains_key(&Privilege::JoinChannel) {
            return Err(TokenError::invalid("claim set must grant JoinChannel"));
        }

        if let Some((privilege, expire_at)) = self
            .privileges
            .iter()
            .find(|(_, expire_at)| **expire_at < self.issued_at)
        {
            return Err(TokenError::invalid(format!(
                "{privilege:?} expires at {expire_at}, before issue time {}",
                self.issued_at
            )));
        }

        Ok(())
    }
}

fn check_app_id(app_id: &str) -> Result<()> {
    if app_id.is_empty() {
        return Err(TokenError::invalid("app id must not be empty"));
    }
    if app_id.len() > MAX_APP_ID_LEN {
        return Err(TokenError::invalid(format!(
            "app id is {} bytes, max {MAX_APP_ID_LEN}",
            app_id.len()
        )));
    }
    Ok(())
}

fn check_channel_name(channel_name: &str) -> Result<()> {
    if channel_name.is_empty() {
        return Err(TokenError::invalid("channel name must not be empty"));
    }
    if channel_name.len() > MAX_CHANNEL_NAME_LEN {
        return Err(TokenError::invalid(format!(
            "channel name is {} bytes, max {MAX_CHANNEL_NAME_LEN}",
            channel_name.len()
        )));
    }
    Ok(())
}

/// Builder for claim sets with per-privilege expiries.
pub struct ClaimSetBuilder {
    app_id: String,
    channel_name: String,
    uid: u32,
    salt: u32,
    issued_at: u32,
    privileges: BTreeMap<Privilege, u32>,
}

impl ClaimSetBuilder {
    /// Start building a claim set.
    pub fn new(app_id: impl Into<String>, channel_name: impl Into<String>, uid: u32) -> Self {
        Self {
            app_id: app_id.into(),
            channel_name: channel_name.into(),
            uid,
            salt: 0,
            issued_at: 0,
            privileges: BTreeMap::new(),
        }
    }

    /// Set the salt.
    pub fn salt(mut self, salt: u32) -> Self {
        self.salt = salt;
        self
    }

    /// Set the issue time.
    pub fn issued_at(mut self, ts: u32) -> Self {
        self.issued_at = ts;
        self
    }

    /// Grant a privilege until `expire_at`. Granting twice keeps the last value.
    pub fn privilege(mut self, privilege: Privilege, expire_at: u32) -> Self {
        self.privileges.insert(privilege, expire_at);
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<ClaimSet> {
        let claims = ClaimSet {
            app_id: self.app_id,
            channel_name: self.channel_name,
            uid: self.uid,
            salt: self.salt,
            issued_at: self.issued_at,
            privileges: self.privileges,
        };
        claims.check_invariants()?;
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher(issued_at: u32, ttl: i64) -> Result<ClaimSet> {
        ClaimSet::build("demoApp", "lobby", 42, Role::Publisher, issued_at, ttl, 7)
    }

    #[test]
    fn test_build_publisher() {
        let claims = publisher(1000, 3600).unwrap();

        assert_eq!(claims.app_id, "demoApp");
        assert_eq!(claims.channel_name, "lobby");
        assert_eq!(claims.uid, 42);
        assert_eq!(claims.salt, 7);
        assert_eq!(claims.issued_at, 1000);
        assert_eq!(claims.privileges.len(), 4);
        assert!(claims.privileges.values().all(|ts| *ts == 4600));
        assert_eq!(claims.role(), Some(Role::Publisher));
    }

    #[test]
    fn test_build_subscriber() {
        let claims =
            ClaimSet::build("demoApp", "lobby", 42, Role::Subscriber, 1000, 60, 0).unwrap();

        assert_eq!(claims.privileges.len(), 1);
        assert_eq!(claims.expires_at(Privilege::JoinChannel), Some(1060));
        assert_eq!(claims.expires_at(Privilege::PublishAudioStream), None);
        assert_eq!(claims.role(), Some(Role::Subscriber));
    }

    #[test]
    fn test_wildcard_uid_preserved() {
        let claims = ClaimSet::build("demoApp", "lobby", 0, Role::Publisher, 1, 1, 0).unwrap();
        assert_eq!(claims.uid, 0);
        assert!(claims.is_wildcard_user());
    }

    #[test]
    fn test_rejects_non_positive_ttl() {
        assert!(matches!(publisher(1000, 0), Err(TokenError::InvalidInput(_))));
        assert!(matches!(publisher(1000, -5), Err(TokenError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_expiry_overflow() {
        assert!(matches!(
            publisher(u32::MAX - 10, 11),
            Err(TokenError::InvalidInput(_))
        ));
        assert!(publisher(u32::MAX - 10, 10).is_ok());
    }

    #[test]
    fn test_rejects_bad_channel() {
        let long = "x".repeat(MAX_CHANNEL_NAME_LEN + 1);
        for channel in ["", long.as_str()] {
            let result = ClaimSet::build("demoApp", channel, 1, Role::Publisher, 0, 10, 0);
            assert!(matches!(result, Err(TokenError::InvalidInput(_))));
        }

        let max = "x".repeat(MAX_CHANNEL_NAME_LEN);
        assert!(ClaimSet::build("demoApp", &max, 1, Role::Publisher, 0, 10, 0).is_ok());
    }

    #[test]
    fn test_rejects_empty_app_id() {
        let result = ClaimSet::build("", "lobby", 1, Role::Publisher, 0, 10, 0);
        assert!(matches!(result, Err(TokenError::InvalidInput(_))));
    }

    #[test]
    fn test_app_id_length_bound() {
        let longest = "x".repeat(MAX_APP_ID_LEN);
        let claims = ClaimSet::build(&longest, "lobby", 1, Role::Publisher, 0, 10, 0).unwrap();
        assert_eq!(claims.app_id.len(), MAX_APP_ID_LEN);

        let too_long = "x".repeat(MAX_APP_ID_LEN + 1);
        let result = ClaimSet::build(&too_long, "lobby", 1, Role::Publisher, 0, 10, 0);
        assert!(matches!(result, Err(TokenError::InvalidInput(_))));
    }

    #[test]
    fn test_builder_per_privilege_expiry() {
        let claims = ClaimSetBuilder::new("demoApp", "lobby", 9)
            .issued_at(100)
            .privilege(Privilege::JoinChannel, 1000)
            .privilege(Privilege::PublishAudioStream, 200)
            .build()
            .unwrap();

        assert_eq!(claims.expires_at(Privilege::JoinChannel), Some(1000));
        assert_eq!(claims.expires_at(Privilege::PublishAudioStream), Some(200));
        assert_eq!(claims.role(), None);
    }

    #[test]
    fn test_builder_requires_join() {
        let result = ClaimSetBuilder::new("demoApp", "lobby", 9)
            .privilege(Privilege::PublishAudioStream, 200)
            .build();
        assert!(matches!(result, Err(TokenError::InvalidInput(_))));

        let empty = ClaimSetBuilder::new("demoApp", "lobby", 9).build();
        assert!(matches!(empty, Err(TokenError::InvalidInput(_))));
    }

    #[test]
    fn test_builder_rejects_expiry_before_issue() {
        let result = ClaimSetBuilder::new("demoApp", "lobby", 9)
            .issued_at(500)
            .privilege(Privilege::JoinChannel, 499)
            .build();
        assert!(matches!(result, Err(TokenError::InvalidInput(_))));
    }

    #[test]
    fn test_check_privilege_boundary() {
        let claims = publisher(1000, 3600).unwrap();

        assert!(claims.check_privilege(Privilege::JoinChannel, 4600).is_ok());
        assert_eq!(
            claims.check_privilege(Privilege::JoinChannel, 4601),
            Err(TokenError::Expired {
                privilege: Privilege::JoinChannel,
                expired_at: 4600,
                now: 4601,
            })
        );
    }

    #[test]
    fn test_check_missing_privilege() {
        let claims =
            ClaimSet::build("demoApp", "lobby", 42, Role::Subscriber, 1000, 60, 0).unwrap();
        assert_eq!(
            claims.check_privilege(Privilege::PublishVideoStream, 1000),
            Err(TokenError::Expired {
                privilege: Privilege::PublishVideoStream,
                expired_at: 0,
                now: 1000,
            })
        );
    }
}
