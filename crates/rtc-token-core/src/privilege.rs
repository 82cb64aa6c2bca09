//! Roles and the privileges they grant.
//!
//! Privilege tags are part of the wire format and must never be renumbered.
//! Adding a role only adds a new mapping; it does not change how existing
//! tokens decode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TokenError;

/// A single permitted action inside a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Privilege {
    /// Join the channel.
    JoinChannel = 1,
    /// Publish an audio stream.
    PublishAudioStream = 2,
    /// Publish a video stream.
    PublishVideoStream = 3,
    /// Publish a data stream.
    PublishDataStream = 4,
}

impl Privilege {
    /// All known privileges in wire-tag order.
    pub const ALL: [Privilege; 4] = [
        Privilege::JoinChannel,
        Privilege::PublishAudioStream,
        Privilege::PublishVideoStream,
        Privilege::PublishDataStream,
    ];

    /// Convert to the wire tag.
    pub fn to_u16(self) -> u16 {
        self as u16
    }

    /// Try to parse a wire tag.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::JoinChannel),
            2 => Some(Self::PublishAudioStream),
            3 => Some(Self::PublishVideoStream),
            4 => Some(Self::PublishDataStream),
            _ => None,
        }
    }

    /// Check if this privilege allows sending media or data.
    pub fn is_publish(self) -> bool {
        self != Privilege::JoinChannel
    }
}

/// The role a client takes in a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u16)]
pub enum Role {
    /// May join and publish every stream type.
    Publisher = 1,
    /// May join only.
    Subscriber = 2,
}

const PUBLISHER_PRIVILEGES: &[Privilege] = &Privilege::ALL;
const SUBSCRIBER_PRIVILEGES: &[Privilege] = &[Privilege::JoinChannel];

impl Role {
    /// Convert to u16.
    pub fn to_u16(self) -> u16 {
        self as u16
    }

    /// Try to parse from u16.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Publisher),
            2 => Some(Self::Subscriber),
            _ => None,
        }
    }

    /// The privileges granted by this role, in wire-tag order.
    pub fn privileges(self) -> &'static [Privilege] {
        privileges_for_role(self)
    }
}

/// Map a role to the fixed set of privileges it grants.
pub fn privileges_for_role(role: Role) -> &'static [Privilege] {
    match role {
        Role::Publisher => PUBLISHER_PRIVILEGES,
        Role::Subscriber => SUBSCRIBER_PRIVILEGES,
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Publisher => f.write_str("publisher"),
            Role::Subscriber => f.write_str("subscriber"),
        }
    }
}

impl FromStr for Role {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "publisher" => Ok(Role::Publisher),
            "subscriber" => Ok(Role::Subscriber),
            other => Err(TokenError::invalid(format!("unknown role: {other:?}"))),
        }
    }
}
