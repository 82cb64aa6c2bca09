//! Binary encoding of claim sets.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! u16 len | app_id bytes
//! u16 len | channel_name bytes
//! u32 uid
//! u32 salt
//! u32 issued_at
//! u16 count
//! count x { u16 privilege tag | u32 expire_at }
//! ```
//!
//! Privilege entries are written in ascending tag order, so a claim set has
//! exactly one encoding. The signature covers these bytes verbatim.
//!
//! **CRITICAL**: This layout is FROZEN for token version 1. Changes break
//! every issued token.

use std::collections::BTreeMap;

use bytes::{Buf, BufMut};

use crate::claims::ClaimSet;
use crate::error::{Result, TokenError};
use crate::privilege::Privilege;

/// Bytes per privilege entry (tag + expiry).
const PRIVILEGE_ENTRY_LEN: usize = 2 + 4;

/// Encode a claim set to its canonical bytes.
///
/// Claim sets assembled by hand rather than through a builder are checked
/// first; any out-of-bounds field is [`TokenError::InvalidInput`].
pub fn encode(claims: &ClaimSet) -> Result<Vec<u8>> {
    claims.check_invariants()?;

    let capacity = 2
        + claims.app_id.len()
        + 2
        + claims.channel_name.len()
        + 4 * 3
        + 2
        + claims.privileges.len() * PRIVILEGE_ENTRY_LEN;
    let mut buf = Vec::with_capacity(capacity);

    put_string(&mut buf, &claims.app_id);
    put_string(&mut buf, &claims.channel_name);
    buf.put_u32_le(claims.uid);
    buf.put_u32_le(claims.salt);
    buf.put_u32_le(claims.issued_at);

    // At most four entries, one per known privilege.
    buf.put_u16_le(claims.privileges.len() as u16);
    for (privilege, expire_at) in &claims.privileges {
        buf.put_u16_le(privilege.to_u16());
        buf.put_u32_le(*expire_at);
    }

    Ok(buf)
}

/// Decode a claim set from its canonical bytes.
///
/// Every structural problem is reported as [`TokenError::MalformedToken`].
pub fn decode(bytes: &[u8]) -> Result<ClaimSet> {
    let mut reader = Reader::new(bytes);

    let app_id = reader.string("app_id")?;
    let channel_name = reader.string("channel_name")?;
    let uid = reader.u32("uid")?;
    let salt = reader.u32("salt")?;
    let issued_at = reader.u32("issued_at")?;
    let count = reader.u16("privilege count")? as usize;

    let declared = count * PRIVILEGE_ENTRY_LEN;
    if reader.remaining() != declared {
        return Err(TokenError::malformed(format!(
            "privilege count {count} needs {declared} bytes, {} present",
            reader.remaining()
        )));
    }

    let mut privileges = BTreeMap::new();
    let mut last_tag = 0u16;
    for _ in 0..count {
        let tag = reader.u16("privilege tag")?;
        let expire_at = reader.u32("privilege expiry")?;

        if tag <= last_tag {
            return Err(TokenError::malformed(format!(
                "privilege tag {tag} is duplicated or out of order"
            )));
        }
        last_tag = tag;

        let privilege = Privilege::from_u16(tag)
            .ok_or_else(|| TokenError::malformed(format!("unknown privilege tag {tag}")))?;
        privileges.insert(privilege, expire_at);
    }

    let claims = ClaimSet {
        app_id,
        channel_name,
        uid,
        salt,
        issued_at,
        privileges,
    };

    claims.check_invariants().map_err(|e| match e {
        TokenError::InvalidInput(msg) => TokenError::MalformedToken(msg),
        other => other,
    })?;

    Ok(claims)
}

fn put_string(buf: &mut Vec<u8>, s: &str) {
    // Invariants cap string fields at u16::MAX bytes.
    buf.put_u16_le(s.len() as u16);
    buf.put_slice(s.as_bytes());
}

/// Bounds-checked little-endian reader.
///
/// `bytes::Buf` getters panic on short input, so every read checks
/// `remaining()` first.
struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn need(&self, n: usize, field: &str) -> Result<()> {
        if self.buf.remaining() < n {
            return Err(TokenError::malformed(format!(
                "truncated {field}: need {n} bytes, {} left",
                self.buf.remaining()
            )));
        }
        Ok(())
    }

    fn u16(&mut self, field: &str) -> Result<u16> {
        self.need(2, field)?;
        Ok(self.buf.get_u16_le())
    }

    fn u32(&mut self, field: &str) -> Result<u32> {
        self.need(4, field)?;
        Ok(self.buf.get_u32_le())
    }

    fn string(&mut self, field: &str) -> Result<String> {
        let len = self.u16(field)? as usize;
        self.need(len, field)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        String::from_utf8(head.to_vec())
            .map_err(|_| TokenError::malformed(format!("{field} is not valid UTF-8")))
    }
}
