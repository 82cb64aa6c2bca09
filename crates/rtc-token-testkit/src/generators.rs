//! Proptest generators for property-based testing.

use proptest::prelude::*;

use rtc_token_core::{ClaimSet, ClaimSetBuilder, Privilege, Role, MAX_CHANNEL_NAME_LEN};

/// Generate an app id.
pub fn app_id() -> impl Strategy<Value = String> {
    "[0-9a-f]{32}|[a-zA-Z][a-zA-Z0-9]{0,15}".prop_map(String::from)
}

/// Generate a channel name within the length bound, including non-ASCII.
pub fn channel_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.:@\\-é中]{1,21}"
        .prop_filter("channel name too long", |s| {
            !s.is_empty() && s.len() <= MAX_CHANNEL_NAME_LEN
        })
}

/// Generate a user id, biased toward the wildcard.
pub fn uid() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(0u32),
        4 => any::<u32>(),
    ]
}

/// Generate a role.
pub fn role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Publisher), Just(Role::Subscriber)]
}

/// Generate a certificate.
pub fn certificate() -> impl Strategy<Value = String> {
    "[0-9a-f]{32}".prop_map(String::from)
}

/// Generate an issue time that leaves room for a year-long ttl.
pub fn issued_at() -> impl Strategy<Value = u32> {
    0u32..=(u32::MAX - 366 * 24 * 3600)
}

/// Generate a positive ttl of up to a year.
pub fn ttl_seconds() -> impl Strategy<Value = i64> {
    1i64..=366 * 24 * 3600
}

/// Generate a role-based claim set.
pub fn role_claims() -> impl Strategy<Value = ClaimSet> {
    (
        app_id(),
        channel_name(),
        uid(),
        role(),
        issued_at(),
        ttl_seconds(),
        any::<u32>(),
    )
        .prop_map(|(app_id, channel, uid, role, issued_at, ttl, salt)| {
            ClaimSet::build(&app_id, &channel, uid, role, issued_at, ttl, salt)
                .expect("generated inputs are valid")
        })
}

/// Generate a claim set with independent per-privilege expiries.
pub fn custom_claims() -> impl Strategy<Value = ClaimSet> {
    (
        app_id(),
        channel_name(),
        uid(),
        any::<u32>(),
        0u32..=u32::MAX / 2,
        prop::collection::vec(0u32..=u32::MAX / 2, 4),
        prop::collection::vec(any::<bool>(), 3),
    )
        .prop_map(|(app_id, channel, uid, salt, issued_at, offsets, grants)| {
            let mut builder = ClaimSetBuilder::new(app_id, channel, uid)
                .salt(salt)
                .issued_at(issued_at)
                .privilege(Privilege::JoinChannel, issued_at + offsets[0]);

            let publish = &Privilege::ALL[1..];
            for ((privilege, granted), offset) in publish.iter().zip(&grants).zip(&offsets[1..]) {
                if *granted {
                    builder = builder.privilege(*privilege, issued_at + offset);
                }
            }

            builder.build().expect("generated claims are valid")
        })
}

/// Generate any valid claim set.
pub fn claims() -> impl Strategy<Value = ClaimSet> {
    prop_oneof![role_claims(), custom_claims()]
}
