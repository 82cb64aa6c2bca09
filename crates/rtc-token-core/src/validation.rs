//! Token validation for relying parties.
//!
//! Order of checks: unwrap envelope, decode claims, verify signature, check
//! expiry, check app id. The first failure wins.

use crate::claims::ClaimSet;
use crate::codec::decode;
use crate::crypto::{HmacSha256Signer, Signer};
use crate::envelope::unwrap;
use crate::error::{Result, TokenError};
use crate::privilege::Privilege;

/// Validate a token with the default HMAC-SHA256 signer.
///
/// Succeeds while `now` is at or before the JoinChannel expiry.
pub fn validate(token: &str, app_id: &str, app_certificate: &str, now: u32) -> Result<ClaimSet> {
    validate_with(&HmacSha256Signer, token, app_id, app_certificate, now)
}

/// Validate a token with a caller-chosen signer.
pub fn validate_with<S: Signer + ?Sized>(
    signer: &S,
    token: &str,
    app_id: &str,
    app_certificate: &str,
    now: u32,
) -> Result<ClaimSet> {
    check_token(
        signer,
        token,
        app_id,
        app_certificate,
        now,
        Privilege::JoinChannel,
    )
}

/// Validate a token and check a specific privilege's expiry.
///
/// A privilege the token never granted is reported as expired.
pub fn validate_privilege(
    token: &str,
    app_id: &str,
    app_certificate: &str,
    now: u32,
    privilege: Privilege,
) -> Result<ClaimSet> {
    check_token(
        &HmacSha256Signer,
        token,
        app_id,
        app_certificate,
        now,
        privilege,
    )
}

fn check_token<S: Signer + ?Sized>(
    signer: &S,
    token: &str,
    app_id: &str,
    app_certificate: &str,
    now: u32,
    privilege: Privilege,
) -> Result<ClaimSet> {
    let result = check_token_inner(signer, token, app_id, app_certificate, now, privilege);
    if let Err(e) = &result {
        tracing::warn!(app_id, ?privilege, now, error = %e, "token rejected");
    }
    result
}

fn check_token_inner<S: Signer + ?Sized>(
    signer: &S,
    token: &str,
    app_id: &str,
    app_certificate: &str,
    now: u32,
    privilege: Privilege,
) -> Result<ClaimSet> {
    let envelope = unwrap(token)?;
    let claims = decode(&envelope.claims)?;

    if !signer.verify(&envelope.claims, app_certificate.as_bytes(), &envelope.signature) {
        return Err(TokenError::BadSignature);
    }

    claims.check_privilege(privilege, now)?;

    // Signed by this certificate but for another application.
    if claims.app_id != app_id {
        return Err(TokenError::BadSignature);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::ClaimSetBuilder;
    use crate::codec::encode;
    use crate::envelope::{wrap, TOKEN_VERSION};
    use crate::privilege::Role;

    fn make_token(claims: &ClaimSet, cert: &str) -> String {
        let bytes = encode(claims).unwrap();
        let sig = HmacSha256Signer.sign(&bytes, cert.as_bytes());
        wrap(TOKEN_VERSION, &sig, &bytes).unwrap().into_string()
    }

    fn demo_claims() -> ClaimSet {
        ClaimSet::build("demoApp", "lobby", 42, Role::Publisher, 1000, 3600, 1).unwrap()
    }

    #[test]
    fn test_valid_token() {
        let token = make_token(&demo_claims(), "demoCert");
        let claims = validate(&token, "demoApp", "demoCert", 1000).unwrap();
        assert_eq!(claims, demo_claims());
    }

    #[test]
    fn test_expiry_boundary() {
        let token = make_token(&demo_claims(), "demoCert");
        assert!(validate(&token, "demoApp", "demoCert", 4600).is_ok());
        assert_eq!(
            validate(&token, "demoApp", "demoCert", 4601),
            Err(TokenError::Expired {
                privilege: Privilege::JoinChannel,
                expired_at: 4600,
                now: 4601,
            })
        );
    }

    #[test]
    fn test_wrong_certificate() {
        let token = make_token(&demo_claims(), "demoCert");
        assert_eq!(
            validate(&token, "demoApp", "wrongCert", 1000),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_wrong_app_id() {
        let token = make_token(&demo_claims(), "demoCert");
        assert_eq!(
            validate(&token, "otherApp", "demoCert", 1000),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let token = make_token(&demo_claims(), "demoCert");
        assert_eq!(
            validate(&token, "demoApp", "wrongCert", 9999),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_per_privilege_expiry() {
        let claims = ClaimSetBuilder::new("demoApp", "lobby", 42)
            .issued_at(1000)
            .privilege(Privilege::JoinChannel, 5000)
            .privilege(Privilege::PublishVideoStream, 2000)
            .build()
            .unwrap();
        let token = make_token(&claims, "demoCert");

        assert!(validate(&token, "demoApp", "demoCert", 3000).is_ok());
        assert!(matches!(
            validate_privilege(&token, "demoApp", "demoCert", 3000, Privilege::PublishVideoStream),
            Err(TokenError::Expired { expired_at: 2000, .. })
        ));
        assert!(matches!(
            validate_privilege(&token, "demoApp", "demoCert", 1000, Privilege::PublishDataStream),
            Err(TokenError::Expired { expired_at: 0, .. })
        ));
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let token = make_token(&demo_claims(), "demoCert");
        let mut envelope = unwrap(&token).unwrap();
        // raise uid 42 -> 43, keeping the structure valid
        let uid_at = 2 + 7 + 2 + 5;
        envelope.claims[uid_at] ^= 0x01;
        let forged = wrap(envelope.version, &envelope.signature, &envelope.claims).unwrap();

        assert_eq!(
            validate(forged.as_str(), "demoApp", "demoCert", 1000),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            validate("garbage!", "demoApp", "demoCert", 0),
            Err(TokenError::MalformedToken(_))
        ));
    }
}
