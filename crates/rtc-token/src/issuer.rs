//! The issuance façade.
//!
//! [`TokenIssuer`] owns the injected clock, salt source, and signer, and
//! runs build → encode → sign → wrap for every token. It holds no
//! credentials; they are passed per call so one issuer can serve any app.

use std::time::Duration;

use rtc_token_core::{
    encode, validate_with, wrap, ClaimSet, Clock, HmacSha256Signer, Privilege, RandomSalt, Result,
    Role, SaltSource, Signer, SystemClock, Token, TokenError, TOKEN_VERSION,
};

use crate::config::{AppCredential, IssuerConfig};
use crate::request::{TokenRequest, TokenResponse};

/// Issues and validates tokens.
///
/// Stateless apart from its ports, so it can be shared across threads
/// behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct TokenIssuer<C = SystemClock, R = RandomSalt, S = HmacSha256Signer> {
    clock: C,
    salt: R,
    signer: S,
}

impl TokenIssuer {
    /// Wall clock, OS randomness, HMAC-SHA256.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock, R: SaltSource, S: Signer> TokenIssuer<C, R, S> {
    /// Assemble an issuer from explicit ports.
    pub fn with_parts(clock: C, salt: R, signer: S) -> Self {
        Self {
            clock,
            salt,
            signer,
        }
    }

    /// The issuer's clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Issue a token valid until the absolute time `expire_at`.
    ///
    /// Fails with [`TokenError::InvalidInput`] if `expire_at` is not in the
    /// future or any parameter is unusable.
    pub fn issue(
        &self,
        app_id: &str,
        app_certificate: &str,
        channel_name: &str,
        uid: u32,
        role: Role,
        expire_at: u32,
    ) -> Result<Token> {
        let now = self.clock.now_secs();
        let ttl = i64::from(expire_at) - i64::from(now);
        if ttl <= 0 {
            return Err(TokenError::InvalidInput(format!(
                "expiry {expire_at} is not after current time {now}"
            )));
        }
        self.sign_claims(app_id, app_certificate, channel_name, uid, role, now, ttl)
    }

    /// Issue for a loaded credential until `expire_at`.
    pub fn issue_for_credential(
        &self,
        credential: &AppCredential,
        channel_name: &str,
        uid: u32,
        role: Role,
        expire_at: u32,
    ) -> Result<Token> {
        self.issue(
            credential.app_id(),
            credential.app_certificate(),
            channel_name,
            uid,
            role,
            expire_at,
        )
    }

    /// Issue for a loaded credential, valid for `ttl` from now.
    pub fn issue_with_ttl(
        &self,
        credential: &AppCredential,
        channel_name: &str,
        uid: u32,
        role: Role,
        ttl: Duration,
    ) -> Result<Token> {
        let now = self.clock.now_secs();
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        self.sign_claims(
            credential.app_id(),
            credential.app_certificate(),
            channel_name,
            uid,
            role,
            now,
            ttl,
        )
    }

    /// Serve an inbound request with the configured role and lifetime.
    pub fn issue_for_request(
        &self,
        config: &IssuerConfig,
        request: &TokenRequest,
    ) -> Result<TokenResponse> {
        let token = self.issue_with_ttl(
            &config.credential,
            &request.channel_name,
            request.uid,
            config.role,
            config.token_ttl,
        )?;
        Ok(TokenResponse { token })
    }

    /// Validate a token against the issuer's clock and signer.
    pub fn validate(&self, token: &str, app_id: &str, app_certificate: &str) -> Result<ClaimSet> {
        validate_with(
            &self.signer,
            token,
            app_id,
            app_certificate,
            self.clock.now_secs(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn sign_claims(
        &self,
        app_id: &str,
        app_certificate: &str,
        channel_name: &str,
        uid: u32,
        role: Role,
        now: u32,
        ttl: i64,
    ) -> Result<Token> {
        if app_certificate.is_empty() {
            return Err(TokenError::InvalidInput(
                "app certificate must not be empty".into(),
            ));
        }

        let claims = ClaimSet::build(
            app_id,
            channel_name,
            uid,
            role,
            now,
            ttl,
            self.salt.next_salt(),
        )?;
        let bytes = encode(&claims)?;
        let signature = self.signer.sign(&bytes, app_certificate.as_bytes());
        let token = wrap(TOKEN_VERSION, &signature, &bytes)?;

        tracing::debug!(
            channel = channel_name,
            uid,
            %role,
            issued_at = now,
            expire_at = ?claims.expires_at(Privilege::JoinChannel),
            "issued token"
        );

        Ok(token)
    }
}
