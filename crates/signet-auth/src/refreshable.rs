//! Refreshable strategy: access/refresh token pairs and rotation.
//!
//! The refresh signing scope is configured independently of the access
//! scope, with its own key material and expiry, so compromise of one does
//! not automatically compromise the other. Refresh tokens carry a `type`
//! discriminator that is checked on every validation, which keeps a valid
//! access token from being replayed as a refresh token.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;
use uuid::Uuid;

use signet_config::{RawRefreshableJwtConfig, RefreshableJwtConfig};
use signet_core::AuthError;

use crate::capabilities::{
    RefreshTokenIssuer, RefreshTokenValidator, TokenIssuer, TokenRotator, TokenValidator,
};
use crate::claims::{Claims, REFRESH_TOKEN_TYPE, RefreshClaims, TokenPair};
use crate::stateless::{StatelessJwtStrategy, decoding_key, encoding_key, signing_algorithm};

/// Stateless strategy extended with a second, independent signing scope for
/// refresh tokens.
///
/// Access-token issue/validate delegate to the inner
/// [`StatelessJwtStrategy`]; the refresh capabilities use the refresh key
/// material exclusively.
pub struct RefreshableJwtStrategy {
    access: StatelessJwtStrategy,
    refresh_header: Header,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    refresh_validation: Validation,
    refresh_expires_in: Duration,
}

impl RefreshableJwtStrategy {
    /// Creates a strategy from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if either signing scope's PEM key
    /// material cannot be parsed.
    pub fn new(config: RefreshableJwtConfig) -> Result<Self, AuthError> {
        let algorithm = config.base.algorithm;
        let refresh_encoding_key = encoding_key(&config.refresh_key, algorithm)?;
        let refresh_decoding_key = decoding_key(&config.refresh_key, algorithm)?;

        let mut refresh_validation = Validation::new(signing_algorithm(algorithm));
        refresh_validation.leeway = 0;

        debug!(algorithm = %algorithm, "refreshable JWT strategy configured");

        Ok(Self {
            refresh_header: Header::new(signing_algorithm(algorithm)),
            refresh_encoding_key,
            refresh_decoding_key,
            refresh_validation,
            refresh_expires_in: config.refresh_expires_in,
            access: StatelessJwtStrategy::new(config.base)?,
        })
    }

    /// Validates raw configuration and creates a strategy in one step.
    pub fn from_raw(raw: RawRefreshableJwtConfig) -> Result<Self, AuthError> {
        Self::new(raw.validate()?)
    }
}

impl RefreshTokenIssuer for RefreshableJwtStrategy {
    /// Signs a minimal refresh payload bound to `subject` with the refresh
    /// key material.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Sign`] when the signing primitive fails.
    fn issue_refresh(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = RefreshClaims {
            sub: subject.to_string(),
            token_type: REFRESH_TOKEN_TYPE.to_string(),
            exp: now + self.refresh_expires_in.as_secs() as i64,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&self.refresh_header, &claims, &self.refresh_encoding_key).map_err(AuthError::Sign)
    }
}

impl RefreshTokenValidator for RefreshableJwtStrategy {
    /// Verifies a refresh token against the refresh key material and checks
    /// the `type` discriminator.
    ///
    /// A structurally valid, correctly signed token whose discriminator is
    /// not `"refresh"` still fails with [`AuthError::Invalid`].
    fn validate_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        let claims = decode::<RefreshClaims>(
            token,
            &self.refresh_decoding_key,
            &self.refresh_validation,
        )
        .map(|data| data.claims)
        .map_err(AuthError::from_validation)?;

        if claims.token_type != REFRESH_TOKEN_TYPE {
            debug!(token_type = %claims.token_type, "refresh discriminator mismatch");
            return Err(AuthError::invalid("refresh token discriminator mismatch"));
        }

        Ok(claims)
    }
}

impl TokenRotator for RefreshableJwtStrategy {
    /// Validates the presented refresh token, then issues a new access token
    /// from `access_payload` and a new refresh token bound to the subject of
    /// the validated refresh payload.
    ///
    /// Validation happens first: an invalid or expired refresh token aborts
    /// rotation before any new token exists. The subject of the new refresh
    /// token always comes from the just-validated payload, never from the
    /// caller. The old refresh token stays valid until its natural expiry;
    /// there is no revocation store.
    fn rotate(
        &self,
        access_payload: &Claims,
        refresh_token: &str,
    ) -> Result<TokenPair, AuthError> {
        let refresh_claims = self.validate_refresh(refresh_token)?;

        let access_token = self.access.issue(access_payload)?;
        let refresh_token = self.issue_refresh(&refresh_claims.sub)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

impl TokenIssuer for RefreshableJwtStrategy {
    fn issue(&self, payload: &Claims) -> Result<String, AuthError> {
        self.access.issue(payload)
    }
}

impl TokenValidator for RefreshableJwtStrategy {
    fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        self.access.validate(token)
    }
}
