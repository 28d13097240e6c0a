//! Capability traits shared by the authentication strategies.
//!
//! Each strategy is the sum of the capabilities it implements, and composed
//! strategies delegate rather than inherit: the credential-bound and
//! refreshable strategies both contain a stateless strategy and forward
//! [`TokenIssuer`]/[`TokenValidator`] to it.
//!
//! Only [`CredentialAuthenticator`] is async, because the credential adapter
//! may perform I/O. Signing and verification have no suspension point.

use async_trait::async_trait;

use signet_core::AuthError;

use crate::claims::{Claims, RefreshClaims, TokenPair};
use crate::credential::{Authenticated, Credentials};

/// Issues signed access tokens from a claim payload.
pub trait TokenIssuer {
    fn issue(&self, payload: &Claims) -> Result<String, AuthError>;
}

/// Validates access tokens and returns the decoded payload exactly as signed.
pub trait TokenValidator {
    fn validate(&self, token: &str) -> Result<Claims, AuthError>;
}

/// Turns raw credentials into an authenticated user and a signed token.
#[async_trait]
pub trait CredentialAuthenticator {
    type User;

    async fn authenticate(
        &self,
        credentials: Credentials,
    ) -> Result<Authenticated<Self::User>, AuthError>;
}

/// Issues refresh tokens bound to a subject.
pub trait RefreshTokenIssuer {
    fn issue_refresh(&self, subject: &str) -> Result<String, AuthError>;
}

/// Validates refresh tokens, including the `type` discriminator claim.
pub trait RefreshTokenValidator {
    fn validate_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError>;
}

/// Rotates an access/refresh token pair in one validated operation.
pub trait TokenRotator {
    fn rotate(&self, access_payload: &Claims, refresh_token: &str)
    -> Result<TokenPair, AuthError>;
}
