//! Claim structures for access and refresh tokens.
//!
//! Access tokens carry an arbitrary caller-supplied [`Claims`] mapping; the
//! issuing strategy stamps the registered claims (`iat`, `exp`, and the
//! configured `iss`/`aud`) on top. Refresh tokens carry the fixed
//! [`RefreshClaims`] shape with a `type` discriminator.

use serde::{Deserialize, Serialize};

/// Claim mapping signed into access tokens.
///
/// A plain JSON object: application data in, application data out. Trust in
/// a payload comes entirely from the signing key and algorithm, never from
/// the payload contents themselves.
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// Discriminator value carried by every refresh token.
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// JWT claims for refresh tokens.
///
/// Deliberately minimal: the subject, the `type` discriminator that keeps
/// access tokens from being replayed as refresh tokens, and registered
/// plumbing. The `jti` makes successive refresh tokens for one subject
/// distinct even within the same second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject the refresh token is bound to
    pub sub: String,
    /// Discriminator claim, checked on every refresh validation
    #[serde(rename = "type")]
    pub token_type: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
    /// Unique token identifier (JWT ID)
    pub jti: String,
}

/// A freshly rotated access/refresh token pair.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
