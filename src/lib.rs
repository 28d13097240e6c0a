//! # Signet
//!
//! Pluggable JWT authentication strategies behind one capability contract.
//!
//! Three strategies share the same issue/validate capabilities:
//!
//! - [`StatelessJwtStrategy`]: issues and validates signed access tokens
//! - [`CredentialBoundJwtStrategy`]: authenticates raw credentials through a
//!   user adapter, then signs the matched user's fields
//! - [`RefreshableJwtStrategy`]: adds an independent refresh signing scope
//!   and access/refresh token-pair rotation
//!
//! Configuration is validated exactly once, at construction: a strategy is
//! either fully usable or never created. Failures surface through the closed
//! [`AuthError`] taxonomy so callers can tell an expired token from a forged
//! one without string matching.
//!
//! # Example
//!
//! ```ignore
//! use signet::{
//!     Claims, Credentials, CredentialAuthenticator, CredentialBoundJwtStrategy,
//!     RawJwtConfig, TokenValidator,
//! };
//!
//! let strategy = CredentialBoundJwtStrategy::from_raw(RawJwtConfig::from_env(), adapter)?;
//!
//! let auth = strategy
//!     .authenticate(Credentials::new("admin@example.com", "hunter2"))
//!     .await?;
//!
//! let claims = strategy.validate(&auth.token)?;
//! ```

// Error taxonomy
pub use signet_core::AuthError;

// Configuration
pub use signet_config::{
    DEFAULT_ACCESS_EXPIRY, DEFAULT_REFRESH_EXPIRY, JwtAlgorithm, JwtConfig, KeyMaterial,
    RawExpiry, RawJwtConfig, RawRefreshableJwtConfig, RawSecret, RefreshableJwtConfig,
};

// Capabilities and claims
pub use signet_auth::{
    Claims, CredentialAuthenticator, REFRESH_TOKEN_TYPE, RefreshClaims, RefreshTokenIssuer,
    RefreshTokenValidator, TokenIssuer, TokenPair, TokenRotator, TokenValidator,
};

// Strategies and adapters
pub use signet_auth::{
    Authenticated, CredentialAdapter, CredentialBoundJwtStrategy, Credentials, LookupAdapter,
    RefreshableJwtStrategy, StatelessJwtStrategy, UserStore,
};
