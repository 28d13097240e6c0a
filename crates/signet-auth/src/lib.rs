//! # Signet Auth
//!
//! JWT strategy implementations for the signet authentication library.
//!
//! This crate provides:
//!
//! - [`claims`]: claim mappings, refresh-token claims, and token pairs
//! - [`capabilities`]: the capability traits strategies implement
//! - [`adapters`]: the user-store boundaries strategies delegate to
//! - [`stateless`]: the base issue/validate strategy
//! - [`credential`]: credential-bound authentication on top of the base
//! - [`refreshable`]: access/refresh token pairs and rotation
//!
//! # Strategy Composition
//!
//! The three strategies share one capability contract instead of a class
//! hierarchy: [`CredentialBoundJwtStrategy`] and [`RefreshableJwtStrategy`]
//! each own a [`StatelessJwtStrategy`] and delegate [`TokenIssuer`] /
//! [`TokenValidator`] to it, adding their own capability on top.
//!
//! # Example
//!
//! ```ignore
//! use signet_auth::{StatelessJwtStrategy, TokenIssuer, TokenValidator};
//! use signet_config::RawJwtConfig;
//!
//! let strategy = StatelessJwtStrategy::from_raw(RawJwtConfig::from_env())?;
//!
//! let mut payload = signet_auth::Claims::new();
//! payload.insert("sub".into(), "user-1".into());
//!
//! let token = strategy.issue(&payload)?;
//! let claims = strategy.validate(&token)?;
//! ```

pub mod adapters;
pub mod capabilities;
pub mod claims;
pub mod credential;
pub mod refreshable;
pub mod stateless;

// Re-export commonly used types at crate root
pub use adapters::{CredentialAdapter, LookupAdapter, UserStore};
pub use capabilities::{
    CredentialAuthenticator, RefreshTokenIssuer, RefreshTokenValidator, TokenIssuer,
    TokenRotator, TokenValidator,
};
pub use claims::{Claims, REFRESH_TOKEN_TYPE, RefreshClaims, TokenPair};
pub use credential::{Authenticated, CredentialBoundJwtStrategy, Credentials};
pub use refreshable::RefreshableJwtStrategy;
pub use stateless::StatelessJwtStrategy;
