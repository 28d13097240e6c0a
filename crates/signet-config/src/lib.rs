//! # Signet Config
//!
//! Configuration types for the signet authentication strategies.
//!
//! Raw, untrusted input ([`RawJwtConfig`], [`RawRefreshableJwtConfig`]) is
//! validated exactly once, at construction time, into immutable configuration
//! values ([`JwtConfig`], [`RefreshableJwtConfig`]). A strategy built from a
//! validated configuration is either fully usable or never constructed.
//!
//! # Example
//!
//! ```ignore
//! use signet_config::RawJwtConfig;
//!
//! let config = RawJwtConfig::from_env().validate()?;
//! let strategy = StatelessJwtStrategy::new(config)?;
//! ```

pub mod jwt;

// Re-export commonly used types at crate root
pub use jwt::{
    DEFAULT_ACCESS_EXPIRY, DEFAULT_REFRESH_EXPIRY, JwtAlgorithm, JwtConfig, KeyMaterial,
    RawExpiry, RawJwtConfig, RawRefreshableJwtConfig, RawSecret, RefreshableJwtConfig,
};
