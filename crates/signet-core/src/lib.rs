//! # Signet Core
//!
//! Shared error types for the signet authentication strategies.
//!
//! This crate provides:
//!
//! - [`errors`]: the closed [`AuthError`] taxonomy every strategy reports
//!   failures through
//!
//! # Example
//!
//! ```ignore
//! use signet_core::AuthError;
//!
//! match strategy.validate(token) {
//!     Ok(claims) => println!("subject: {:?}", claims.get("sub")),
//!     Err(AuthError::Expired(_)) => println!("please refresh"),
//!     Err(err) => return Err(err),
//! }
//! ```

pub mod errors;

// Re-export commonly used types at crate root
pub use errors::AuthError;
