//! Typed failure kinds for token issuance, validation, and authentication.
//!
//! Every strategy in the workspace reports problems through [`AuthError`], so
//! callers can distinguish an expired token from a forged one without parsing
//! message strings. All variants are terminal from the strategy's point of
//! view; nothing is retried internally.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};

/// Error type for configuration, signing, validation, and authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Configuration failed validation at construction time. The strategy is
    /// never created.
    #[error("invalid JWT configuration: {0}")]
    Config(String),

    /// The signing primitive failed while issuing a token.
    #[error("failed to sign JWT token")]
    Sign(#[source] JwtError),

    /// The token's expiry claim has passed.
    #[error("JWT token has expired")]
    Expired(#[source] JwtError),

    /// Signature mismatch, malformed token, wrong algorithm, wrong
    /// issuer/audience, or a wrong discriminator claim on a refresh token.
    #[error("invalid JWT token: {reason}")]
    Invalid {
        reason: String,
        #[source]
        source: Option<JwtError>,
    },

    /// A validation failure not covered by the closed set above. Always
    /// carries the original cause.
    #[error("unknown JWT error")]
    Unknown(#[source] JwtError),

    /// Credential-bound authentication found no matching user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A failure raised by an injected adapter, passed through unchanged.
    #[error(transparent)]
    Adapter(#[from] anyhow::Error),
}

impl AuthError {
    /// An [`AuthError::Invalid`] with no underlying primitive error, for
    /// claim checks the strategies perform themselves.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
            source: None,
        }
    }

    /// Classify a verification failure from the signing primitive.
    ///
    /// Expiry maps to [`AuthError::Expired`]; every structural, signature,
    /// or registered-claim mismatch maps to [`AuthError::Invalid`]; anything
    /// else falls through to [`AuthError::Unknown`] with its cause intact.
    pub fn from_validation(err: JwtError) -> Self {
        enum Class {
            Expired,
            Invalid(&'static str),
            Unknown,
        }

        let class = match err.kind() {
            ErrorKind::ExpiredSignature => Class::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Class::Invalid("malformed token"),
            ErrorKind::InvalidSignature => Class::Invalid("signature mismatch"),
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                Class::Invalid("algorithm not permitted")
            }
            ErrorKind::InvalidIssuer => Class::Invalid("issuer mismatch"),
            ErrorKind::InvalidAudience => Class::Invalid("audience mismatch"),
            ErrorKind::InvalidSubject => Class::Invalid("subject mismatch"),
            ErrorKind::ImmatureSignature => Class::Invalid("token not yet valid"),
            ErrorKind::MissingRequiredClaim(_) => Class::Invalid("missing required claim"),
            _ => Class::Unknown,
        };

        match class {
            Class::Expired => Self::Expired(err),
            Class::Invalid(reason) => Self::Invalid {
                reason: reason.to_string(),
                source: Some(err),
            },
            Class::Unknown => Self::Unknown(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_signature_classifies_as_expired() {
        let err = AuthError::from_validation(JwtError::from(ErrorKind::ExpiredSignature));
        assert!(matches!(err, AuthError::Expired(_)));
    }

    #[test]
    fn signature_and_claim_mismatches_classify_as_invalid() {
        for kind in [
            ErrorKind::InvalidToken,
            ErrorKind::InvalidSignature,
            ErrorKind::InvalidAlgorithm,
            ErrorKind::InvalidIssuer,
            ErrorKind::InvalidAudience,
            ErrorKind::MissingRequiredClaim("exp".to_string()),
        ] {
            let err = AuthError::from_validation(JwtError::from(kind));
            assert!(matches!(err, AuthError::Invalid { .. }));
        }
    }

    #[test]
    fn unclassified_kinds_fall_through_to_unknown_with_cause() {
        let err = AuthError::from_validation(JwtError::from(ErrorKind::InvalidEcdsaKey));
        match err {
            AuthError::Unknown(source) => {
                assert!(matches!(source.kind(), ErrorKind::InvalidEcdsaKey));
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn invalid_carries_reason_in_display() {
        let err = AuthError::invalid("refresh token discriminator mismatch");
        assert_eq!(
            err.to_string(),
            "invalid JWT token: refresh token discriminator mismatch"
        );
    }

    #[test]
    fn adapter_errors_pass_through_display_unchanged() {
        let err = AuthError::from(anyhow::anyhow!("user store unreachable"));
        assert_eq!(err.to_string(), "user store unreachable");
    }
}
