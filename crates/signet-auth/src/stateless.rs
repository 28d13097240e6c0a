//! Stateless JWT strategy: token issuance and validation.
//!
//! The strategy is a pure function of its validated configuration. A token's
//! validity is determined entirely from its own signature and claims; there
//! is no side-table and no mutable state between calls.
//!
//! # Algorithm Pinning
//!
//! The verifier accepts only the algorithm fixed at configuration time. The
//! `alg` field a token announces about itself is never trusted: a token
//! signed under any other algorithm fails validation even when the key
//! material would otherwise match, which closes the algorithm-confusion
//! downgrade path.
//!
//! # Example
//!
//! ```ignore
//! use signet_auth::{StatelessJwtStrategy, TokenIssuer, TokenValidator};
//!
//! let strategy = StatelessJwtStrategy::new(config)?;
//!
//! let mut payload = Claims::new();
//! payload.insert("sub".into(), "user-1".into());
//! payload.insert("role".into(), "admin".into());
//!
//! let token = strategy.issue(&payload)?;
//! let claims = strategy.validate(&token)?;
//! assert_eq!(claims["role"], "admin");
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Value;
use tracing::debug;

use signet_config::{JwtAlgorithm, JwtConfig, KeyMaterial, RawJwtConfig};
use signet_core::AuthError;

use crate::capabilities::{TokenIssuer, TokenValidator};
use crate::claims::Claims;

pub(crate) fn signing_algorithm(algorithm: JwtAlgorithm) -> Algorithm {
    match algorithm {
        JwtAlgorithm::Rs256 => Algorithm::RS256,
        JwtAlgorithm::Es256 => Algorithm::ES256,
    }
}

pub(crate) fn encoding_key(
    key: &KeyMaterial,
    algorithm: JwtAlgorithm,
) -> Result<EncodingKey, AuthError> {
    let parsed = match algorithm {
        JwtAlgorithm::Rs256 => EncodingKey::from_rsa_pem(key.private_key_pem.as_bytes()),
        JwtAlgorithm::Es256 => EncodingKey::from_ec_pem(key.private_key_pem.as_bytes()),
    };
    parsed.map_err(|err| AuthError::Config(format!("invalid {algorithm} private key: {err}")))
}

pub(crate) fn decoding_key(
    key: &KeyMaterial,
    algorithm: JwtAlgorithm,
) -> Result<DecodingKey, AuthError> {
    let parsed = match algorithm {
        JwtAlgorithm::Rs256 => DecodingKey::from_rsa_pem(key.public_key_pem.as_bytes()),
        JwtAlgorithm::Es256 => DecodingKey::from_ec_pem(key.public_key_pem.as_bytes()),
    };
    parsed.map_err(|err| AuthError::Config(format!("invalid {algorithm} public key: {err}")))
}

/// Stateless JWT strategy that both issues and validates tokens.
///
/// Construction parses the configured key material and pins the verifier to
/// the configured algorithm, issuer, and audience. Construction failures are
/// [`AuthError::Config`]; a strategy value is either fully usable or never
/// comes into existence.
pub struct StatelessJwtStrategy {
    config: JwtConfig,
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for StatelessJwtStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatelessJwtStrategy")
            .field("config", &self.config)
            .field("header", &self.header)
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl StatelessJwtStrategy {
    /// Creates a strategy from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if the PEM key material cannot be
    /// parsed for the configured algorithm.
    pub fn new(config: JwtConfig) -> Result<Self, AuthError> {
        let algorithm = signing_algorithm(config.algorithm);
        let encoding_key = encoding_key(&config.key, config.algorithm)?;
        let decoding_key = decoding_key(&config.key, config.algorithm)?;

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = &config.audience {
            validation.set_audience(&[audience]);
        }

        debug!(algorithm = %config.algorithm, "stateless JWT strategy configured");

        Ok(Self {
            header: Header::new(algorithm),
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Validates raw configuration and creates a strategy in one step.
    pub fn from_raw(raw: RawJwtConfig) -> Result<Self, AuthError> {
        Self::new(raw.validate()?)
    }

    /// The validated configuration this strategy was built from.
    pub fn config(&self) -> &JwtConfig {
        &self.config
    }
}

impl TokenIssuer for StatelessJwtStrategy {
    /// Signs the payload with the configured key and registered claims.
    ///
    /// `iat` and `exp` are stamped from the configured expiry, and `iss` /
    /// `aud` are added when configured. Registered claims owned by the
    /// configuration replace caller-supplied values of the same name; the
    /// caller never decides a token's lifetime or binding.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Sign`] when the signing primitive fails.
    fn issue(&self, payload: &Claims) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let mut claims = payload.clone();
        claims.insert("iat".to_string(), Value::from(now));
        claims.insert(
            "exp".to_string(),
            Value::from(now + self.config.expires_in.as_secs() as i64),
        );
        if let Some(issuer) = &self.config.issuer {
            claims.insert("iss".to_string(), Value::from(issuer.clone()));
        }
        if let Some(audience) = &self.config.audience {
            claims.insert("aud".to_string(), Value::from(audience.clone()));
        }

        encode(&self.header, &claims, &self.encoding_key).map_err(AuthError::Sign)
    }
}

impl TokenValidator for StatelessJwtStrategy {
    /// Verifies signature, pinned algorithm, and registered claims, then
    /// returns the decoded payload exactly as signed.
    ///
    /// # Errors
    ///
    /// [`AuthError::Expired`] when `exp` has passed, [`AuthError::Invalid`]
    /// for signature/structure/claim mismatches, [`AuthError::Unknown`] for
    /// anything else (with the cause attached).
    fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::from_validation)
    }
}
