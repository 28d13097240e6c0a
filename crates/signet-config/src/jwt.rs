use std::env;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use signet_core::AuthError;

/// Default lifetime of access tokens when `expires_in` is omitted.
pub const DEFAULT_ACCESS_EXPIRY: Duration = Duration::from_secs(30);

/// Default lifetime of refresh tokens when `refresh_expires_in` is omitted.
pub const DEFAULT_REFRESH_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Signing algorithms the strategies accept.
///
/// The set is fixed at compile time and checked before any cryptographic
/// call. HMAC-family algorithms are not in it: a verifier pinned to an
/// asymmetric algorithm can never be downgraded into treating a public key
/// as a shared secret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JwtAlgorithm {
    #[default]
    Rs256,
    Es256,
}

impl JwtAlgorithm {
    /// Parse an algorithm name, rejecting anything outside the allow-list.
    pub fn parse(name: &str) -> Result<Self, AuthError> {
        match name {
            "RS256" => Ok(Self::Rs256),
            "ES256" => Ok(Self::Es256),
            other => Err(AuthError::Config(format!(
                "algorithm {other:?} is not allow-listed (expected RS256 or ES256)"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rs256 => "RS256",
            Self::Es256 => "ES256",
        }
    }
}

impl fmt::Display for JwtAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untrusted secret input: either a bare string or a key pair.
#[derive(Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSecret {
    Value(String),
    KeyPair {
        #[serde(alias = "privateKey")]
        private_key: String,
        #[serde(alias = "publicKey")]
        public_key: String,
    },
}

impl fmt::Debug for RawSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(_) => f.debug_tuple("Value").finish_non_exhaustive(),
            Self::KeyPair { .. } => f.debug_struct("KeyPair").finish_non_exhaustive(),
        }
    }
}

/// Untrusted expiry input: a number of seconds or a duration spec such as
/// `"30s"`, `"15m"`, `"2h"`, or `"7d"`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawExpiry {
    Seconds(u64),
    Spec(String),
}

impl RawExpiry {
    fn resolve(&self, field: &str) -> Result<Duration, AuthError> {
        match self {
            Self::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            Self::Spec(spec) => parse_duration(spec, field),
        }
    }
}

fn parse_duration(spec: &str, field: &str) -> Result<Duration, AuthError> {
    let spec = spec.trim();
    let (digits, multiplier) = match spec.as_bytes().last().copied() {
        Some(b's') => (&spec[..spec.len() - 1], 1),
        Some(b'm') => (&spec[..spec.len() - 1], 60),
        Some(b'h') => (&spec[..spec.len() - 1], 60 * 60),
        Some(b'd') => (&spec[..spec.len() - 1], 24 * 60 * 60),
        Some(c) if c.is_ascii_digit() => (spec, 1),
        _ => {
            return Err(AuthError::Config(format!(
                "{field} {spec:?} is not a valid duration"
            )));
        }
    };

    digits
        .parse::<u64>()
        .map(|value| Duration::from_secs(value * multiplier))
        .map_err(|_| AuthError::Config(format!("{field} {spec:?} is not a valid duration")))
}

/// Untrusted strategy configuration. Unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawJwtConfig {
    pub secret: Option<RawSecret>,
    pub algorithm: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    #[serde(alias = "expiresIn")]
    pub expires_in: Option<RawExpiry>,
}

impl RawJwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: secret_from_env("JWT_PRIVATE_KEY", "JWT_PUBLIC_KEY"),
            algorithm: env::var("JWT_ALGORITHM").ok(),
            issuer: env::var("JWT_ISSUER").ok(),
            audience: env::var("JWT_AUDIENCE").ok(),
            expires_in: env::var("JWT_EXPIRES_IN").ok().map(RawExpiry::Spec),
        }
    }

    /// Validate into an immutable [`JwtConfig`].
    pub fn validate(self) -> Result<JwtConfig, AuthError> {
        let algorithm = match self.algorithm.as_deref() {
            Some(name) => JwtAlgorithm::parse(name)?,
            None => JwtAlgorithm::default(),
        };
        let key = validate_secret(self.secret, algorithm, "secret")?;
        let expires_in = match &self.expires_in {
            Some(raw) => raw.resolve("expires_in")?,
            None => DEFAULT_ACCESS_EXPIRY,
        };

        Ok(JwtConfig {
            key,
            algorithm,
            issuer: self.issuer,
            audience: self.audience,
            expires_in,
        })
    }
}

/// Untrusted configuration for the refreshable strategy: the base fields plus
/// a mandatory refresh secret and an optional refresh expiry.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawRefreshableJwtConfig {
    #[serde(flatten)]
    pub base: RawJwtConfig,
    #[serde(alias = "refreshSecret")]
    pub refresh_secret: Option<RawSecret>,
    #[serde(alias = "refreshExpiresIn")]
    pub refresh_expires_in: Option<RawExpiry>,
}

impl RawRefreshableJwtConfig {
    pub fn from_env() -> Self {
        Self {
            base: RawJwtConfig::from_env(),
            refresh_secret: secret_from_env("JWT_REFRESH_PRIVATE_KEY", "JWT_REFRESH_PUBLIC_KEY"),
            refresh_expires_in: env::var("JWT_REFRESH_EXPIRES_IN").ok().map(RawExpiry::Spec),
        }
    }

    /// Validate into an immutable [`RefreshableJwtConfig`].
    pub fn validate(self) -> Result<RefreshableJwtConfig, AuthError> {
        let base = self.base.validate()?;
        let refresh_key = validate_secret(self.refresh_secret, base.algorithm, "refresh_secret")?;

        if refresh_key == base.key {
            warn!(
                "refresh token key material matches access token key material; \
                 distinct keys are strongly recommended"
            );
        }

        let refresh_expires_in = match &self.refresh_expires_in {
            Some(raw) => raw.resolve("refresh_expires_in")?,
            None => DEFAULT_REFRESH_EXPIRY,
        };

        Ok(RefreshableJwtConfig {
            base,
            refresh_key,
            refresh_expires_in,
        })
    }
}

fn secret_from_env(private_var: &str, public_var: &str) -> Option<RawSecret> {
    match (env::var(private_var), env::var(public_var)) {
        (Ok(private_key), Ok(public_key)) => Some(RawSecret::KeyPair {
            private_key,
            public_key,
        }),
        (Ok(private_key), Err(_)) => Some(RawSecret::Value(private_key)),
        _ => None,
    }
}

fn validate_secret(
    secret: Option<RawSecret>,
    algorithm: JwtAlgorithm,
    field: &str,
) -> Result<KeyMaterial, AuthError> {
    match secret {
        None => Err(AuthError::Config(format!("{field} is required"))),
        Some(RawSecret::Value(value)) if value.is_empty() => {
            Err(AuthError::Config(format!("{field} must not be empty")))
        }
        Some(RawSecret::Value(_)) => Err(AuthError::Config(format!(
            "{algorithm} requires {field} to be a private/public key pair, not a shared secret"
        ))),
        Some(RawSecret::KeyPair {
            private_key,
            public_key,
        }) => {
            if private_key.is_empty() || public_key.is_empty() {
                return Err(AuthError::Config(format!("{field} must not be empty")));
            }
            Ok(KeyMaterial {
                private_key_pem: private_key,
                public_key_pem: public_key,
            })
        }
    }
}

/// Validated asymmetric key material in PEM form.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub private_key_pem: String,
    pub public_key_pem: String,
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial").finish_non_exhaustive()
    }
}

/// Validated, immutable configuration for a stateless JWT strategy.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub key: KeyMaterial,
    pub algorithm: JwtAlgorithm,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub expires_in: Duration,
}

/// Validated, immutable configuration for the refreshable strategy. The
/// refresh signing scope never shares a secret object with the access scope.
#[derive(Clone, Debug)]
pub struct RefreshableJwtConfig {
    pub base: JwtConfig,
    pub refresh_key: KeyMaterial,
    pub refresh_expires_in: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_pair(tag: &str) -> RawSecret {
        RawSecret::KeyPair {
            private_key: format!("{tag}-private"),
            public_key: format!("{tag}-public"),
        }
    }

    #[test]
    fn missing_secret_is_rejected() {
        let err = RawJwtConfig::default().validate().unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));
    }

    #[test]
    fn empty_secret_is_rejected() {
        let raw = RawJwtConfig {
            secret: Some(RawSecret::Value(String::new())),
            ..Default::default()
        };
        assert!(matches!(raw.validate(), Err(AuthError::Config(_))));
    }

    #[test]
    fn bare_string_secret_is_rejected_for_asymmetric_algorithms() {
        let raw = RawJwtConfig {
            secret: Some(RawSecret::Value("shared-secret".to_string())),
            ..Default::default()
        };
        let err = raw.validate().unwrap_err();
        assert!(err.to_string().contains("key pair"));
    }

    #[test]
    fn hmac_algorithm_is_rejected() {
        let raw = RawJwtConfig {
            secret: Some(key_pair("access")),
            algorithm: Some("HS256".to_string()),
            ..Default::default()
        };
        let err = raw.validate().unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));
        assert!(err.to_string().contains("allow-listed"));
    }

    #[test]
    fn defaults_are_rs256_and_short_expiry() {
        let config = RawJwtConfig {
            secret: Some(key_pair("access")),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(config.algorithm, JwtAlgorithm::Rs256);
        assert_eq!(config.expires_in, DEFAULT_ACCESS_EXPIRY);
        assert!(config.issuer.is_none());
        assert!(config.audience.is_none());
    }

    #[test]
    fn duration_specs_parse() {
        for (spec, secs) in [
            ("30s", 30),
            ("15m", 15 * 60),
            ("2h", 2 * 60 * 60),
            ("7d", 7 * 24 * 60 * 60),
            ("45", 45),
        ] {
            let raw = RawJwtConfig {
                secret: Some(key_pair("access")),
                expires_in: Some(RawExpiry::Spec(spec.to_string())),
                ..Default::default()
            };
            assert_eq!(
                raw.validate().unwrap().expires_in,
                Duration::from_secs(secs),
                "spec {spec:?}"
            );
        }
    }

    #[test]
    fn numeric_expiry_means_seconds() {
        let raw = RawJwtConfig {
            secret: Some(key_pair("access")),
            expires_in: Some(RawExpiry::Seconds(90)),
            ..Default::default()
        };
        assert_eq!(raw.validate().unwrap().expires_in, Duration::from_secs(90));
    }

    #[test]
    fn malformed_duration_specs_are_rejected() {
        for spec in ["", "fast", "10w", "s", "-5s"] {
            let raw = RawJwtConfig {
                secret: Some(key_pair("access")),
                expires_in: Some(RawExpiry::Spec(spec.to_string())),
                ..Default::default()
            };
            assert!(
                matches!(raw.validate(), Err(AuthError::Config(_))),
                "spec {spec:?}"
            );
        }
    }

    #[test]
    fn refreshable_config_requires_refresh_secret() {
        let raw = RawRefreshableJwtConfig {
            base: RawJwtConfig {
                secret: Some(key_pair("access")),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = raw.validate().unwrap_err();
        assert!(err.to_string().contains("refresh_secret"));
    }

    #[test]
    fn refreshable_defaults_to_long_bounded_expiry() {
        let config = RawRefreshableJwtConfig {
            base: RawJwtConfig {
                secret: Some(key_pair("access")),
                ..Default::default()
            },
            refresh_secret: Some(key_pair("refresh")),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(config.refresh_expires_in, DEFAULT_REFRESH_EXPIRY);
        assert_ne!(config.refresh_key, config.base.key);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let raw: RawJwtConfig = serde_json::from_value(serde_json::json!({
            "secret": { "private_key": "p", "public_key": "q" },
            "algorithm": "ES256",
            "keep_alive": true,
            "tenant": "acme"
        }))
        .unwrap();
        let config = raw.validate().unwrap();
        assert_eq!(config.algorithm, JwtAlgorithm::Es256);
    }

    #[test]
    fn secret_accepts_plain_string_shape() {
        // The untagged form still deserializes; validation decides its fate.
        let raw: RawJwtConfig = serde_json::from_value(serde_json::json!({
            "secret": "just-a-string"
        }))
        .unwrap();
        assert!(matches!(raw.secret, Some(RawSecret::Value(_))));
    }
}
