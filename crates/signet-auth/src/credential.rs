//! Credential-bound strategy: adapter-backed authentication that issues a
//! signed token for the matched user.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use signet_config::{JwtConfig, RawJwtConfig};
use signet_core::AuthError;

use crate::adapters::CredentialAdapter;
use crate::capabilities::{CredentialAuthenticator, TokenIssuer, TokenValidator};
use crate::claims::Claims;
use crate::stateless::StatelessJwtStrategy;

/// Identity claims only the adapter may set. Runtime claims can add or
/// override anything else, but never these.
const IDENTITY_CLAIMS: &[&str] = &["id", "sub"];

/// Raw credentials presented for authentication.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
    /// Ephemeral per-request claims overlaid on the adapter's user fields.
    pub runtime_claims: Option<Claims>,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
            runtime_claims: None,
        }
    }

    pub fn with_runtime_claims(mut self, claims: Claims) -> Self {
        self.runtime_claims = Some(claims);
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("runtime_claims", &self.runtime_claims)
            .finish_non_exhaustive()
    }
}

/// A successful authentication: the signed token and the matched user.
#[derive(Debug, Clone, Serialize)]
pub struct Authenticated<U> {
    pub token: String,
    pub user: U,
}

/// Credential-bound JWT strategy.
///
/// Composes a [`StatelessJwtStrategy`] with a [`CredentialAdapter`]: the
/// adapter decides who the user is and what belongs in the token, the inner
/// strategy signs it. Issue/validate delegate to the inner strategy, so a
/// credential-bound strategy is still a [`TokenIssuer`] and
/// [`TokenValidator`].
pub struct CredentialBoundJwtStrategy<A> {
    strategy: StatelessJwtStrategy,
    adapter: A,
}

impl<A> CredentialBoundJwtStrategy<A> {
    /// Creates a strategy from validated configuration and an adapter.
    pub fn new(config: JwtConfig, adapter: A) -> Result<Self, AuthError> {
        Ok(Self {
            strategy: StatelessJwtStrategy::new(config)?,
            adapter,
        })
    }

    /// Validates raw configuration and creates a strategy in one step.
    pub fn from_raw(raw: RawJwtConfig, adapter: A) -> Result<Self, AuthError> {
        Self::new(raw.validate()?, adapter)
    }
}

/// Builds the signing payload: the adapter's user fields, overlaid by
/// runtime claims, with the adapter's identity fields re-asserted so a
/// caller cannot forge identity through runtime claims alone.
pub(crate) fn build_payload(
    user: Value,
    runtime_claims: Option<Claims>,
) -> Result<Claims, AuthError> {
    let Value::Object(user_claims) = user else {
        return Err(AuthError::Adapter(anyhow::anyhow!(
            "credential adapter returned a non-object user payload"
        )));
    };

    let mut claims = user_claims.clone();
    if let Some(runtime) = runtime_claims {
        for (key, value) in runtime {
            claims.insert(key, value);
        }
        for key in IDENTITY_CLAIMS {
            if let Some(value) = user_claims.get(*key) {
                claims.insert((*key).to_string(), value.clone());
            }
        }
    }

    Ok(claims)
}

#[async_trait]
impl<A> CredentialAuthenticator for CredentialBoundJwtStrategy<A>
where
    A: CredentialAdapter,
{
    type User = A::User;

    /// Authenticates raw credentials and issues a token for the match.
    ///
    /// The adapter lookup happens first and independently; only fields the
    /// adapter returns (plus runtime overlays on non-identity fields) are
    /// signed. Adapter failures propagate unchanged as
    /// [`AuthError::Adapter`].
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when no user matches (terminal, no
    /// retry); [`AuthError::Sign`] when signing fails.
    #[instrument(skip(self, credentials), fields(identifier = %credentials.identifier))]
    async fn authenticate(
        &self,
        credentials: Credentials,
    ) -> Result<Authenticated<Self::User>, AuthError> {
        let Credentials {
            identifier,
            secret,
            runtime_claims,
        } = credentials;

        let Some(user) = self.adapter.validate_user(&identifier, &secret).await? else {
            debug!("credential lookup found no matching user");
            return Err(AuthError::InvalidCredentials);
        };

        let user_value = serde_json::to_value(&user)
            .map_err(|err| AuthError::Adapter(anyhow::Error::new(err)))?;
        let payload = build_payload(user_value, runtime_claims)?;
        let token = self.strategy.issue(&payload)?;

        Ok(Authenticated { token, user })
    }
}

impl<A> TokenIssuer for CredentialBoundJwtStrategy<A> {
    fn issue(&self, payload: &Claims) -> Result<String, AuthError> {
        self.strategy.issue(payload)
    }
}

impl<A> TokenValidator for CredentialBoundJwtStrategy<A> {
    fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        self.strategy.validate(token)
    }
}
