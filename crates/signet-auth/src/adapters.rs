//! User-store boundaries consumed by the credential-bound strategy.
//!
//! Adapters are external collaborators: their lookup cost and failure modes
//! are opaque here. Adapter errors travel through [`anyhow::Error`] and
//! surface unchanged as [`AuthError::Adapter`], never reclassified into JWT
//! failure kinds.
//!
//! [`AuthError::Adapter`]: signet_core::AuthError

use async_trait::async_trait;
use serde::Serialize;

/// Resolves an identifier/secret pair to a user record.
///
/// Every field of the returned user becomes a candidate token claim, so
/// implementations should serialize only what belongs in a token (mark
/// sensitive fields `#[serde(skip_serializing)]`).
#[async_trait]
pub trait CredentialAdapter: Send + Sync {
    type User: Serialize + Send + Sync;

    /// Returns `Ok(None)` when no user matches; `Err` only for adapter
    /// failures such as an unreachable datastore.
    async fn validate_user(
        &self,
        identifier: &str,
        secret: &str,
    ) -> anyhow::Result<Option<Self::User>>;
}

/// Broader user-lookup boundary for strategies that resolve users before
/// checking credentials.
#[async_trait]
pub trait UserStore: Send + Sync {
    type User: Send + Sync;

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<Self::User>>;

    async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<Self::User>>;

    async fn validate_password(&self, user: &Self::User, password: &str)
    -> anyhow::Result<bool>;

    /// Optional persistence hook; stores that are read-only keep the default.
    async fn save_user(&self, _user: Self::User) -> anyhow::Result<Self::User> {
        Err(anyhow::anyhow!("user store does not support saving users"))
    }
}

/// [`CredentialAdapter`] over any [`UserStore`]: resolves the identifier
/// first as an email, then as a username, then checks the password.
pub struct LookupAdapter<S> {
    store: S,
}

impl<S> LookupAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> CredentialAdapter for LookupAdapter<S>
where
    S: UserStore,
    S::User: Serialize,
{
    type User = S::User;

    async fn validate_user(
        &self,
        identifier: &str,
        secret: &str,
    ) -> anyhow::Result<Option<Self::User>> {
        let user = match self.store.find_user_by_email(identifier).await? {
            Some(user) => Some(user),
            None => self.store.find_user_by_username(identifier).await?,
        };

        let Some(user) = user else {
            return Ok(None);
        };

        if self.store.validate_password(&user, secret).await? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
