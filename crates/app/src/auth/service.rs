//! Auth service.

use async_trait::async_trait;
use littlelemon::{
    ids::UserId,
    roles::{Principal, RoleSet},
};
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::{
    ApiTokenMetadata, AuthServiceError, BearerToken, IssuedApiToken, NewApiToken,
    repository::PgAuthRepository,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or database insertion fails.
    pub async fn issue_api_token(&self, user: UserId) -> Result<IssuedApiToken, AuthServiceError> {
        let token = BearerToken::issue();

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token.id,
                user,
                version: token.version,
                token_hash: token.secret.verifier(),
            })
            .await?;

        info!(user_id = %user, token_uuid = %token.id, "issued api token");

        Ok(IssuedApiToken {
            token: token.to_string(),
            metadata,
        })
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user: UserId,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_by_user(user)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let presented: BearerToken = bearer_token.parse().map_err(|error| {
            debug!(%error, "rejected malformed bearer token");

            AuthServiceError::NotFound
        })?;

        let token = self
            .repository
            .find_active_api_token(presented.id, presented.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if !presented.secret.matches(&token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        if let Err(error) = self.repository.touch_api_token_last_used(presented.id).await {
            debug!(%error, "failed to record api token use");
        }

        Ok(Principal::new(
            token.user,
            RoleSet::resolve(token.is_superuser, token.groups),
        ))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it was issued to, with their current roles.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<Principal, AuthServiceError>;
}
