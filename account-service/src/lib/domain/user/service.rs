use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AuthResult;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::ValidatedIdentity;
use crate::user::errors::AuthError;
use crate::user::models::EmailAddress;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Authentication service implementation.
///
/// Orchestrates identity resolution, credential verification, and token
/// issuance over an injected repository. Every operation is side-effect-free
/// on failure.
pub struct AuthService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    authenticator: Arc<Authenticator>,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    /// Create a new authentication service with injected dependencies.
    pub fn new(repository: Arc<R>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn resolve_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        self.repository.find_by_email(email).await
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: UserRepository,
{
    async fn login(&self, email: &EmailAddress, password: &str) -> Result<AuthResult, AuthError> {
        let user = self
            .resolve_by_email(email.as_str())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.email.as_str())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
                // A stored value that does not parse as a hash is an
                // unmigrated credential; it can never match a submission.
                AuthenticationError::PasswordError(_) => AuthError::InvalidCredentials,
                AuthenticationError::JwtError(e) => {
                    AuthError::Unknown(format!("Token generation failed: {}", e))
                }
            })?;

        Ok(AuthResult {
            token: result.access_token,
            user_id: user.id,
            display_name: user.display_name(),
            email: user.email,
        })
    }

    async fn register(&self, command: RegisterUserCommand) -> Result<AuthResult, AuthError> {
        if self
            .resolve_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = User {
            id: UserId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_hash,
            role: command.role,
            created_at: Utc::now(),
        };

        // The unique constraint is the authoritative guard; a concurrent
        // insert between the pre-check and here surfaces as the same error.
        let created = self.repository.create(user).await?;

        let token = self
            .authenticator
            .issue_token(created.email.as_str())
            .map_err(|e| AuthError::Unknown(format!("Token generation failed: {}", e)))?;

        Ok(AuthResult {
            token,
            user_id: created.id,
            display_name: created.display_name(),
            email: created.email,
        })
    }

    async fn validate(&self, token: &str) -> Result<ValidatedIdentity, AuthError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Token rejected");
            AuthError::InvalidToken
        })?;

        let user = self
            .resolve_by_email(&claims.sub)
            .await?
            .ok_or_else(|| AuthError::NotFound(claims.sub.clone()))?;

        Ok(ValidatedIdentity {
            display_name: user.display_name(),
            authority: user.authority(),
            email: user.email,
        })
    }
}
