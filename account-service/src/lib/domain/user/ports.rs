use async_trait::async_trait;

use crate::domain::user::models::AuthResult;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::ValidatedIdentity;
use crate::user::errors::AuthError;
use crate::user::models::EmailAddress;

/// Port for the authentication service.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a session token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or password mismatch
    ///   (intentionally the same error for both)
    /// * `DatabaseError` - Lookup failed
    async fn login(&self, email: &EmailAddress, password: &str) -> Result<AuthResult, AuthError>;

    /// Create a new account, hash its credential, and issue a token.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Login identifier is already taken, whether
    ///   detected by the pre-check or by the store's unique constraint
    /// * `DatabaseError` - Persistence failed
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthResult, AuthError>;

    /// Validate a session token and re-resolve the identity it asserts.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, mis-signed, or expired
    /// * `NotFound` - Token subject no longer resolves to an account
    async fn validate(&self, token: &str) -> Result<ValidatedIdentity, AuthError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Retrieve a user by unique login email (case-sensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve all users. Used only by the credential migration task.
    async fn list_all(&self) -> Result<Vec<User>, AuthError>;

    /// Update an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, AuthError>;
}
