use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Minimum signing secret length for HS256, in bytes.
const MIN_SECRET_BYTES: usize = 32;

/// Process-wide token configuration.
///
/// Built once at startup from the loaded configuration and validated by
/// [`Authenticator::new`]; immutable afterwards.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric signing secret shared by token issuance and validation
    pub secret: String,

    /// Token lifetime in hours
    pub lifetime_hours: i64,
}

/// Token configuration errors.
///
/// Fatal at startup; never surfaced on a per-request path.
#[derive(Debug, Clone, Error)]
pub enum TokenConfigError {
    #[error("Signing secret must be at least {MIN_SECRET_BYTES} bytes, got {0}")]
    SecretTooShort(usize),

    #[error("Token lifetime must be positive, got {0}")]
    InvalidLifetime(i64),
}

/// Authentication coordinator combining password verification and token
/// issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    lifetime_hours: i64,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator from the process token configuration.
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret is under 32 bytes
    /// * `InvalidLifetime` - Lifetime is zero or negative
    pub fn new(config: &TokenConfig) -> Result<Self, TokenConfigError> {
        if config.secret.len() < MIN_SECRET_BYTES {
            return Err(TokenConfigError::SecretTooShort(config.secret.len()));
        }
        if config.lifetime_hours <= 0 {
            return Err(TokenConfigError::InvalidLifetime(config.lifetime_hours));
        }

        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(config.secret.as_bytes()),
            lifetime_hours: config.lifetime_hours,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token for the subject.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Login identifier to assert in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a session token without password verification.
    ///
    /// Used after registration, where the credential was just stored and
    /// needs no re-check.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.lifetime_hours);
        self.jwt_handler.encode(&claims)
    }

    /// Validate a session token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, mis-signed, or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
