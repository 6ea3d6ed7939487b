use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;

/// User aggregate entity.
///
/// The credential hash is opaque to the domain: either an Argon2 PHC string
/// (target format) or a legacy plaintext value awaiting migration.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Human-readable name shown to the client, never used for lookup.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Project the attached role into a single authority label.
    ///
    /// Accounts without a role get the baseline authority.
    pub fn authority(&self) -> String {
        match &self.role {
            Some(role) => format!("ROLE_{}", role.name().to_uppercase()),
            None => "ROLE_USER".to_string(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// The unique login identifier. Validated against RFC 5322; stored and
/// looked up case-sensitively, without normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Coarse permission label optionally attached to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub password: String,
    pub role: Option<Role>,
}

/// Outcome of a successful login or registration.
///
/// A projection of the authenticated identity plus the issued token; the
/// credential hash never leaves the domain layer.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub user_id: UserId,
    pub display_name: String,
    pub email: EmailAddress,
}

/// Identity resolved from a validated session token.
#[derive(Debug, Clone)]
pub struct ValidatedIdentity {
    pub display_name: String,
    pub email: EmailAddress,
    pub authority: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Option<Role>) -> User {
        User {
            id: UserId::new(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: EmailAddress::new("ada@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_joins_name_parts() {
        let user = user_with_role(None);
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_with_empty_last_name() {
        let mut user = user_with_role(None);
        user.last_name = String::new();
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn test_authority_defaults_without_role() {
        let user = user_with_role(None);
        assert_eq!(user.authority(), "ROLE_USER");
    }

    #[test]
    fn test_authority_projects_role_name() {
        let user = user_with_role(Some(Role::new("admin")));
        assert_eq!(user.authority(), "ROLE_ADMIN");
    }

    #[test]
    fn test_email_address_rejects_invalid_format() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("ada@example.com".to_string()).is_ok());
    }
}
