use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
///
/// A token is a self-contained assertion of identity: the subject (the
/// account's login email), when it was issued, and when it stops being valid.
/// All three fields are required; a token missing any of them is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (login email of the account)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject with the configured lifetime.
    ///
    /// # Arguments
    /// * `subject` - Login identifier the token asserts
    /// * `lifetime_hours` - Hours until the token expires
    ///
    /// # Returns
    /// Claims with `iat` = now and `exp` = now + lifetime
    pub fn for_subject(subject: impl Into<String>, lifetime_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(lifetime_hours);

        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the token is expired at the given instant.
    ///
    /// A token is valid on `[iat, exp)`: it is already expired at exactly
    /// `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("alice@example.com", 24);

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_is_expired_boundaries() {
        let claims = Claims {
            sub: "alice@example.com".to_string(),
            iat: 900,
            exp: 1000,
        };

        assert!(!claims.is_expired(900)); // issue time
        assert!(!claims.is_expired(999)); // last valid second
        assert!(claims.is_expired(1000)); // exactly at expiration
        assert!(claims.is_expired(1001)); // past expiration
    }
}
