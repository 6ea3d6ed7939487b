use auth::PasswordHasher;

use crate::user::errors::AuthError;
use crate::user::ports::UserRepository;

/// Outcome of a credential migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    /// Records rewritten to the target hash format
    pub migrated: usize,
    /// Records that already carried the format tag
    pub skipped: usize,
}

impl MigrationReport {
    pub fn total(&self) -> usize {
        self.migrated + self.skipped
    }
}

/// Rewrite every legacy credential to the target hash format.
///
/// Scans all user records; any stored credential without the Argon2 format
/// tag is treated as legacy plaintext, hashed, and written back one record at
/// a time. Re-running against fully migrated data performs zero writes, so
/// the task is idempotent. It must not run concurrently with itself or with
/// live login traffic; serialization is an operational concern of the
/// `migrate-credentials` binary.
///
/// # Errors
/// * `Password` - Hashing a legacy value failed
/// * `DatabaseError` - Enumeration or per-record write failed
pub async fn migrate_legacy_credentials<R>(
    repository: &R,
    hasher: &PasswordHasher,
) -> Result<MigrationReport, AuthError>
where
    R: UserRepository,
{
    let users = repository.list_all().await?;
    let mut report = MigrationReport {
        migrated: 0,
        skipped: 0,
    };

    for mut user in users {
        if PasswordHasher::is_hashed(&user.password_hash) {
            tracing::debug!(email = %user.email, "Credential already in target format");
            report.skipped += 1;
            continue;
        }

        let email = user.email.as_str().to_string();
        user.password_hash = hasher.hash(&user.password_hash)?;
        repository.update(user).await?;

        report.migrated += 1;
        tracing::info!(email = %email, "Credential migrated to target format");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, AuthError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
            async fn list_all(&self) -> Result<Vec<User>, AuthError>;
            async fn update(&self, user: User) -> Result<User, AuthError>;
        }
    }

    fn record(email: &str, password_hash: &str) -> User {
        User {
            id: UserId::new(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: password_hash.to_string(),
            role: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_migrates_only_legacy_records() {
        let hasher = PasswordHasher::new();
        let legacy = record("legacy@example.com", "pw123");
        let migrated = record("done@example.com", &hasher.hash("other").unwrap());

        let mut repository = MockTestUserRepository::new();
        let records = vec![legacy, migrated];
        repository
            .expect_list_all()
            .times(1)
            .returning(move || Ok(records.clone()));
        repository
            .expect_update()
            .withf(|user| {
                user.email.as_str() == "legacy@example.com"
                    && PasswordHasher::is_hashed(&user.password_hash)
                    && PasswordHasher::new()
                        .verify("pw123", &user.password_hash)
                        .unwrap()
            })
            .times(1)
            .returning(|user| Ok(user));

        let report = migrate_legacy_credentials(&repository, &hasher)
            .await
            .unwrap();

        assert_eq!(report.migrated, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.total(), 2);
    }

    #[tokio::test]
    async fn test_second_run_performs_zero_writes() {
        let hasher = PasswordHasher::new();
        let records = vec![
            record("a@example.com", &hasher.hash("pw_a").unwrap()),
            record("b@example.com", &hasher.hash("pw_b").unwrap()),
        ];

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_list_all()
            .times(1)
            .returning(move || Ok(records.clone()));
        repository.expect_update().times(0);

        let report = migrate_legacy_credentials(&repository, &hasher)
            .await
            .unwrap();

        assert_eq!(report.migrated, 0);
        assert_eq!(report.skipped, 2);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let hasher = PasswordHasher::new();

        let mut repository = MockTestUserRepository::new();
        repository.expect_list_all().times(1).returning(|| Ok(vec![]));
        repository.expect_update().times(0);

        let report = migrate_legacy_credentials(&repository, &hasher)
            .await
            .unwrap();

        assert_eq!(report.total(), 0);
    }
}
