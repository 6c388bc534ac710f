use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::config::UserSeed;
use crate::domain::user::errors::DirectoryError;
use crate::domain::user::errors::EmailError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserDirectory;

/// User directory held in memory, seeded from configuration.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<EmailAddress, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from configured seed accounts.
    ///
    /// # Errors
    /// * `InvalidFormat` - A seed email is not a valid address
    pub fn from_seeds(seeds: &[UserSeed]) -> Result<Self, EmailError> {
        let directory = Self::new();
        for seed in seeds {
            directory.insert(User {
                email: EmailAddress::new(seed.email.clone())?,
                username: seed.username.clone(),
                password_hash: seed.password_hash.clone(),
            });
        }
        Ok(directory)
    }

    /// Add or replace an account.
    pub fn insert(&self, user: User) {
        self.users.write().insert(user.email.clone(), user);
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DirectoryError> {
        Ok(self.users.read().get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(email: &str) -> UserSeed {
        UserSeed {
            email: email.to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$test_hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_from_seeds_normalizes_email() {
        let directory = InMemoryUserDirectory::from_seeds(&[seed("A@X.com")]).unwrap();

        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let user = directory.find_by_email(&email).await.unwrap();

        assert_eq!(user.map(|u| u.username), Some("alice".to_string()));
        assert_eq!(directory.len(), 1);
    }

    #[tokio::test]
    async fn test_find_missing_user() {
        let directory = InMemoryUserDirectory::new();
        let email = EmailAddress::new("b@x.com".to_string()).unwrap();

        assert_eq!(directory.find_by_email(&email).await.unwrap(), None);
        assert!(directory.is_empty());
    }

    #[test]
    fn test_from_seeds_rejects_bad_email() {
        let result = InMemoryUserDirectory::from_seeds(&[seed("nope")]);
        assert!(result.is_err());
    }
}
