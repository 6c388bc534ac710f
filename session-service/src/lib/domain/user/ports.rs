use async_trait::async_trait;

use crate::domain::user::errors::DirectoryError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;

/// Read-only account lookup used by login and the current-user view.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Directory backend failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DirectoryError>;
}
