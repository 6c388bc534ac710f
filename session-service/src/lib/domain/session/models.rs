use auth::IssuedToken;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;

/// Command to log in with validated identity
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

/// Successful login: the account and its new session token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub session: IssuedToken,
}
