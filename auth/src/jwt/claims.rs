use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Identity payload carried inside a session token.
///
/// Produced once at issuance and never mutated afterwards. Timestamps are
/// Unix seconds, matching the registered `iat` / `exp` JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// User-facing unique identifier (the user's email address)
    pub email: String,

    /// Random identifier unique to this issuance (UUID v4)
    pub session_id: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a fresh session.
    ///
    /// # Arguments
    /// * `identity` - Identity the session belongs to
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Validity window, must be positive
    ///
    /// # Returns
    /// Claims with a newly generated session id
    pub fn issue(identity: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expires_at = issued_at + ttl;

        Self {
            email: identity.to_string(),
            session_id: Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Identity the session belongs to.
    pub fn identity(&self) -> &str {
        &self.email
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.iat, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Check if the session aged out at `now`.
    ///
    /// A token is still valid during the second named by `exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp < now.timestamp()
    }

    /// Structural checks applied after signature verification.
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.email.is_empty()
            && Uuid::parse_str(&self.session_id).is_ok()
            && self.exp > self.iat
    }
}
