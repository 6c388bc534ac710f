pub mod argon2;
pub mod errors;

pub use self::argon2::Argon2Verifier;
pub use errors::PasswordError;

/// Checks a presented secret against a stored credential.
///
/// Only used at login; the hashing scheme is opaque to session handling.
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Produce a storable credential for `secret`.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    fn hash(&self, secret: &str) -> Result<String, PasswordError>;

    /// Check `secret` against `stored`.
    ///
    /// # Returns
    /// True if the secret matches, false otherwise
    ///
    /// # Errors
    /// * `CorruptHash` - Stored credential cannot be parsed
    fn verify(&self, secret: &str, stored: &str) -> Result<bool, PasswordError>;

    /// Well-formed stored credential that no secret is expected to match.
    ///
    /// Verified against when the identity has no credential of its own, so
    /// that path costs the same as a wrong secret.
    fn decoy(&self) -> &str;
}
