use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::JwtError;

/// Result of decoding a token whose signature and structure are valid.
///
/// Expiry is reported instead of enforced so callers can still see whose
/// token aged out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    pub claims: SessionClaims,
    pub expired: bool,
}

/// Token codec signing session claims with HS256.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Minimum secret length for HS256 (256 bits).
    pub const MIN_SECRET_LEN: usize = 32;

    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is shorter than 32 bytes
    ///
    /// # Security Notes
    /// - Store secrets in environment variables or secure vaults, never in code
    /// - Rotating the secret invalidates every outstanding token at once
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.len() < Self::MIN_SECRET_LEN {
            return Err(JwtError::InvalidKey(format!(
                "secret must be at least {} bytes, got {}",
                Self::MIN_SECRET_LEN,
                secret.len()
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and decode its claims, judging expiry against `now`.
    ///
    /// # Arguments
    /// * `token` - Token string to decode
    /// * `now` - Instant the expiry check is evaluated at
    ///
    /// # Returns
    /// Decoded claims plus whether they are past `exp`
    ///
    /// # Errors
    /// * `Malformed` - Signature is invalid, or the token is not a well-formed session token
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<DecodedToken, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is judged below so the claims survive an aged-out token
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::Malformed(e.to_string()))?;

        let claims = token_data.claims;
        if !claims.is_well_formed() {
            return Err(JwtError::Malformed("session claims are inconsistent".to_string()));
        }

        let expired = claims.is_expired_at(now);
        Ok(DecodedToken { claims, expired })
    }

    /// Verify a token and decode its claims against the current time.
    pub fn decode(&self, token: &str) -> Result<DecodedToken, JwtError> {
        self.decode_at(token, Utc::now())
    }
}
