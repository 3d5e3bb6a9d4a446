use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::JwtError;

/// Wire shape used while validating; `sub` stays optional so a token without
/// a subject is reported as such instead of as a parse failure.
#[derive(Debug, Deserialize)]
struct UnverifiedClaims {
    sub: Option<String>,
    #[serde(default)]
    iat: i64,
    exp: i64,
}

/// JWT token handler for issuing and validating access tokens.
///
/// Signs with a process-wide shared secret using an HMAC algorithm
/// (HS256 by default).
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key and signing algorithm.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `algorithm` - One of HS256, HS384 or HS512
    ///
    /// # Errors
    /// * `EmptySecret` - The secret is empty
    /// * `UnsupportedAlgorithm` - The algorithm is not a symmetric HMAC algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Rotating the secret invalidates every token issued before
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self {
                encoding_key: EncodingKey::from_secret(secret),
                decoding_key: DecodingKey::from_secret(secret),
                algorithm,
            }),
            other => Err(JwtError::UnsupportedAlgorithm(format!("{:?}", other))),
        }
    }

    /// Issue a signed token for `subject` that expires after `ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        let claims = Claims::new(subject, Utc::now(), ttl);
        self.encode(&claims)
    }

    /// Encode prepared claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Checks the signature and algorithm, requires `exp` and a non-empty
    /// `sub`, and rejects tokens whose `exp` is not strictly in the future.
    /// No clock leeway is applied.
    ///
    /// # Errors
    /// * `Malformed` - Token structure or payload cannot be parsed
    /// * `InvalidSignature` - Signature or algorithm does not match
    /// * `Expired` - Token has expired
    /// * `MissingSubject` - Token carries no subject
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<UnverifiedClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    JwtError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        let UnverifiedClaims { sub, iat, exp } = token_data.claims;

        let sub = match sub {
            Some(sub) if !sub.is_empty() => sub,
            _ => return Err(JwtError::MissingSubject),
        };

        let claims = Claims { sub, iat, exp };
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
