//! Credential verification for the `Authorization: jwt <token>` header.
//!
//! Only HMAC algorithms are accepted, and the algorithm is fixed at startup.
//! Claims are checked for signature and time validity but never used to
//! scope data.

use anyhow::Result;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod middleware;

/// Algorithms an operator may configure. Everything else fails startup.
pub const ALLOWED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Error)]
#[error("token rejected: {0}")]
pub struct VerifyError(#[from] jsonwebtoken::errors::Error);

/// Validates a bearer token. Carried in `AppState` as `Arc<dyn CredentialVerifier>`.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<(), VerifyError>;
}

pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        // exp/nbf are still enforced when the token carries them.
        validation.required_spec_claims.clear();
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl CredentialVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<(), VerifyError> {
        decode::<Map<String, Value>>(token, &self.key, &self.validation)?;
        Ok(())
    }
}

/// Resolves a configured algorithm name against [`ALLOWED_ALGORITHMS`].
pub fn parse_algorithm(name: &str) -> Result<Algorithm> {
    ALLOWED_ALGORITHMS
        .into_iter()
        .find(|alg| format!("{alg:?}") == name)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "API_JWT_ALGORITHM '{name}' is not allowed; expected one of HS256, HS384, HS512"
            )
        })
}
