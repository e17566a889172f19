use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub(crate) enum TokenError {
    #[error("unsupported signature algorithm '{0}', expected an asymmetric one")]
    UnsupportedAlgorithm(String),

    #[error("signing key rejected")]
    Key(#[source] jsonwebtoken::errors::Error),

    #[error("token encode failed")]
    Issue(#[source] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("malformed token")]
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Access,
    Refresh,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies the self-contained credentials carried by clients.
/// Private key signs, public key verifies; nothing is persisted.
#[derive(Debug)]
pub(crate) struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_minutes: i64,
    refresh_ttl_minutes: i64,
}

impl TokenCodec {
    /// Expiry tolerance absorbing clock drift between issuer and verifier.
    const LEEWAY_SECONDS: u64 = 10;

    pub(crate) fn new(
        algorithm: &str,
        private_key_pem: &str,
        public_key_pem: &str,
        access_ttl_minutes: i64,
        refresh_ttl_minutes: i64,
    ) -> Result<Self, TokenError> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| TokenError::UnsupportedAlgorithm(algorithm.to_string()))?;

        let (encoding_key, decoding_key) = match algorithm {
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => (
                EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).map_err(TokenError::Key)?,
                DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(TokenError::Key)?,
            ),
            Algorithm::ES256 | Algorithm::ES384 => (
                EncodingKey::from_ec_pem(private_key_pem.as_bytes()).map_err(TokenError::Key)?,
                DecodingKey::from_ec_pem(public_key_pem.as_bytes()).map_err(TokenError::Key)?,
            ),
            Algorithm::EdDSA => (
                EncodingKey::from_ed_pem(private_key_pem.as_bytes()).map_err(TokenError::Key)?,
                DecodingKey::from_ed_pem(public_key_pem.as_bytes()).map_err(TokenError::Key)?,
            ),
            other => {
                return Err(TokenError::UnsupportedAlgorithm(format!("{other:?}")));
            }
        };

        Ok(Self {
            algorithm,
            encoding_key,
            decoding_key,
            access_ttl_minutes,
            refresh_ttl_minutes,
        })
    }

    pub(crate) fn refresh_ttl_minutes(&self) -> i64 {
        self.refresh_ttl_minutes
    }

    pub(crate) fn issue(&self, subject: Uuid, kind: TokenKind) -> Result<String, TokenError> {
        let ttl_minutes = match kind {
            TokenKind::Access => self.access_ttl_minutes,
            TokenKind::Refresh => self.refresh_ttl_minutes,
        };

        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(TokenError::Issue)
    }

    /// Returns the subject id of a valid token. Whether that subject still
    /// exists is the caller's problem.
    pub(crate) fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = Self::LEEWAY_SECONDS;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|err| {
                match err.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed,
                }
            })?;

        Uuid::parse_str(&token_data.claims.sub).map_err(|_| TokenError::Malformed)
    }
}
