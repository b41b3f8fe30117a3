use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Default session validity window.
pub const DEFAULT_TTL_HOURS: i64 = 180;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature or malformed token.
    #[error("invalid token")]
    Invalid,
    /// Signature fine, validity window passed.
    #[error("expired token")]
    Expired,
    #[error("token encoding error: {0}")]
    Encode(String),
}

/// Mints and verifies signed, time-bounded session tokens.
///
/// `issue` signs whatever claims object the caller supplies, verbatim;
/// the claims are not re-validated against the credential store.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Sign the supplied claims with `iat` and a fixed expiry window.
    pub fn issue(&self, claims: &Map<String, Value>) -> Result<String, TokenError> {
        let now = Utc::now();
        let mut payload = claims.clone();
        payload.insert("iat".into(), Value::from(now.timestamp()));
        payload.insert("exp".into(), Value::from((now + self.ttl).timestamp()));
        encode(&JwtHeader::default(), &payload, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Check signature and expiry; return the embedded claims on success.
    pub fn verify(&self, token: &str) -> Result<Map<String, Value>, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        match decode::<Map<String, Value>>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => {
                debug!(error = %e, "token verification failed");
                match e.kind() {
                    ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                    _ => Err(TokenError::Invalid),
                }
            }
        }
    }
}

/// Cookie attributes for the session cookie, driven by deployment
/// environment rather than hard-coded per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSitePolicy {
    Strict,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSitePolicy,
}

impl CookiePolicy {
    /// Production serves the frontend cross-site: Secure + SameSite=None.
    /// Everywhere else: Strict, plain HTTP allowed.
    pub fn for_deployment(production: bool) -> Self {
        if production {
            Self { secure: true, same_site: SameSitePolicy::None }
        } else {
            Self { secure: false, same_site: SameSitePolicy::Strict }
        }
    }
}
