//! Generic JWT helper built around a symmetric secret.
//!
//! [`JwtManager`] issues, parses and inspects compact HS256 tokens carrying
//! any claims type that implements [`Claims`]. Validity is recomputed on
//! every parse; there is no server-side token state. The manager is stateless
//! apart from its key and is safe to share across tasks without locking.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod claims;
pub mod error;

pub use claims::{Audience, BaseClaims, Claims, SetExpiration};
pub use error::JwtError;

/// Source of "now" for expiry decisions. Injectable for deterministic tests.
pub type Clock = fn() -> DateTime<Utc>;

/// Issues and verifies HMAC-signed tokens with a single symmetric secret.
///
/// The secret is owned by the manager for its lifetime and used identically
/// for signing and verification; it is never exposed.
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Clock,
}

/// Only the algorithm is inspected before signature verification; anything
/// else in the header is untrusted input.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

fn hmac_algorithm(alg: &str) -> Option<Algorithm> {
    match alg {
        "HS256" => Some(Algorithm::HS256),
        "HS384" => Some(Algorithm::HS384),
        "HS512" => Some(Algorithm::HS512),
        _ => None,
    }
}

impl JwtManager {
    /// Create a manager around a symmetric secret.
    ///
    /// The secret should be cryptographically strong; no minimum length is
    /// enforced here.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self::with_clock(secret, Utc::now)
    }

    /// Like [`JwtManager::new`], with an explicit clock.
    pub fn with_clock(secret: impl AsRef<[u8]>, clock: Clock) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            clock,
        }
    }

    /// Sign `claims` into a compact HS256 token.
    ///
    /// No expiry is added implicitly; if the caller wants an expiration it
    /// must already be set on the claims.
    pub fn issue<C>(&self, claims: &C) -> Result<String, JwtError>
    where
        C: Claims + Serialize,
    {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(JwtError::Signing)
    }

    /// Sign `claims` after injecting `exp = now + expiry`.
    ///
    /// The injection overwrites any previously set expiration, and only
    /// happens when the claims type exposes the settable-expiry capability.
    /// When it does not, the claims are signed as-is with no error; callers
    /// rely on this permissive behavior.
    pub fn issue_with_expiry<C>(&self, claims: &mut C, expiry: Duration) -> Result<String, JwtError>
    where
        C: Claims + Serialize,
    {
        let expires_at = (self.clock)() + expiry;
        if let Some(settable) = claims.settable_expiration() {
            settable.set_expiration(expires_at);
        }
        self.issue(claims)
    }

    /// Verify a token fully and return its claims.
    ///
    /// Checks, in order: declared algorithm is in the HMAC family
    /// ([`JwtError::UnexpectedAlgorithm`]), signature matches
    /// ([`JwtError::InvalidSignature`]), `exp` has not passed
    /// ([`JwtError::TokenExpired`]) and `nbf` has been reached
    /// ([`JwtError::TokenNotYetValid`]).
    pub fn parse<C>(&self, token: &str) -> Result<C, JwtError>
    where
        C: Claims + DeserializeOwned,
    {
        self.decode_claims(token, true)
    }

    /// Verify the algorithm and signature but skip the time-bound checks.
    ///
    /// Intended for reading claims out of a token that is known or suspected
    /// to be expired.
    pub fn parse_without_expiry_validation<C>(&self, token: &str) -> Result<C, JwtError>
    where
        C: Claims + DeserializeOwned,
    {
        self.decode_claims(token, false)
    }

    /// Report whether a token is expired.
    ///
    /// A token that parses cleanly is not expired. Otherwise the claims are
    /// re-extracted without time validation: if even that fails the token
    /// cannot be trusted and the signature/algorithm error is returned; if it
    /// succeeds, the token is expired exactly when it carries an `exp` in the
    /// past. A token with no `exp` at all is never expired.
    pub fn is_expired<C>(&self, token: &str) -> Result<bool, JwtError>
    where
        C: Claims + DeserializeOwned,
    {
        if self.parse::<C>(token).is_ok() {
            return Ok(false);
        }

        let claims: C = self.parse_without_expiry_validation(token)?;
        let now = (self.clock)();
        Ok(matches!(claims.expiration(), Some(exp) if exp <= now))
    }

    /// Return the expiration instant of a currently valid token.
    ///
    /// Runs a full parse, so an expired or otherwise invalid token yields the
    /// corresponding parse error. A valid token without an `exp` claim yields
    /// [`JwtError::NoExpirationSet`].
    pub fn get_expiration<C>(&self, token: &str) -> Result<DateTime<Utc>, JwtError>
    where
        C: Claims + DeserializeOwned,
    {
        let claims: C = self.parse(token)?;
        claims.expiration().ok_or(JwtError::NoExpirationSet)
    }

    fn decode_claims<C>(&self, token: &str, validate_time: bool) -> Result<C, JwtError>
    where
        C: Claims + DeserializeOwned,
    {
        let algorithm = self.peek_algorithm(token)?;

        // Time-bound claims are checked against our own clock below, so all
        // of jsonwebtoken's claim validation is disabled; only the signature
        // is verified here.
        let mut validation = Validation::new(algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        let data =
            decode::<C>(token, &self.decoding_key, &validation).map_err(JwtError::from_decode)?;
        let claims = data.claims;

        if validate_time {
            let now = (self.clock)();
            if let Some(exp) = claims.expiration() {
                if exp <= now {
                    return Err(JwtError::TokenExpired);
                }
            }
            if let Some(nbf) = claims.not_before() {
                if nbf > now {
                    return Err(JwtError::TokenNotYetValid);
                }
            }
        }

        Ok(claims)
    }

    /// Decode the header segment and reject any algorithm outside the HMAC
    /// family before touching the signature. The declared algorithm is
    /// attacker-controlled, so an unexpected value is fatal regardless of
    /// payload or signature content.
    fn peek_algorithm(&self, token: &str) -> Result<Algorithm, JwtError> {
        let header_segment = token.split('.').next().unwrap_or_default();
        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_segment)
            .map_err(|e| JwtError::Malformed(format!("header is not base64url: {e}")))?;
        let header: RawHeader = serde_json::from_slice(&header_bytes)
            .map_err(|e| JwtError::Malformed(format!("header is not valid JSON: {e}")))?;

        hmac_algorithm(&header.alg).ok_or(JwtError::UnexpectedAlgorithm(header.alg))
    }
}
