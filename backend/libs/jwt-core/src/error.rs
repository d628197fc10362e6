use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Errors produced while issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum JwtError {
    /// The claims could not be serialized or the signing operation failed.
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// The token header declares an algorithm outside the HMAC family.
    /// Always fatal to trust: the declared algorithm is attacker-controlled.
    #[error("unexpected signing algorithm: {0}")]
    UnexpectedAlgorithm(String),

    /// The recomputed signature does not match the one on the token.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// The `exp` claim is in the past.
    #[error("token is expired")]
    TokenExpired,

    /// The `nbf` claim is in the future.
    #[error("token is not yet valid")]
    TokenNotYetValid,

    /// An expiration was requested but the token carries no `exp` claim.
    #[error("token has no expiration set")]
    NoExpirationSet,

    /// The token is not a decodable compact JWT (bad segments, base64 or JSON).
    #[error("malformed token: {0}")]
    Malformed(String),
}

impl JwtError {
    /// Map a `jsonwebtoken` decode failure onto our error kinds.
    pub(crate) fn from_decode(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            _ => JwtError::Malformed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn signing_error_chains_its_cause() {
        let raw = jsonwebtoken::errors::Error::from(ErrorKind::InvalidToken);
        let err = JwtError::Signing(raw);

        let source = err.source().expect("signing error should expose a cause");
        assert!(source.downcast_ref::<jsonwebtoken::errors::Error>().is_some());
    }

    #[test]
    fn terminal_kinds_have_no_cause() {
        assert!(JwtError::InvalidSignature.source().is_none());
        assert!(JwtError::TokenExpired.source().is_none());
    }
}
