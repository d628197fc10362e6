use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read access to the registered JWT claim fields (RFC 7519 §4.1).
///
/// An absent field means "no constraint", never "epoch zero". Concrete claim
/// types usually embed [`BaseClaims`] with `#[serde(flatten)]` and delegate,
/// which keeps service-specific fields alongside the registered ones in the
/// same JSON object.
pub trait Claims {
    fn expiration(&self) -> Option<DateTime<Utc>>;
    fn issued_at(&self) -> Option<DateTime<Utc>>;
    fn not_before(&self) -> Option<DateTime<Utc>>;
    fn issuer(&self) -> Option<&str>;
    fn subject(&self) -> Option<&str>;
    fn audience(&self) -> Option<&Audience>;
    fn id(&self) -> Option<&str>;

    /// Probe for the settable-expiry capability.
    ///
    /// Returning `None` (the default) is not an error: `issue_with_expiry`
    /// signs such claims unchanged. Callers relying on an injected expiration
    /// must use a claims type that returns the mutator here.
    fn settable_expiration(&mut self) -> Option<&mut dyn SetExpiration> {
        None
    }
}

/// Optional capability: claims whose expiration the token manager may
/// overwrite at issuance time.
pub trait SetExpiration {
    fn set_expiration(&mut self, at: DateTime<Utc>);
}

/// The `aud` claim: a single recipient or a list of recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for Audience {
    fn from(value: &str) -> Self {
        Audience::One(value.to_owned())
    }
}

impl From<String> for Audience {
    fn from(value: String) -> Self {
        Audience::One(value)
    }
}

impl From<Vec<String>> for Audience {
    fn from(value: Vec<String>) -> Self {
        Audience::Many(value)
    }
}

/// All seven registered claim fields, each optional and omitted from the
/// payload when unset. Timestamps are stored as Unix seconds, matching the
/// wire format.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseClaims {
    #[serde(rename = "exp", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(rename = "iat", skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    #[serde(rename = "nbf", skip_serializing_if = "Option::is_none")]
    pub not_before: Option<i64>,
    #[serde(rename = "iss", skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(rename = "sub", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(rename = "aud", skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
    #[serde(rename = "jti", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl BaseClaims {
    pub fn set_expiration(&mut self, at: DateTime<Utc>) {
        self.expires_at = Some(at.timestamp());
    }

    pub fn set_issued_at(&mut self, at: DateTime<Utc>) {
        self.issued_at = Some(at.timestamp());
    }

    pub fn set_not_before(&mut self, at: DateTime<Utc>) {
        self.not_before = Some(at.timestamp());
    }

    pub fn set_issuer(&mut self, issuer: impl Into<String>) {
        self.issuer = Some(issuer.into());
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = Some(subject.into());
    }

    pub fn set_audience(&mut self, audience: impl Into<Audience>) {
        self.audience = Some(audience.into());
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }
}

fn instant(secs: Option<i64>) -> Option<DateTime<Utc>> {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
}

impl Claims for BaseClaims {
    fn expiration(&self) -> Option<DateTime<Utc>> {
        instant(self.expires_at)
    }

    fn issued_at(&self) -> Option<DateTime<Utc>> {
        instant(self.issued_at)
    }

    fn not_before(&self) -> Option<DateTime<Utc>> {
        instant(self.not_before)
    }

    fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    fn audience(&self) -> Option<&Audience> {
        self.audience.as_ref()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn settable_expiration(&mut self) -> Option<&mut dyn SetExpiration> {
        Some(self)
    }
}

impl SetExpiration for BaseClaims {
    fn set_expiration(&mut self, at: DateTime<Utc>) {
        self.expires_at = Some(at.timestamp());
    }
}
