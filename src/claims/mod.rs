mod audience;
mod validator;

pub use audience::Audience;
pub use validator::{
    AudienceValidator, ExpirationTimeValidator, IssuedAtValidator, IssuerValidator,
    JwtIdValidator, NotBeforeValidator, SubjectValidator, Validator,
};

use serde::{Deserialize, Serialize};

/// Registered JWT claims as defined in RFC 7519 Section 4.1
///
/// Every claim is optional and omitted from the encoded form when empty.
/// Custom claim types usually embed `Payload` with `#[serde(flatten)]`:
///
/// ```
/// use jwtgate::Payload;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct SessionClaims {
///     #[serde(flatten)]
///     registered: Payload,
///     role: Option<String>,
/// }
///
/// let claims: SessionClaims =
///     serde_json::from_str(r#"{"sub":"user123","role":"admin"}"#).unwrap();
/// assert_eq!(claims.registered.subject.as_deref(), Some("user123"));
/// assert_eq!(claims.role.as_deref(), Some("admin"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Issuer (iss) - identifies the principal that issued the JWT
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Subject (sub) - identifies the principal that is the subject of the JWT
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Audience (aud) - identifies the recipients that the JWT is intended for
    #[serde(rename = "aud", default, skip_serializing_if = "Audience::is_empty")]
    pub audience: Audience,

    /// Expiration Time (exp) - seconds since Unix epoch
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,

    /// Not Before (nbf) - the time before which the JWT MUST NOT be accepted
    #[serde(rename = "nbf", default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<i64>,

    /// Issued At (iat) - the time at which the JWT was issued
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,

    /// JWT ID (jti) - provides a unique identifier for the JWT
    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub jwt_id: Option<String>,
}
