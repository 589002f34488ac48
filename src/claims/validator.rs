//! Validators for registered claims
//!
//! A [`Validator`] runs against the decoded [`Payload`] after the signature
//! has been verified. Validators are attached to a verification with
//! [`validate_payload`](crate::validate_payload) and run in the order given.

use crate::claims::{Audience, Payload};
use crate::error::{Error, Result};
use crate::limits::MAX_CLOCK_SKEW_SECONDS;
use std::time::{SystemTime, UNIX_EPOCH};

/// A check over the decoded registered claims
///
/// Implemented for closures, so ad-hoc checks need no dedicated type:
///
/// ```
/// use jwtgate::{Error, Payload, Validator};
///
/// let admin_only = |payload: &Payload| match payload.subject.as_deref() {
///     Some("admin") => Ok(()),
///     _ => Err(Error::custom("admin only")),
/// };
/// assert!(admin_only.validate(&Payload::default()).is_err());
/// ```
pub trait Validator {
    fn validate(&self, payload: &Payload) -> Result<()>;
}

impl<F> Validator for F
where
    F: Fn(&Payload) -> Result<()>,
{
    fn validate(&self, payload: &Payload) -> Result<()> {
        self(payload)
    }
}

impl Validator for Box<dyn Validator + '_> {
    fn validate(&self, payload: &Payload) -> Result<()> {
        (**self).validate(payload)
    }
}

/// Requires `iss` to equal the expected issuer
#[derive(Debug, Clone)]
pub struct IssuerValidator {
    expected: String,
}

impl IssuerValidator {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            expected: issuer.into(),
        }
    }
}

impl Validator for IssuerValidator {
    fn validate(&self, payload: &Payload) -> Result<()> {
        if payload.issuer.as_deref() == Some(self.expected.as_str()) {
            Ok(())
        } else {
            Err(Error::IssuerMismatch {
                expected: self.expected.clone(),
                found: payload.issuer.clone(),
            })
        }
    }
}

/// Requires `sub` to equal the expected subject
#[derive(Debug, Clone)]
pub struct SubjectValidator {
    expected: String,
}

impl SubjectValidator {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            expected: subject.into(),
        }
    }
}

impl Validator for SubjectValidator {
    fn validate(&self, payload: &Payload) -> Result<()> {
        if payload.subject.as_deref() == Some(self.expected.as_str()) {
            Ok(())
        } else {
            Err(Error::SubjectMismatch {
                expected: self.expected.clone(),
                found: payload.subject.clone(),
            })
        }
    }
}

/// Requires `jti` to equal the expected token ID
#[derive(Debug, Clone)]
pub struct JwtIdValidator {
    expected: String,
}

impl JwtIdValidator {
    pub fn new(jwt_id: impl Into<String>) -> Self {
        Self {
            expected: jwt_id.into(),
        }
    }
}

impl Validator for JwtIdValidator {
    fn validate(&self, payload: &Payload) -> Result<()> {
        if payload.jwt_id.as_deref() == Some(self.expected.as_str()) {
            Ok(())
        } else {
            Err(Error::JwtIdMismatch {
                expected: self.expected.clone(),
                found: payload.jwt_id.clone(),
            })
        }
    }
}

/// Requires `aud` to share at least one value with the accepted audience
#[derive(Debug, Clone)]
pub struct AudienceValidator {
    accepted: Audience,
}

impl AudienceValidator {
    pub fn new(accepted: impl Into<Audience>) -> Self {
        Self {
            accepted: accepted.into(),
        }
    }
}

impl Validator for AudienceValidator {
    fn validate(&self, payload: &Payload) -> Result<()> {
        if payload.audience.is_empty() {
            return Err(Error::TokenMissingClaim("aud".into()));
        }
        if self.accepted.intersects(&payload.audience) {
            Ok(())
        } else {
            Err(Error::AudienceMismatch {
                expected: self.accepted.as_slice().to_vec(),
                found: payload.audience.as_slice().to_vec(),
            })
        }
    }
}

/// Requires `exp` to be present and not in the past
///
/// # Security
/// Leeway is limited to 300 seconds. Larger values are rejected during
/// validation rather than silently clamped.
#[derive(Debug, Clone)]
pub struct ExpirationTimeValidator {
    now: i64,
    leeway: u64,
}

impl ExpirationTimeValidator {
    /// Validate against the current system time
    pub fn new() -> Self {
        Self::at(current_timestamp())
    }

    /// Validate against a fixed Unix timestamp
    pub fn at(now: i64) -> Self {
        Self { now, leeway: 0 }
    }

    /// Set clock leeway in seconds
    pub fn leeway(mut self, seconds: u64) -> Self {
        self.leeway = seconds;
        self
    }
}

impl Default for ExpirationTimeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ExpirationTimeValidator {
    fn validate(&self, payload: &Payload) -> Result<()> {
        check_leeway(self.leeway)?;
        let exp = payload
            .expiration
            .ok_or_else(|| Error::TokenMissingClaim("exp".into()))?;

        if self.now > apply_leeway(exp, self.leeway, true)? {
            return Err(Error::TokenExpired {
                expired_at: exp,
                now: self.now,
                leeway: self.leeway,
            });
        }
        Ok(())
    }
}

/// Rejects tokens whose `nbf` lies in the future; a missing `nbf` passes
#[derive(Debug, Clone)]
pub struct NotBeforeValidator {
    now: i64,
    leeway: u64,
}

impl NotBeforeValidator {
    /// Validate against the current system time
    pub fn new() -> Self {
        Self::at(current_timestamp())
    }

    /// Validate against a fixed Unix timestamp
    pub fn at(now: i64) -> Self {
        Self { now, leeway: 0 }
    }

    /// Set clock leeway in seconds
    pub fn leeway(mut self, seconds: u64) -> Self {
        self.leeway = seconds;
        self
    }
}

impl Default for NotBeforeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for NotBeforeValidator {
    fn validate(&self, payload: &Payload) -> Result<()> {
        check_leeway(self.leeway)?;
        if let Some(nbf) = payload.not_before {
            if self.now < apply_leeway(nbf, self.leeway, false)? {
                return Err(Error::TokenNotYetValid {
                    not_before: nbf,
                    now: self.now,
                    leeway: self.leeway,
                });
            }
        }
        Ok(())
    }
}

/// Rejects tokens whose `iat` lies in the future; a missing `iat` passes
#[derive(Debug, Clone)]
pub struct IssuedAtValidator {
    now: i64,
    leeway: u64,
}

impl IssuedAtValidator {
    /// Validate against the current system time
    pub fn new() -> Self {
        Self::at(current_timestamp())
    }

    /// Validate against a fixed Unix timestamp
    pub fn at(now: i64) -> Self {
        Self { now, leeway: 0 }
    }

    /// Set clock leeway in seconds
    pub fn leeway(mut self, seconds: u64) -> Self {
        self.leeway = seconds;
        self
    }
}

impl Default for IssuedAtValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for IssuedAtValidator {
    fn validate(&self, payload: &Payload) -> Result<()> {
        check_leeway(self.leeway)?;
        if let Some(iat) = payload.issued_at {
            if iat > apply_leeway(self.now, self.leeway, true)? {
                return Err(Error::TokenIssuedInFuture {
                    issued_at: iat,
                    now: self.now,
                    leeway: self.leeway,
                });
            }
        }
        Ok(())
    }
}

fn check_leeway(leeway: u64) -> Result<()> {
    if leeway > MAX_CLOCK_SKEW_SECONDS {
        return Err(Error::ClockSkewTooLarge {
            value: leeway,
            max: MAX_CLOCK_SKEW_SECONDS,
        });
    }
    Ok(())
}

/// Apply clock leeway to a timestamp with overflow protection
fn apply_leeway(timestamp: i64, leeway: u64, add: bool) -> Result<i64> {
    let leeway = i64::try_from(leeway).map_err(|_| Error::TimestampOverflow)?;
    if add {
        timestamp.checked_add(leeway)
    } else {
        timestamp.checked_sub(leeway)
    }
    .ok_or(Error::TimestampOverflow)
}

/// Get current Unix timestamp
fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
