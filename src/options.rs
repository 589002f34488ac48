//! Verify options
//!
//! Options run in the order given, after the header has been decoded and
//! resolved and before the signature is checked. The first failing option
//! aborts verification.

use crate::claims::Validator;
use crate::error::{Error, Result};
use crate::token::{Header, RawToken};

use std::fmt;

type OptionFn<'a> = Box<dyn FnOnce(&mut RawToken<'a>) -> Result<()> + 'a>;

/// A single pre-verification step
pub struct VerifyOption<'a>(OptionFn<'a>);

impl<'a> VerifyOption<'a> {
    /// Wrap an arbitrary check
    ///
    /// An option shares the lifetime of the `&mut` algorithm borrow it is
    /// used with, so create it after the algorithm it will run against.
    ///
    /// ```
    /// use jwtgate::{Error, VerifyOption};
    ///
    /// let require_kid = VerifyOption::new(|token| match token.header() {
    ///     Some(header) if header.key_id().is_some() => Ok(()),
    ///     _ => Err(Error::custom("kid required")),
    /// });
    /// # drop(require_kid);
    /// ```
    pub fn new<F>(option: F) -> Self
    where
        F: FnOnce(&mut RawToken<'a>) -> Result<()> + 'a,
    {
        Self(Box::new(option))
    }

    pub(crate) fn apply(self, token: &mut RawToken<'a>) -> Result<()> {
        (self.0)(token)
    }
}

impl fmt::Debug for VerifyOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerifyOption")
    }
}

/// Require the header's `alg` to equal the algorithm's name
///
/// Guards against algorithm confusion: a mismatch fails with
/// [`Error::AlgValidation`] before the signature is looked at.
pub fn validate_header<'a>() -> VerifyOption<'a> {
    VerifyOption::new(|token: &mut RawToken<'a>| {
        let expected = token.algorithm().name();
        let found = token.header().map_or("", Header::algorithm_str);

        if expected == found {
            Ok(())
        } else {
            Err(Error::AlgValidation {
                expected: expected.to_string(),
                found: found.to_string(),
            })
        }
    })
}

/// Attach claim validators
///
/// Validators do not run here: they are stored on the token and run in order
/// once the signature has been verified and the claims decoded.
///
/// ```
/// use jwtgate::{IssuerValidator, SubjectValidator, Validator, validate_payload};
///
/// let option = validate_payload([
///     Box::new(IssuerValidator::new("https://issuer.example")) as Box<dyn Validator>,
///     Box::new(SubjectValidator::new("user123")),
/// ]);
/// # drop(option);
/// ```
pub fn validate_payload<'a, I, V>(validators: I) -> VerifyOption<'a>
where
    I: IntoIterator<Item = V>,
    V: Validator + 'a,
{
    let validators: Vec<Box<dyn Validator + 'a>> = validators
        .into_iter()
        .map(|validator| Box::new(validator) as Box<dyn Validator + 'a>)
        .collect();

    VerifyOption::new(move |token: &mut RawToken<'a>| {
        token.attach_validators(validators);
        Ok(())
    })
}
