//! Verification pipeline
//!
//! ```text
//! Split ─► HeaderDecoded ─► Resolved ─► OptionsRun ─► SignatureVerified ─► ClaimsDecoded ─► ClaimsValidated
//! ```
//!
//! Each transition either succeeds or ends verification with its error. Claims
//! are decoded only after the algorithm has accepted the signature, and the
//! caller's claims value is written only after every validator has passed.

use crate::algorithm::Algorithm;
use crate::claims::Payload;
use crate::error::{Error, Result};
use crate::options::VerifyOption;
use crate::token::{Header, RawToken, Stage};

use serde::de::DeserializeOwned;

impl<'a> RawToken<'a> {
    /// Run the full verification pipeline
    ///
    /// 1. decode the header
    /// 2. let a [`Resolver`](crate::Resolver) configure the algorithm
    /// 3. run `options` in order
    /// 4. verify the signature over the raw `header.claims` bytes
    /// 5. decode the claims
    /// 6. run validators attached by [`validate_payload`](crate::validate_payload)
    ///
    /// `claims` is left untouched unless every step succeeds. The decoded
    /// header stays available through [`RawToken::header`] on failure.
    ///
    /// Each call runs only the validators attached by its own `options`.
    ///
    /// When validators are attached, the claims segment is JSON-decoded twice:
    /// once into `C` and once into the [`Payload`] the validators inspect.
    /// Callers verifying into `Payload` on a hot path and needing only
    /// registered-claim checks can instead decode with no validators and call
    /// [`Validator::validate`](crate::Validator::validate) on the result.
    pub fn verify<C, I>(&mut self, claims: &mut C, options: I) -> Result<()>
    where
        C: DeserializeOwned,
        I: IntoIterator<Item = VerifyOption<'a>>,
    {
        let result = self.run(claims, options);
        if result.is_err() {
            tracing::debug!(stage = %self.stage(), "token verification failed");
        }
        result
    }

    fn run<C, I>(&mut self, claims: &mut C, options: I) -> Result<()>
    where
        C: DeserializeOwned,
        I: IntoIterator<Item = VerifyOption<'a>>,
    {
        self.decode_header()?;
        self.resolve()?;

        self.clear_validators();
        for option in options {
            option.apply(self)?;
        }
        self.advance(Stage::OptionsRun);

        self.verify_signature()?;
        self.advance(Stage::SignatureVerified);

        let bytes = self.decode_claims_bytes()?;
        let decoded: C = serde_json::from_slice(&bytes)?;
        self.advance(Stage::ClaimsDecoded);

        if self.has_validators() {
            let payload: Payload = serde_json::from_slice(&bytes)?;
            self.run_validators(&payload)?;
            self.advance(Stage::ClaimsValidated);
        }

        *claims = decoded;
        Ok(())
    }
}

/// Outcome of [`verify`]
///
/// Carries the decoded header alongside the result, so a failed verification
/// can still be logged with its `alg` and `kid`. The header is `None` only
/// when the token could not be split or its header could not be decoded.
#[derive(Debug)]
pub struct Verification {
    header: Option<Header>,
    result: Result<()>,
}

impl Verification {
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn error(&self) -> Option<&Error> {
        self.result.as_ref().err()
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The header on success, the error otherwise
    pub fn into_result(self) -> Result<Header> {
        self.result?;
        self.header.ok_or(Error::Malformed)
    }

    pub fn into_parts(self) -> (Option<Header>, Result<()>) {
        (self.header, self.result)
    }
}

/// Parse and verify a token in one call
///
/// # Example
/// ```
/// use jwtgate::{Hmac, Payload, utils::base64url, validate_header, verify};
/// # use hmac::{Hmac as HmacMac, Mac};
/// # let signing_input = format!(
/// #     "{}.{}",
/// #     base64url::encode(r#"{"alg":"HS256"}"#),
/// #     base64url::encode(r#"{"sub":"user123"}"#),
/// # );
/// # let mut mac = HmacMac::<sha2::Sha256>::new_from_slice(b"secret").unwrap();
/// # mac.update(signing_input.as_bytes());
/// # let token = format!("{signing_input}.{}", base64url::encode_bytes(&mac.finalize().into_bytes()));
///
/// let mut alg = Hmac::hs256(b"secret".to_vec());
/// let mut claims = Payload::default();
///
/// let header = verify(&token, &mut alg, &mut claims, [validate_header()]).into_result()?;
/// assert_eq!(header.algorithm_str(), "HS256");
/// assert_eq!(claims.subject.as_deref(), Some("user123"));
/// # Ok::<(), jwtgate::Error>(())
/// ```
pub fn verify<'a, T, C, I>(
    token: &'a T,
    alg: &'a mut dyn Algorithm,
    claims: &mut C,
    options: I,
) -> Verification
where
    T: AsRef<[u8]> + ?Sized,
    C: DeserializeOwned,
    I: IntoIterator<Item = VerifyOption<'a>>,
{
    let mut raw = match RawToken::parse(token, alg) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::debug!(stage = "split", "token verification failed");
            return Verification {
                header: None,
                result: Err(err),
            };
        }
    };

    let result = raw.verify(claims, options);
    Verification {
        header: raw.take_header(),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Hmac;
    use crate::utils::base64url;

    #[test]
    fn test_malformed_has_no_header() {
        let mut alg = Hmac::hs256(b"secret".to_vec());
        let mut claims = Payload::default();
        let verification = verify("no-dots", &mut alg, &mut claims, []);

        assert!(verification.header().is_none());
        assert!(matches!(verification.error(), Some(Error::Malformed)));
    }

    #[test]
    fn test_header_kept_on_signature_failure() {
        let token = format!(
            "{}.{}.{}",
            base64url::encode(r#"{"alg":"HS256","kid":"k1"}"#),
            base64url::encode(r#"{"sub":"user"}"#),
            base64url::encode("bad")
        );
        let mut alg = Hmac::hs256(b"secret".to_vec());
        let mut claims = Payload::default();
        let (header, result) = verify(&token, &mut alg, &mut claims, []).into_parts();

        assert_eq!(header.unwrap().key_id(), Some("k1"));
        assert!(matches!(result, Err(Error::SignatureInvalid)));
        assert_eq!(claims, Payload::default());
    }

    #[test]
    fn test_signature_too_large() {
        let token = format!(
            "{}.e30.{}",
            base64url::encode(r#"{"alg":"HS256"}"#),
            base64url::encode_bytes(&[0u8; 2048])
        );
        let mut alg = Hmac::hs256(b"secret".to_vec());
        let mut claims = Payload::default();
        let verification = verify(&token, &mut alg, &mut claims, []);

        assert!(matches!(
            verification.error(),
            Some(Error::SegmentTooLarge {
                segment: "signature",
                ..
            })
        ));
    }
}
