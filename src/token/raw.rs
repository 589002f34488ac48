use crate::algorithm::Algorithm;
use crate::claims::{Payload, Validator};
use crate::error::{Error, Result};
use crate::limits::{MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE};
use crate::token::Header;
use crate::utils::base64url;

use serde::de::DeserializeOwned;
use std::fmt;

/// Progress of a token through the verification pipeline
///
/// Ordered as the pipeline runs. Verifying the same token again restarts
/// from [`Stage::OptionsRun`]; header decoding and resolution never repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Segment boundaries located
    Split,
    /// Header segment decoded
    HeaderDecoded,
    /// Resolver capability ran (or was absent)
    Resolved,
    /// All verify options passed
    OptionsRun,
    /// Algorithm accepted the signature
    SignatureVerified,
    /// Claims segment decoded
    ClaimsDecoded,
    /// Attached validators passed
    ClaimsValidated,
}

impl Stage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Stage::Split => "split",
            Stage::HeaderDecoded => "header_decoded",
            Stage::Resolved => "resolved",
            Stage::OptionsRun => "options_run",
            Stage::SignatureVerified => "signature_verified",
            Stage::ClaimsDecoded => "claims_decoded",
            Stage::ClaimsValidated => "claims_validated",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compact token split into its three segments
///
/// Created by [`RawToken::parse`]. Only the segment boundaries are known at
/// this point: nothing has been decoded and nothing is trusted. The token
/// borrows both the input buffer and the caller's [`Algorithm`] for `'a`.
///
/// Segments are zero-copy views into the original input:
///
/// ```text
/// header . claims . signature
///        ^        ^
///      sep1    sep1 + 1 + sep2
/// ```
pub struct RawToken<'a> {
    token: &'a [u8],
    sep1: usize,
    sep2: usize,
    alg: &'a mut dyn Algorithm,
    header: Option<Header>,
    validators: Vec<Box<dyn Validator + 'a>>,
    stage: Stage,
}

impl<'a> RawToken<'a> {
    /// Locate the segment boundaries of a compact token
    ///
    /// Fails with [`Error::Malformed`] unless the input has exactly two `.`
    /// delimiters. The signature segment may be empty.
    ///
    /// # Example
    /// ```
    /// use jwtgate::{Hmac, RawToken};
    ///
    /// let mut alg = Hmac::hs256(b"secret".to_vec());
    /// let token = RawToken::parse("aGVhZGVy.Y2xhaW1z.c2ln", &mut alg).unwrap();
    /// assert_eq!(token.header_segment(), b"aGVhZGVy");
    /// assert_eq!(token.signing_input(), b"aGVhZGVy.Y2xhaW1z");
    /// ```
    pub fn parse<T>(token: &'a T, alg: &'a mut dyn Algorithm) -> Result<Self>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let token = token.as_ref();

        let sep1 = find_dot(token).ok_or(Error::Malformed)?;
        let claims_and_signature = &token[sep1 + 1..];
        let sep2 = find_dot(claims_and_signature).ok_or(Error::Malformed)?;

        if find_dot(&claims_and_signature[sep2 + 1..]).is_some() {
            return Err(Error::Malformed);
        }

        tracing::trace!(len = token.len(), sep1, sep2, "token split");

        Ok(Self {
            token,
            sep1,
            sep2,
            alg,
            header: None,
            validators: Vec::new(),
            stage: Stage::Split,
        })
    }

    /// The raw token bytes
    pub fn as_bytes(&self) -> &'a [u8] {
        self.token
    }

    /// First delimiter offset, absolute
    pub fn sep1(&self) -> usize {
        self.sep1
    }

    /// Second delimiter offset, relative to the start of the claims segment
    pub fn sep2(&self) -> usize {
        self.sep2
    }

    /// Encoded header segment
    pub fn header_segment(&self) -> &'a [u8] {
        &self.token[..self.sep1]
    }

    /// Encoded claims segment
    pub fn claims_segment(&self) -> &'a [u8] {
        let start = self.sep1 + 1;
        &self.token[start..start + self.sep2]
    }

    /// Encoded signature segment, possibly empty
    pub fn signature_segment(&self) -> &'a [u8] {
        &self.token[self.sep1 + 1 + self.sep2 + 1..]
    }

    /// The exact bytes the signature covers: `header.claims`
    pub fn signing_input(&self) -> &'a [u8] {
        &self.token[..self.sep1 + 1 + self.sep2]
    }

    /// Decoded header, once the pipeline has reached [`Stage::HeaderDecoded`]
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub(crate) fn take_header(&mut self) -> Option<Header> {
        self.header.take()
    }

    pub fn algorithm(&self) -> &dyn Algorithm {
        &*self.alg
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether validators are waiting to run against the claims
    pub fn has_validators(&self) -> bool {
        !self.validators.is_empty()
    }

    /// Decode claims without verifying the signature
    ///
    /// Decodes the header, lets a [`Resolver`](crate::Resolver) see it, then
    /// decodes the claims segment into `claims`. No option, signature check
    /// or validator runs.
    ///
    /// # Security
    ///
    /// The result is attacker-controlled for any token that has not already
    /// been verified by other means. Never use this on untrusted input.
    pub fn danger_decode_unverified<C>(&mut self, claims: &mut C) -> Result<()>
    where
        C: DeserializeOwned,
    {
        self.decode_header()?;
        self.resolve()?;

        let bytes = self.decode_claims_bytes()?;
        *claims = serde_json::from_slice(&bytes)?;
        Ok(())
    }

    pub(crate) fn advance(&mut self, stage: Stage) {
        tracing::trace!(from = %self.stage, to = %stage, "token stage");
        self.stage = stage;
    }

    /// Decode the header segment; no-op once decoded
    pub(crate) fn decode_header(&mut self) -> Result<()> {
        if self.header.is_some() {
            return Ok(());
        }

        let bytes = base64url::decode_bytes(
            self.header_segment(),
            MAX_DECODED_HEADER_SIZE,
            "header",
        )?;
        self.header = Some(serde_json::from_slice(&bytes)?);
        self.advance(Stage::HeaderDecoded);
        Ok(())
    }

    /// Hand the decoded header to the algorithm's resolver; runs at most once
    ///
    /// Decodes the header first if that has not happened yet.
    pub(crate) fn resolve(&mut self) -> Result<()> {
        if self.stage >= Stage::Resolved {
            return Ok(());
        }

        self.decode_header()?;
        if let (Some(header), Some(resolver)) = (self.header.as_ref(), self.alg.as_resolver()) {
            resolver.resolve(header)?;
        }
        self.advance(Stage::Resolved);
        Ok(())
    }

    pub(crate) fn verify_signature(&self) -> Result<()> {
        let signature = base64url::decode_bytes(
            self.signature_segment(),
            MAX_DECODED_SIGNATURE_SIZE,
            "signature",
        )?;
        self.alg.verify(self.signing_input(), &signature)
    }

    pub(crate) fn decode_claims_bytes(&self) -> Result<Vec<u8>> {
        base64url::decode_bytes(self.claims_segment(), MAX_DECODED_PAYLOAD_SIZE, "payload")
    }

    /// Drop validators attached by an earlier, unfinished run
    pub(crate) fn clear_validators(&mut self) {
        self.validators.clear();
    }

    pub(crate) fn attach_validators(&mut self, validators: Vec<Box<dyn Validator + 'a>>) {
        self.validators.extend(validators);
    }

    /// Run attached validators in order, consuming them
    pub(crate) fn run_validators(&mut self, payload: &Payload) -> Result<()> {
        for validator in std::mem::take(&mut self.validators) {
            validator.validate(payload)?;
        }
        Ok(())
    }
}

impl fmt::Debug for RawToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawToken")
            .field("len", &self.token.len())
            .field("sep1", &self.sep1)
            .field("sep2", &self.sep2)
            .field("algorithm", &self.alg.name())
            .field("header", &self.header)
            .field("validators", &self.validators.len())
            .field("stage", &self.stage)
            .finish()
    }
}

/// Parse a compact token, see [`RawToken::parse`]
pub fn parse_token<'a, T>(token: &'a T, alg: &'a mut dyn Algorithm) -> Result<RawToken<'a>>
where
    T: AsRef<[u8]> + ?Sized,
{
    RawToken::parse(token, alg)
}

fn find_dot(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|&b| b == b'.')
}
