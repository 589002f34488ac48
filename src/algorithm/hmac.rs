//! HMAC-SHA2 verification (HS256, HS384, HS512)

use crate::algorithm::{Algorithm, Resolver};
use crate::error::{Error, Result};
use crate::token::Header;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac as HmacMac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use std::collections::HashMap;
use std::fmt;

/// Hash function of an HMAC algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HmacHash {
    /// HS256
    Sha256,
    /// HS384
    Sha384,
    /// HS512
    Sha512,
}

impl HmacHash {
    /// Parse an `alg` header value
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "none" => Err(Error::AlgorithmNoneRejected),
            "HS256" => Ok(HmacHash::Sha256),
            "HS384" => Ok(HmacHash::Sha384),
            "HS512" => Ok(HmacHash::Sha512),
            _ => Err(Error::AlgorithmUnsupported(name.into())),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            HmacHash::Sha256 => "HS256",
            HmacHash::Sha384 => "HS384",
            HmacHash::Sha512 => "HS512",
        }
    }
}

impl fmt::Display for HmacHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// HMAC verifier with a fixed shared secret
///
/// Empty signatures never verify: the comparison requires the full MAC length.
#[derive(Clone)]
pub struct Hmac {
    hash: HmacHash,
    secret: Vec<u8>,
}

impl Hmac {
    pub fn new(hash: HmacHash, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            hash,
            secret: secret.into(),
        }
    }

    /// HMAC with SHA-256
    pub fn hs256(secret: impl Into<Vec<u8>>) -> Self {
        Self::new(HmacHash::Sha256, secret)
    }

    /// HMAC with SHA-384
    pub fn hs384(secret: impl Into<Vec<u8>>) -> Self {
        Self::new(HmacHash::Sha384, secret)
    }

    /// HMAC with SHA-512
    pub fn hs512(secret: impl Into<Vec<u8>>) -> Self {
        Self::new(HmacHash::Sha512, secret)
    }

    pub fn hash(&self) -> HmacHash {
        self.hash
    }

    fn compute(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        macro_rules! mac {
            ($digest:ty) => {{
                let mut mac = HmacMac::<$digest>::new_from_slice(&self.secret)
                    .map_err(|_| Error::SignatureInvalid)?;
                mac.update(signing_input);
                mac.finalize().into_bytes().to_vec()
            }};
        }

        Ok(match self.hash {
            HmacHash::Sha256 => mac!(Sha256),
            HmacHash::Sha384 => mac!(Sha384),
            HmacHash::Sha512 => mac!(Sha512),
        })
    }
}

impl fmt::Debug for Hmac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hmac")
            .field("hash", &self.hash)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Algorithm for Hmac {
    fn name(&self) -> &str {
        self.hash.name()
    }

    /// Verify with constant-time comparison
    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()> {
        let expected_signature = self.compute(signing_input)?;

        if signature.len() != expected_signature.len() {
            return Err(Error::SignatureInvalid);
        }

        if constant_time_eq(signature, &expected_signature) {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}

/// HMAC secrets indexed by key ID
///
/// Implements [`Resolver`]: the header's `kid` selects the secret and its
/// `alg` selects the hash. A set holding exactly one key accepts tokens
/// without `kid`. Until a header has been resolved, [`Algorithm::name`] is
/// empty and every verification fails with [`Error::KeyNotResolved`].
#[derive(Clone, Default)]
pub struct HmacKeySet {
    keys: HashMap<String, Vec<u8>>,
    selected: Option<Hmac>,
}

impl HmacKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key, builder style
    pub fn with_key(mut self, kid: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        self.insert(kid, secret);
        self
    }

    pub fn insert(&mut self, kid: impl Into<String>, secret: impl Into<Vec<u8>>) {
        self.keys.insert(kid.into(), secret.into());
    }

    /// The verifier chosen by the last successful resolution
    pub fn selected(&self) -> Option<&Hmac> {
        self.selected.as_ref()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn find_key(&self, kid: Option<&str>) -> Result<&[u8]> {
        match kid {
            Some(kid) => self
                .keys
                .get(kid)
                .map(Vec::as_slice)
                .ok_or_else(|| Error::KeyNotFound(kid.into())),
            None if self.keys.len() == 1 => Ok(self
                .keys
                .values()
                .next()
                .map(Vec::as_slice)
                .unwrap_or_default()),
            None => Err(Error::KeyIdRequired {
                key_count: self.keys.len(),
            }),
        }
    }
}

impl fmt::Debug for HmacKeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacKeySet")
            .field("kids", &self.keys.keys().collect::<Vec<_>>())
            .field("selected", &self.selected)
            .finish()
    }
}

impl Algorithm for HmacKeySet {
    fn name(&self) -> &str {
        self.selected.as_ref().map_or("", |hmac| hmac.name())
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()> {
        self.selected
            .as_ref()
            .ok_or(Error::KeyNotResolved)?
            .verify(signing_input, signature)
    }

    fn as_resolver(&mut self) -> Option<&mut dyn Resolver> {
        Some(self)
    }
}

impl Resolver for HmacKeySet {
    fn resolve(&mut self, header: &Header) -> Result<()> {
        self.selected = None;

        let hash = HmacHash::from_name(header.algorithm_str())?;
        let secret = self.find_key(header.key_id())?.to_vec();

        tracing::debug!(alg = %hash, kid = header.key_id(), "resolved HMAC key");
        self.selected = Some(Hmac::new(hash, secret));
        Ok(())
    }
}
