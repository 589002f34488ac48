//! # jwtgate - Compact Token Framing and Verification
//!
//! > Zero-copy framing and ordered verification for compact JWS/JWT tokens.
//!
//! **jwtgate** splits a compact token into its three segments, decodes the header, hands
//! signature checking to a pluggable [`Algorithm`], and only then decodes the claims into
//! a caller-chosen type. Key material, signing and transport are left to the caller.
//!
//! ## Overview
//!
//! A compact token is `base64url(header).base64url(claims).base64url(signature)`. The
//! security of verification depends less on any one check than on their order: claims
//! must never be decoded, validated or handed to application code before the signature
//! over the exact `header.claims` bytes has been accepted.
//!
//! **jwtgate** fixes that order in a single pipeline. Parsing records two delimiter offsets
//! and nothing else; every segment stays a borrowed view of the input. The header decodes
//! once, an algorithm that can [`Resolver`] itself from the header (for example by `kid`)
//! does so, caller [options](VerifyOption) run, and the algorithm verifies the signature.
//! Claims decode afterwards and attached [`Validator`]s run last. The caller's claims value
//! is assigned only when all of that succeeded.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jwtgate::*;
//!
//! let mut alg = Hmac::hs256(b"your-256-bit-secret".to_vec());
//! let mut claims = Payload::default();
//!
//! let header = verify(
//!     token_str,
//!     &mut alg,
//!     &mut claims,
//!     [
//!         validate_header(),
//!         validate_payload([
//!             Box::new(IssuerValidator::new("https://trusted.com")) as Box<dyn Validator>,
//!             Box::new(ExpirationTimeValidator::new().leeway(30)),
//!         ]),
//!     ],
//! )
//! .into_result()?;
//!
//! println!("kid: {:?}, subject: {:?}", header.key_id(), claims.subject);
//! ```
//!
//! ## Verification Flow
//!
//! ```text
//! RawToken::parse        split on '.'                 Malformed
//!     │ decode header    base64url + JSON              Base64 / Json / SegmentTooLarge
//!     │ resolve          Algorithm::as_resolver()      resolver error
//!     │ options          validate_header(), ...        AlgValidation / option error
//!     │ signature        Algorithm::verify()           algorithm error
//!     │ claims           base64url + JSON into C       Base64 / Json / SegmentTooLarge
//!     ▼ validators       validate_payload(...)         validator error
//! claims written back
//! ```
//!
//! [`verify`] runs the whole flow and returns a [`Verification`] holding the decoded header
//! even when a later step failed. [`RawToken::verify`] runs it on an already parsed token.
//!
//! ## Algorithms
//!
//! Anything implementing [`Algorithm`] can verify signatures. The crate ships HMAC-SHA2:
//!
//! - [`Hmac`]: one secret, one hash (HS256, HS384, HS512)
//! - [`HmacKeySet`]: secrets by `kid`; the hash follows the header's `alg`
//!
//! An empty signature segment is passed to the algorithm as an empty slice. Whether that
//! is acceptable is the algorithm's decision; both HMAC verifiers reject it.
//!
//! ## Claims
//!
//! Claims decode into any `serde::de::DeserializeOwned` type. [`Payload`] holds the
//! registered claims and is meant to be embedded with `#[serde(flatten)]`. `aud` may be a
//! string or an array; both decode to the same [`Audience`].
//!
//! ## Security
//!
//! ### Algorithm Confusion Prevention
//!
//! Include [`validate_header()`] so a token declaring a different `alg` than the configured
//! algorithm is rejected before its signature is examined. [`HmacKeySet`] rejects `"none"`
//! and non-HMAC algorithms while resolving.
//!
//! ### Size Limits
//!
//! Decoded segments are bounded (header 8 KiB, claims 64 KiB, signature 1 KiB) and oversized
//! input is rejected before any buffer is allocated.
//!
//! ### Unverified Decoding
//!
//! [`RawToken::danger_decode_unverified`] skips every check. Only use it on tokens that
//! were verified elsewhere.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515): JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519): JSON Web Token (JWT)
//! - [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725): JSON Web Signature Best Practices

// Core modules
pub mod error;
mod limits;
pub mod utils;

// Algorithm system
pub mod algorithm;

// Claims and validation
pub mod claims;

// Token framing
pub mod token;

// Pipeline
mod options;
mod verify;

// ============================================================================
// PUBLIC API
// ============================================================================

// Verification flow
pub use options::{VerifyOption, validate_header, validate_payload};
pub use token::{RawToken, Stage, parse_token};
pub use verify::{Verification, verify};

// Collaborator traits and bundled algorithms
pub use algorithm::{Algorithm, Hmac, HmacHash, HmacKeySet, Resolver};

// Claims
pub use claims::{
    Audience, AudienceValidator, ExpirationTimeValidator, IssuedAtValidator, IssuerValidator,
    JwtIdValidator, NotBeforeValidator, Payload, SubjectValidator, Validator,
};

// Supporting types
pub use error::{BoxError, Error, Result};
pub use token::Header;
