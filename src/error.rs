//! Error types for token framing, decoding and verification
//!
//! Every failure in the pipeline is reported through [`Error`]. Errors coming
//! from collaborators (an [`Algorithm`](crate::Algorithm), a
//! [`Resolver`](crate::Resolver) or a [`Validator`](crate::Validator)) are
//! returned to the caller exactly as the collaborator produced them.

use thiserror::Error;

/// Boxed error type for collaborator-specific failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// jwtgate Errors
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Malformed token: expected three parts separated by '.'")]
    Malformed,

    #[error("Base64URL decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Decoded {segment} too large: {size} bytes (maximum: {max} bytes)")]
    SegmentTooLarge {
        segment: &'static str,
        size: usize,
        max: usize,
    },

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("\"alg\" field mismatch: expected '{expected}', found '{found}'")]
    AlgValidation { expected: String, found: String },

    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("The 'none' algorithm is rejected for security reasons (RFC 8725)")]
    AlgorithmNoneRejected,

    // ============================================================================
    // Key Errors
    // ============================================================================
    #[error("Key ID (kid) required: key set contains {key_count} keys")]
    KeyIdRequired { key_count: usize },

    #[error("No verification key found for kid '{0}'")]
    KeyNotFound(String),

    #[error("Verification key has not been resolved from a token header")]
    KeyNotResolved,

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Token issuer mismatch: expected '{expected}', found {found:?}")]
    IssuerMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("Token subject mismatch: expected '{expected}', found {found:?}")]
    SubjectMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("Token audience mismatch: expected one of {expected:?}, found {found:?}")]
    AudienceMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Token ID mismatch: expected '{expected}', found {found:?}")]
    JwtIdMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("Required token claim '{0}' is missing")]
    TokenMissingClaim(String),

    #[error("Token expired at {expired_at} (now: {now}, leeway: {leeway}s)")]
    TokenExpired {
        expired_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Token not valid until {not_before} (now: {now}, leeway: {leeway}s)")]
    TokenNotYetValid {
        not_before: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Token issued in future at {issued_at} (now: {now}, leeway: {leeway}s)")]
    TokenIssuedInFuture {
        issued_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Clock leeway too large: {value} seconds (maximum: {max} seconds)")]
    ClockSkewTooLarge { value: u64, max: u64 },

    #[error("Integer overflow in timestamp arithmetic")]
    TimestampOverflow,

    // ============================================================================
    // Collaborator Errors
    // ============================================================================
    #[error("{0}")]
    Custom(#[source] BoxError),
}

impl Error {
    /// Wrap a collaborator-specific error
    ///
    /// Algorithms, resolvers and validators use this for failures that have no
    /// dedicated variant. The wrapped error is kept as the source.
    pub fn custom<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Custom(error.into())
    }

    /// Whether the error came from decoding a segment (Base64URL, JSON or size)
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Error::Base64(_) | Error::Json(_) | Error::SegmentTooLarge { .. }
        )
    }
}

/// Result type alias for jwtgate operations
pub type Result<T> = std::result::Result<T, Error>;
