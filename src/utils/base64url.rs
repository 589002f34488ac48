//! Base64URL encoding/decoding per RFC 4648
//!
//! This module provides a thin wrapper around the `base64` crate (URL-safe
//! alphabet, no padding) with size limit validation for security.

use crate::error::{Error, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Encode bytes to a Base64URL string
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Encode a string to Base64URL
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode a Base64URL segment with a maximum decoded size
///
/// `segment` names the token part in the error when the limit is exceeded.
pub(crate) fn decode_bytes(input: &[u8], max_size: usize, segment: &'static str) -> Result<Vec<u8>> {
    // Reject before allocating: the estimate over-counts by at most two bytes
    let estimate = base64::decoded_len_estimate(input.len());
    if estimate.saturating_sub(2) > max_size {
        return Err(Error::SegmentTooLarge {
            segment,
            size: estimate,
            max: max_size,
        });
    }

    let result = URL_SAFE_NO_PAD.decode(input)?;

    if result.len() > max_size {
        return Err(Error::SegmentTooLarge {
            segment,
            size: result.len(),
            max: max_size,
        });
    }

    Ok(result)
}
