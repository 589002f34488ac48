//! Edge case tests for token framing and decoding
//!
//! Covers malformed framing, broken segments, oversized input and the
//! empty-signature policy.

use jwtgate::*;

use hmac::{Hmac as HmacMac, Mac};
use sha2::Sha256;

fn sign(header: &str, payload: &str, secret: &[u8]) -> String {
    let header_b64 = jwtgate::utils::base64url::encode(header);
    let payload_b64 = jwtgate::utils::base64url::encode(payload);
    let signing_input = format!("{}.{}", header_b64, payload_b64);

    let mut mac = HmacMac::<Sha256>::new_from_slice(secret).unwrap();
    mac.update(signing_input.as_bytes());
    let signature_bytes = mac.finalize().into_bytes();
    let signature_b64 = jwtgate::utils::base64url::encode_bytes(&signature_bytes);

    format!("{}.{}", signing_input, signature_b64)
}

fn create_valid_token() -> String {
    sign(
        r#"{"alg":"HS256","typ":"JWT"}"#,
        r#"{"iss":"test","sub":"user","exp":9999999999}"#,
        b"secret",
    )
}

fn verify_hs256(token: &str) -> Verification {
    let mut alg = jwtgate::Hmac::hs256(b"secret".to_vec());
    let mut claims = Payload::default();
    verify(token, &mut alg, &mut claims, [validate_header()])
}

// ============================================================================
// Token Format Edge Cases
// ============================================================================

#[test]
fn test_empty_token() {
    assert!(matches!(verify_hs256("").error(), Some(Error::Malformed)));
}

#[test]
fn test_single_dot() {
    assert!(matches!(verify_hs256(".").error(), Some(Error::Malformed)));
}

#[test]
fn test_two_parts() {
    assert!(matches!(
        verify_hs256("header.payload").error(),
        Some(Error::Malformed)
    ));
}

#[test]
fn test_four_parts() {
    assert!(matches!(
        verify_hs256("header.payload.signature.extra").error(),
        Some(Error::Malformed)
    ));
}

#[test]
fn test_trailing_dot_after_valid_token() {
    let token = format!("{}.", create_valid_token());
    assert!(matches!(verify_hs256(&token).error(), Some(Error::Malformed)));
}

#[test]
fn test_no_dot_never_parses() {
    let mut alg = jwtgate::Hmac::hs256(b"secret".to_vec());
    for input in ["", "a", "abc", "eyJhbGciOiJIUzI1NiJ9"] {
        assert!(
            matches!(parse_token(input, &mut alg), Err(Error::Malformed)),
            "{input:?}"
        );
    }
}

#[test]
fn test_empty_segments_parse() {
    let mut alg = jwtgate::Hmac::hs256(b"secret".to_vec());
    let token = parse_token("..", &mut alg).unwrap();
    assert!(token.header_segment().is_empty());
    assert!(token.claims_segment().is_empty());
    assert!(token.signature_segment().is_empty());
}

#[test]
fn test_empty_header_fails_to_decode() {
    // Header decodes to zero bytes, which is not JSON
    assert!(matches!(
        verify_hs256("..").error(),
        Some(Error::Json(_))
    ));
}

#[test]
fn test_whitespace_in_token() {
    let token = create_valid_token();
    let with_space = token.replacen('.', " .", 1);
    assert!(matches!(
        verify_hs256(&with_space).error(),
        Some(Error::Base64(_))
    ));
}

// ============================================================================
// Segment Decoding Edge Cases
// ============================================================================

#[test]
fn test_invalid_base64_header() {
    let verification = verify_hs256("!!!.abc.def");
    assert!(matches!(verification.error(), Some(Error::Base64(_))));
    assert!(verification.header().is_none());
}

#[test]
fn test_padded_header_rejected() {
    let header_b64 = format!("{}=", jwtgate::utils::base64url::encode(r#"{"alg":"HS256"}"#));
    let token = format!("{}.e30.", header_b64);
    assert!(matches!(
        verify_hs256(&token).error(),
        Some(Error::Base64(_))
    ));
}

#[test]
fn test_header_not_json_object() {
    let token = format!("{}.e30.", jwtgate::utils::base64url::encode(r#""HS256""#));
    assert!(matches!(verify_hs256(&token).error(), Some(Error::Json(_))));
}

#[test]
fn test_invalid_claims_json_after_valid_signature() {
    let token = sign(r#"{"alg":"HS256"}"#, "not json", b"secret");
    let verification = verify_hs256(&token);

    assert!(matches!(verification.error(), Some(Error::Json(_))));
    assert_eq!(
        verification.header().map(Header::algorithm_str),
        Some("HS256")
    );
}

#[test]
fn test_invalid_claims_base64_fails_at_signature_first() {
    // Claims are not decoded before the signature check
    let header_b64 = jwtgate::utils::base64url::encode(r#"{"alg":"HS256"}"#);
    let token = format!("{}.!!!.{}", header_b64, jwtgate::utils::base64url::encode("sig"));
    assert!(matches!(
        verify_hs256(&token).error(),
        Some(Error::SignatureInvalid)
    ));
}

#[test]
fn test_invalid_signature_base64() {
    let token = create_valid_token();
    let sep = token.rfind('.').unwrap();
    let token = format!("{}.!!!", &token[..sep]);
    assert!(matches!(
        verify_hs256(&token).error(),
        Some(Error::Base64(_))
    ));
}

#[test]
fn test_oversized_header_rejected() {
    let header = format!(r#"{{"alg":"HS256","pad":"{}"}}"#, "x".repeat(10 * 1024));
    let token = format!("{}.e30.", jwtgate::utils::base64url::encode(&header));
    assert!(matches!(
        verify_hs256(&token).error(),
        Some(Error::SegmentTooLarge {
            segment: "header",
            ..
        })
    ));
}

#[test]
fn test_oversized_claims_rejected() {
    let payload = format!(r#"{{"sub":"{}"}}"#, "x".repeat(70 * 1024));
    let token = sign(r#"{"alg":"HS256"}"#, &payload, b"secret");
    assert!(matches!(
        verify_hs256(&token).error(),
        Some(Error::SegmentTooLarge {
            segment: "payload",
            ..
        })
    ));
}

// ============================================================================
// Empty Signature Policy
// ============================================================================

/// Accepts only tokens without a signature
struct Unsecured;

impl Algorithm for Unsecured {
    fn name(&self) -> &str {
        "none"
    }

    fn verify(&self, _signing_input: &[u8], signature: &[u8]) -> Result<()> {
        if signature.is_empty() {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}

#[test]
fn test_empty_signature_rejected_by_hmac() {
    let token = format!(
        "{}.{}.",
        jwtgate::utils::base64url::encode(r#"{"alg":"HS256"}"#),
        jwtgate::utils::base64url::encode(r#"{"sub":"user"}"#),
    );
    assert!(matches!(
        verify_hs256(&token).error(),
        Some(Error::SignatureInvalid)
    ));
}

#[test]
fn test_empty_signature_is_algorithm_policy() {
    let token = format!(
        "{}.{}.",
        jwtgate::utils::base64url::encode(r#"{"alg":"none"}"#),
        jwtgate::utils::base64url::encode(r#"{"sub":"user"}"#),
    );

    let mut alg = Unsecured;
    let mut claims = Payload::default();
    let verification = verify(&token, &mut alg, &mut claims, [validate_header()]);

    assert!(verification.is_ok(), "{:?}", verification.error());
    assert_eq!(claims.subject.as_deref(), Some("user"));
}

// ============================================================================
// Claims Edge Cases
// ============================================================================

#[test]
fn test_claims_into_json_value() {
    let token = sign(
        r#"{"alg":"HS256"}"#,
        r#"{"sub":"user","nested":{"roles":["a","b"]}}"#,
        b"secret",
    );

    let mut alg = jwtgate::Hmac::hs256(b"secret".to_vec());
    let mut claims = serde_json::Value::Null;
    verify(&token, &mut alg, &mut claims, [validate_header()])
        .into_result()
        .unwrap();

    assert_eq!(claims["nested"]["roles"][1], "b");
}

#[test]
fn test_unicode_claims() {
    let token = sign(r#"{"alg":"HS256"}"#, r#"{"sub":"ユーザー🔑"}"#, b"secret");

    let mut alg = jwtgate::Hmac::hs256(b"secret".to_vec());
    let mut claims = Payload::default();
    verify(&token, &mut alg, &mut claims, []).into_result().unwrap();

    assert_eq!(claims.subject.as_deref(), Some("ユーザー🔑"));
}

#[test]
fn test_wrong_claim_type_fails_after_signature() {
    let token = sign(r#"{"alg":"HS256"}"#, r#"{"exp":"never"}"#, b"secret");
    assert!(matches!(verify_hs256(&token).error(), Some(Error::Json(_))));
}
