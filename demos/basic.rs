//! Basic example demonstrating the verification pipeline
//!
//! This example walks through the `verify` entry point:
//! 1. Split the token and pick the algorithm to verify with
//! 2. Guard the header algorithm with `validate_header`
//! 3. Register claim validators with `validate_payload`
//! 4. Read the decoded header and claims back from the `Verification`
//!
//! Run with `RUST_LOG=jwtgate=trace` to see every pipeline stage.

use jwtgate::*;

use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Deserialize)]
struct AppClaims {
    #[serde(flatten)]
    registered: Payload,
    #[serde(default)]
    role: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwtgate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== jwtgate - Basic Example ===\n");

    // In a real application, you would receive this token from a client
    let secret = b"your-256-bit-secret-key-here!";
    let token_string = create_sample_token(r#"{"alg":"HS256","typ":"JWT"}"#, secret);
    println!("Token: {}\n", token_string);

    // Fixed algorithm: the caller decides HS256, the header must agree
    println!("Step 1: Verifying with a fixed HS256 key...");
    let mut alg = Hmac::hs256(secret.to_vec());
    let mut claims = AppClaims::default();

    let header = verify(
        &token_string,
        &mut alg,
        &mut claims,
        [
            validate_header(),
            validate_payload([
                Box::new(IssuerValidator::new("https://example.com")) as Box<dyn Validator>,
                Box::new(AudienceValidator::new("my-app")),
                Box::new(ExpirationTimeValidator::new().leeway(60)),
                Box::new(|payload: &Payload| -> Result<()> {
                    println!("  → Custom check on subject {:?}", payload.subject);
                    Ok(())
                }),
            ]),
        ],
    )
    .into_result()?;

    println!("  ✓ Algorithm: {}", header.algorithm_str());
    println!("  ✓ Signature verified");
    println!("  ✓ Claims validated\n");

    println!("=== Verified Token Data ===");
    println!("Issuer: {:?}", claims.registered.issuer);
    println!("Subject: {:?}", claims.registered.subject);
    println!("Audience: {:?}", claims.registered.audience.as_slice());
    println!("Expires at: {:?}", claims.registered.expiration);
    println!("Role: {}\n", claims.role);

    // A failing verification still reports the decoded header
    println!("Step 2: Verifying with the wrong secret...");
    let mut wrong = Hmac::hs256(b"not-the-secret".to_vec());
    let mut rejected = AppClaims::default();
    let verification = verify(&token_string, &mut wrong, &mut rejected, [validate_header()]);

    if let Some(err) = verification.error() {
        println!("  ✗ Rejected: {}", err);
    }
    println!(
        "  ✓ Header still available: typ={:?}",
        verification.header().and_then(|h| h.token_type.as_deref())
    );
    println!("  ✓ Claims untouched: {:?}\n", rejected.registered.subject);

    // Key set: the header's kid and alg pick the key and hash
    println!("Step 3: Verifying through a key set...");
    let rotated = create_sample_token(r#"{"alg":"HS256","typ":"JWT","kid":"2024-06"}"#, b"current");
    let mut keys = HmacKeySet::new()
        .with_key("2024-01", b"previous".to_vec())
        .with_key("2024-06", b"current".to_vec());
    let mut claims = AppClaims::default();

    let header = verify(&rotated, &mut keys, &mut claims, [validate_header()]).into_result()?;
    println!("  ✓ Resolved key: {:?}", header.key_id());
    println!("  ✓ Role: {}", claims.role);

    println!("\n✅ Done!");

    Ok(())
}

/// Helper function to create a sample HS256 token
fn create_sample_token(header: &str, secret: &[u8]) -> String {
    use hmac::{Hmac as HmacMac, Mac};
    use sha2::Sha256;

    // Create a token that expires in 1 hour
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let payload = format!(
        r#"{{"iss":"https://example.com","sub":"user123","aud":"my-app","exp":{},"iat":{},"role":"admin"}}"#,
        now + 3600,
        now
    );

    let header_b64 = jwtgate::utils::base64url::encode(header);
    let payload_b64 = jwtgate::utils::base64url::encode(&payload);
    let signing_input = format!("{}.{}", header_b64, payload_b64);

    let mut mac = HmacMac::<Sha256>::new_from_slice(secret).unwrap();
    mac.update(signing_input.as_bytes());
    let signature = jwtgate::utils::base64url::encode_bytes(&mac.finalize().into_bytes());

    format!("{}.{}", signing_input, signature)
}
