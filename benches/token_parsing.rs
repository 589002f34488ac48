//! Token parsing performance benchmarks
//!
//! Benchmarks splitting and unverified decoding with different
//! token sizes and structures.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use jwtgate::*;

/// Helper to generate test tokens of different sizes
mod helpers {
    use hmac::{Hmac, Mac};
    use jwtgate::utils::base64url;
    use sha2::Sha256;

    pub fn generate_token_with_payload_size(secret: &[u8], payload_size: usize) -> String {
        let header = r#"{"alg":"HS256","typ":"JWT"}"#;

        // Create payload with specified size
        let mut payload =
            r#"{"sub":"user123","iss":"https://example.com","iat":1516239022,"exp":9999999999"#
                .to_string();
        let extra_size = payload_size.saturating_sub(payload.len());
        if extra_size > 0 {
            payload.push_str(",\"data\":\"");
            payload.push_str(&"x".repeat(extra_size.saturating_sub(10)));
            payload.push_str("\"}");
        } else {
            payload.push('}');
        }

        let header_b64 = base64url::encode(header);
        let payload_b64 = base64url::encode(&payload);
        let signing_input = format!("{}.{}", header_b64, payload_b64);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
        mac.update(signing_input.as_bytes());
        let signature_bytes = mac.finalize().into_bytes();
        let signature_b64 = base64url::encode_bytes(&signature_bytes);

        format!("{}.{}", signing_input, signature_b64)
    }
}

fn bench_split_by_size(c: &mut Criterion) {
    use helpers::generate_token_with_payload_size;

    let secret = b"test-secret-key";
    let sizes = vec![64, 256, 1024, 4096, 16384];

    let mut alg = jwtgate::Hmac::hs256(secret.to_vec());
    let mut group = c.benchmark_group("split_by_size");

    for size in sizes {
        let token = generate_token_with_payload_size(secret, size);
        group.throughput(Throughput::Bytes(token.len() as u64));
        group.bench_function(format!("size_{}", size), |b| {
            b.iter(|| {
                let _ = parse_token(black_box(token.as_str()), &mut alg);
            });
        });
    }

    group.finish();
}

fn bench_decode_stages(c: &mut Criterion) {
    use helpers::generate_token_with_payload_size;

    let secret = b"test-secret-key";
    let token = generate_token_with_payload_size(secret, 256);
    let mut alg = jwtgate::Hmac::hs256(secret.to_vec());

    let mut group = c.benchmark_group("decode_stages");

    // Split, header and claims, no signature
    group.bench_function("danger_decode_unverified", |b| {
        b.iter(|| {
            let mut claims = Payload::default();
            if let Ok(mut raw) = parse_token(black_box(token.as_str()), &mut alg) {
                let _ = raw.danger_decode_unverified(&mut claims);
            }
            claims
        });
    });

    // Into a dynamic value instead of the registered claims
    group.bench_function("danger_decode_json_value", |b| {
        b.iter(|| {
            let mut claims = serde_json::Value::Null;
            if let Ok(mut raw) = parse_token(black_box(token.as_str()), &mut alg) {
                let _ = raw.danger_decode_unverified(&mut claims);
            }
            claims
        });
    });

    group.finish();
}

fn bench_invalid_tokens(c: &mut Criterion) {
    let mut alg = jwtgate::Hmac::hs256(b"secret".to_vec());
    let mut group = c.benchmark_group("parse_invalid");

    // Missing parts
    group.bench_function("missing_parts", |b| {
        let invalid = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        b.iter(|| {
            let _ = parse_token(black_box(invalid), &mut alg);
        });
    });

    // Invalid base64
    group.bench_function("invalid_base64", |b| {
        let invalid = "invalid!.base64.signature";
        b.iter(|| {
            let mut claims = Payload::default();
            if let Ok(mut raw) = parse_token(black_box(invalid), &mut alg) {
                let _ = raw.danger_decode_unverified(&mut claims);
            }
        });
    });

    // Invalid JSON
    group.bench_function("invalid_json", |b| {
        let invalid = "eyJpbnZhbGlkX2pzb24.Invalid.Signature";
        b.iter(|| {
            let mut claims = Payload::default();
            if let Ok(mut raw) = parse_token(black_box(invalid), &mut alg) {
                let _ = raw.danger_decode_unverified(&mut claims);
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_split_by_size,
    bench_decode_stages,
    bench_invalid_tokens
);
criterion_main!(benches);
