//! Common test utilities for paddle-webhooks integration tests
//!
//! This module provides:
//! - A signer standing in for Paddle, using the fixture key pair
//! - Builders for signed form-encoded deliveries

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use paddle_webhooks::{
    php_serialize, WebhookRequest, WebhookValidator, FORM_CONTENT_TYPE, SIGNATURE_FIELD,
};
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha1::{Digest, Sha1};
use std::sync::OnceLock;

// Test keys (2048-bit RSA key for testing only - DO NOT USE IN PRODUCTION)
pub const TEST_PRIVATE_KEY_PEM: &str =
    include_str!("../../../paddle-webhooks/tests/fixtures/test_private_key.pem");
pub const TEST_PUBLIC_KEY_PEM: &str =
    include_str!("../../../paddle-webhooks/tests/fixtures/test_public_key.pem");

fn private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::from_pkcs8_pem(TEST_PRIVATE_KEY_PEM).expect("Test key should be valid")
    })
}

/// Validator trusting the fixture public key
#[allow(dead_code)]
pub fn validator() -> WebhookValidator {
    WebhookValidator::from_pem(TEST_PUBLIC_KEY_PEM).expect("Test key should be valid")
}

/// Sign fields the way Paddle does and return the base64 `p_signature`
pub fn sign(fields: &[(&str, &str)]) -> String {
    let digest = Sha1::digest(php_serialize(fields.iter().copied()));
    let signature = private_key()
        .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
        .expect("Signing should succeed");
    STANDARD.encode(signature)
}

/// Form-encode fields followed by the given `p_signature`
pub fn form_body(fields: &[(&str, &str)], signature: &str) -> Bytes {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        serializer.append_pair(key, value);
    }
    serializer.append_pair(SIGNATURE_FIELD, signature);
    Bytes::from(serializer.finish())
}

/// A correctly signed, form-encoded delivery
#[allow(dead_code)]
pub fn signed_request(fields: &[(&str, &str)]) -> WebhookRequest {
    WebhookRequest::new(FORM_CONTENT_TYPE, form_body(fields, &sign(fields)))
}

/// A delivery whose fields were changed after signing
#[allow(dead_code)]
pub fn tampered_request(signed: &[(&str, &str)], delivered: &[(&str, &str)]) -> WebhookRequest {
    WebhookRequest::new(FORM_CONTENT_TYPE, form_body(delivered, &sign(signed)))
}
