//! Tests for RSA-SHA1 signature verification.

use super::*;
use crate::php_serialize::php_serialize;
use base64::Engine as _;
use proptest::prelude::*;
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;

// Test keys (2048-bit RSA key for testing only - DO NOT USE IN PRODUCTION)
const TEST_PRIVATE_KEY_PEM: &str = include_str!("../tests/fixtures/test_private_key.pem");
const TEST_PUBLIC_KEY_PEM: &str = include_str!("../tests/fixtures/test_public_key.pem");
const TEST_PUBLIC_KEY_PKCS1_PEM: &str = include_str!("../tests/fixtures/test_public_key_pkcs1.pem");
const EC_PUBLIC_KEY_PEM: &str = include_str!("../tests/fixtures/ec_public_key.pem");

// Serialized payloads and the signatures openssl produced over them
const SUBSCRIPTION_CREATED_PHP: &[u8] =
    include_bytes!("../tests/fixtures/subscription_created.php");
const SUBSCRIPTION_CREATED_SIG: &str = include_str!("../tests/fixtures/subscription_created.sig");
const MULTIBYTE_PHP: &[u8] = include_bytes!("../tests/fixtures/payment_succeeded_multibyte.php");
const MULTIBYTE_SIG: &str = include_str!("../tests/fixtures/payment_succeeded_multibyte.sig");

fn test_public_key() -> PublicKey {
    PublicKey::from_pem(TEST_PUBLIC_KEY_PEM).expect("Test key should be valid")
}

/// Sign the payload the way Paddle does: SHA-1 digest, PKCS#1 v1.5, base64.
fn sign(serialized: &[u8]) -> String {
    let private_key =
        RsaPrivateKey::from_pkcs8_pem(TEST_PRIVATE_KEY_PEM).expect("Test key should be valid");
    let digest = Sha1::digest(serialized);
    let signature = private_key
        .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
        .expect("Signing should succeed");
    STANDARD.encode(signature)
}

// ============================================================================
// Public key parsing
// ============================================================================

mod public_key_tests {
    use super::*;

    #[test]
    fn test_parses_spki_pem() {
        let key = PublicKey::from_pem(TEST_PUBLIC_KEY_PEM).expect("SPKI key should parse");
        assert_eq!(key.bits(), 2048);
    }

    #[test]
    fn test_parses_pkcs1_pem() {
        let key = PublicKey::from_pem(TEST_PUBLIC_KEY_PKCS1_PEM).expect("PKCS#1 key should parse");
        assert_eq!(key.bits(), 2048);
    }

    #[test]
    fn test_ignores_text_before_pem_block() {
        let pem = format!("Paddle public key\n\n{}", TEST_PUBLIC_KEY_PEM);
        assert!(PublicKey::from_pem(&pem).is_ok());
    }

    #[test]
    fn test_rejects_empty_pem() {
        let result = PublicKey::from_pem("   \n");
        assert!(matches!(result, Err(VerificationError::KeyFormat { .. })));
    }

    #[test]
    fn test_rejects_missing_pem_block() {
        let result = PublicKey::from_pem("MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA");
        assert!(matches!(result, Err(VerificationError::KeyFormat { .. })));
    }

    #[test]
    fn test_rejects_missing_end_marker() {
        let truncated = TEST_PUBLIC_KEY_PEM.replace("-----END PUBLIC KEY-----", "");
        let result = PublicKey::from_pem(&truncated);
        assert!(matches!(result, Err(VerificationError::KeyFormat { .. })));
    }

    #[test]
    fn test_rejects_corrupted_key_data() {
        let pem = "-----BEGIN PUBLIC KEY-----\nINVALID KEY DATA HERE\n-----END PUBLIC KEY-----";
        let result = PublicKey::from_pem(pem);
        assert!(matches!(result, Err(VerificationError::KeyFormat { .. })));
    }

    /// A well-formed key of the wrong algorithm is a configuration error.
    #[test]
    fn test_rejects_non_rsa_key() {
        let result = PublicKey::from_pem(EC_PUBLIC_KEY_PEM);
        assert!(matches!(result, Err(VerificationError::KeyFormat { .. })));
    }

    #[test]
    fn test_debug_output_is_compact() {
        let debug_str = format!("{:?}", test_public_key());
        assert!(debug_str.contains("RSA"));
        assert!(debug_str.contains("2048"));
        assert!(!debug_str.contains("MIIB"));
    }
}

// ============================================================================
// Verification against openssl-produced signatures
// ============================================================================

mod verification_tests {
    use super::*;

    #[test]
    fn test_verifies_known_signature() {
        let result = test_public_key().verify(SUBSCRIPTION_CREATED_PHP, SUBSCRIPTION_CREATED_SIG);
        assert!(result.is_ok(), "Known-good signature should verify: {:?}", result);
    }

    #[test]
    fn test_verifies_known_signature_with_pkcs1_key() {
        let key = PublicKey::from_pem(TEST_PUBLIC_KEY_PKCS1_PEM).unwrap();
        assert!(key.verify(SUBSCRIPTION_CREATED_PHP, SUBSCRIPTION_CREATED_SIG).is_ok());
    }

    /// The serializer output and the externally signed bytes must agree for
    /// payloads with multi-byte characters and empty values.
    #[test]
    fn test_verifies_serializer_output_for_multibyte_payload() {
        let serialized = php_serialize([
            ("passthrough", ""),
            ("marketing_consent", "1"),
            ("email", "zoe@example.com"),
            ("customer_name", "Zoë Müller"),
            ("alert_name", "payment_succeeded"),
        ]);
        assert_eq!(serialized, MULTIBYTE_PHP);

        assert!(test_public_key().verify(&serialized, MULTIBYTE_SIG).is_ok());
    }

    #[test]
    fn test_one_shot_verify() {
        let result = verify(
            SUBSCRIPTION_CREATED_PHP,
            SUBSCRIPTION_CREATED_SIG,
            TEST_PUBLIC_KEY_PEM,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_one_shot_verify_reports_bad_key() {
        let result = verify(SUBSCRIPTION_CREATED_PHP, SUBSCRIPTION_CREATED_SIG, "not a key");
        assert!(matches!(result, Err(VerificationError::KeyFormat { .. })));
    }

    #[test]
    fn test_rejects_tampered_payload() {
        let tampered = String::from_utf8(SUBSCRIPTION_CREATED_PHP.to_vec())
            .unwrap()
            .replace("\"42\"", "\"43\"");

        let result = test_public_key().verify(tampered.as_bytes(), SUBSCRIPTION_CREATED_SIG);

        assert!(matches!(result, Err(VerificationError::SignatureMismatch)));
    }

    #[test]
    fn test_flipping_any_payload_byte_fails() {
        let key = test_public_key();
        for position in 0..SUBSCRIPTION_CREATED_PHP.len() {
            let mut tampered = SUBSCRIPTION_CREATED_PHP.to_vec();
            tampered[position] ^= 0x01;

            let result = key.verify(&tampered, SUBSCRIPTION_CREATED_SIG);
            assert!(
                matches!(result, Err(VerificationError::SignatureMismatch)),
                "Flipping payload byte {} should fail verification",
                position
            );
        }
    }

    #[test]
    fn test_flipping_any_signature_byte_fails() {
        let key = test_public_key();
        let signature_bytes = STANDARD.decode(SUBSCRIPTION_CREATED_SIG).unwrap();

        for position in 0..signature_bytes.len() {
            let mut tampered = signature_bytes.clone();
            tampered[position] ^= 0x80;

            let result = key.verify(SUBSCRIPTION_CREATED_PHP, &STANDARD.encode(&tampered));
            assert!(
                matches!(result, Err(VerificationError::SignatureMismatch)),
                "Flipping signature byte {} should fail verification",
                position
            );
        }
    }

    #[test]
    fn test_rejects_signature_from_other_payload() {
        let result = test_public_key().verify(SUBSCRIPTION_CREATED_PHP, MULTIBYTE_SIG);
        assert!(matches!(result, Err(VerificationError::SignatureMismatch)));
    }

    #[test]
    fn test_rejects_invalid_base64() {
        let result = test_public_key().verify(SUBSCRIPTION_CREATED_PHP, "not*base64!");
        assert!(matches!(
            result,
            Err(VerificationError::SignatureEncoding { .. })
        ));
    }

    /// Paddle uses the padded standard alphabet; URL-safe input is rejected
    /// rather than silently reinterpreted.
    #[test]
    fn test_rejects_url_safe_alphabet() {
        let url_safe = SUBSCRIPTION_CREATED_SIG.replace('+', "-").replace('/', "_");
        let result = test_public_key().verify(SUBSCRIPTION_CREATED_PHP, &url_safe);
        assert!(matches!(
            result,
            Err(VerificationError::SignatureEncoding { .. })
        ));
    }

    #[test]
    fn test_empty_signature_does_not_match() {
        let result = test_public_key().verify(SUBSCRIPTION_CREATED_PHP, "");
        assert!(matches!(result, Err(VerificationError::SignatureMismatch)));
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    // Signing is slow in debug builds; a handful of cases is enough.
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Any field map signed with the private key verifies with the public key.
    #[test]
    fn prop_sign_then_verify(
        fields in proptest::collection::btree_map("[a-z_]{1,16}", "\\PC{0,24}", 0..10),
    ) {
        let serialized = php_serialize(&fields);
        let signature = sign(&serialized);

        prop_assert!(test_public_key().verify(&serialized, &signature).is_ok());
    }
}
