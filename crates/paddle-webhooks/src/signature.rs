//! Detached signature verification for Paddle webhooks.
//!
//! Paddle signs the PHP-serialized webhook fields with its private RSA key
//! using SHA-1 and PKCS#1 v1.5 padding, then base64-encodes the result into
//! the `p_signature` field. The digest algorithm and padding are fixed by the
//! platform; they are not a choice this crate gets to make.
//!
//! # Examples
//!
//! ```rust,no_run
//! use paddle_webhooks::php_serialize::php_serialize;
//! use paddle_webhooks::signature::PublicKey;
//!
//! # fn example(pem: &str, p_signature: &str) -> Result<(), Box<dyn std::error::Error>> {
//! // Parse the key once at startup.
//! let public_key = PublicKey::from_pem(pem)?;
//!
//! let serialized = php_serialize([("alert_name", "subscription_created"), ("user_id", "42")]);
//! public_key.verify(&serialized, p_signature)?;
//! # Ok(())
//! # }
//! ```

use crate::error::VerificationError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha1::{Digest, Sha1};
use tracing::{debug, instrument};

const PEM_BEGIN: &str = "-----BEGIN";
const PEM_END: &str = "-----END";

/// Paddle's RSA public key, parsed and ready for verification.
///
/// Parsing is the only fallible configuration step, so constructing a
/// `PublicKey` at startup turns a bad key into an immediate error rather
/// than a rejected delivery later on. The value is immutable and can be
/// shared freely between threads.
#[derive(Clone)]
pub struct PublicKey {
    key: RsaPublicKey,
}

impl PublicKey {
    /// Parse a PEM-encoded RSA public key.
    ///
    /// Accepts the `-----BEGIN PUBLIC KEY-----` (SubjectPublicKeyInfo) form
    /// that Paddle hands out, as well as the PKCS#1
    /// `-----BEGIN RSA PUBLIC KEY-----` form. Text before the first PEM
    /// boundary is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::KeyFormat`] if:
    /// - the input is empty or has no PEM block
    /// - the PEM block is malformed
    /// - the key is not an RSA key
    pub fn from_pem(pem: &str) -> Result<Self, VerificationError> {
        let pem = pem.trim();
        if pem.is_empty() {
            return Err(VerificationError::KeyFormat {
                message: "PEM string cannot be empty".to_string(),
            });
        }

        let start = pem.find(PEM_BEGIN).ok_or_else(|| VerificationError::KeyFormat {
            message: "Invalid PEM format: missing BEGIN marker".to_string(),
        })?;
        let pem = &pem[start..];
        if !pem.contains(PEM_END) {
            return Err(VerificationError::KeyFormat {
                message: "Invalid PEM format: missing END marker".to_string(),
            });
        }

        let key = match RsaPublicKey::from_public_key_pem(pem) {
            Ok(key) => key,
            Err(spki_error) => RsaPublicKey::from_pkcs1_pem(pem).map_err(|_| {
                VerificationError::KeyFormat {
                    message: format!("Failed to parse RSA public key: {}", spki_error),
                }
            })?,
        };

        Ok(Self { key })
    }

    /// Size of the RSA modulus in bits.
    pub fn bits(&self) -> usize {
        self.key.size() * 8
    }

    /// Verify a base64 `p_signature` against PHP-serialized webhook fields.
    ///
    /// # Errors
    ///
    /// - [`VerificationError::SignatureEncoding`] if `signature` is not valid
    ///   base64
    /// - [`VerificationError::SignatureMismatch`] if the signature was not
    ///   produced over `serialized` by the matching private key
    #[instrument(skip_all, fields(payload_len = serialized.len()))]
    pub fn verify(&self, serialized: &[u8], signature: &str) -> Result<(), VerificationError> {
        let signature_bytes = decode_signature(signature)?;
        let digest = Sha1::digest(serialized);

        self.key
            .verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &signature_bytes)
            .map_err(|_| {
                debug!("RSA-SHA1 signature does not match serialized payload");
                VerificationError::SignatureMismatch
            })
    }
}

// Keys are public, but dumping the modulus into logs is just noise.
impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("algorithm", &"RSA")
            .field("bits", &self.bits())
            .finish()
    }
}

/// Verify a signature against a PEM public key in one step.
///
/// Parses `public_key_pem` on every call. Long-running integrations should
/// parse a [`PublicKey`] once and call [`PublicKey::verify`] instead.
///
/// # Errors
///
/// Returns [`VerificationError::KeyFormat`] for an unusable key, otherwise
/// the errors of [`PublicKey::verify`].
pub fn verify(
    serialized: &[u8],
    signature: &str,
    public_key_pem: &str,
) -> Result<(), VerificationError> {
    PublicKey::from_pem(public_key_pem)?.verify(serialized, signature)
}

fn decode_signature(signature: &str) -> Result<Vec<u8>, VerificationError> {
    STANDARD
        .decode(signature)
        .map_err(|e| VerificationError::SignatureEncoding {
            message: format!("Invalid base64 in signature: {}", e),
        })
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
