//! # Webhook Processing Module
//!
//! Validates inbound Paddle webhook deliveries and hands verified payloads to
//! the alert decoder.
//!
//! A delivery passes through these stages, and stops at the first failure:
//!
//! 1. Content-Type check (`application/x-www-form-urlencoded` only)
//! 2. Form decoding of the body into [`WebhookFields`]
//! 3. Extraction and removal of `p_signature`
//! 4. PHP serialization of the remaining fields and RSA-SHA1 verification
//! 5. Classification and decoding into an [`Alert`]
//!
//! Decoding never sees unverified input.

use crate::alerts::{decode, Alert};
use crate::error::{VerificationError, WebhookError};
use crate::php_serialize::php_serialize;
use crate::signature::PublicKey;
use bytes::Bytes;
use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Form field carrying the detached signature.
pub const SIGNATURE_FIELD: &str = "p_signature";

/// Form field naming the alert type.
pub const ALERT_NAME_FIELD: &str = "alert_name";

/// The only Content-Type Paddle delivers webhooks with.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ============================================================================
// Core Types
// ============================================================================

/// Raw HTTP request data of a webhook delivery
#[derive(Clone)]
pub struct WebhookRequest {
    pub content_type: String,
    pub body: Bytes,
}

impl WebhookRequest {
    /// Create new webhook request
    pub fn new(content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Build a request from an HTTP header map.
    ///
    /// The `Content-Type` lookup ignores header name case. A missing header
    /// yields an empty content type, which validation then rejects.
    pub fn from_headers(headers: &HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        let content_type = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.clone())
            .unwrap_or_default();

        Self::new(content_type, body)
    }
}

impl std::fmt::Debug for WebhookRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The body carries p_signature and customer data
        f.debug_struct("WebhookRequest")
            .field("content_type", &self.content_type)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// Form fields of a delivery, keyed by field name.
///
/// Ordering carries no meaning; iteration is always in byte-wise key order.
/// Values are kept verbatim, including empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WebhookFields(BTreeMap<String, String>);

impl WebhookFields {
    /// Create an empty field map
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Check whether a field is present
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Remove a field and return its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in byte-wise key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// Take the underlying map
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for WebhookFields {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Collecting keeps the first value seen for a repeated key.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for WebhookFields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = BTreeMap::new();
        for (key, value) in iter {
            map.entry(key.into()).or_insert_with(|| value.into());
        }
        Self(map)
    }
}

impl<'a> IntoIterator for &'a WebhookFields {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for WebhookFields {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A delivery that passed verification, with its decoded alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedWebhook {
    /// The decoded alert record
    pub alert: Alert,
    /// The verified fields the alert was decoded from, without `p_signature`
    pub fields: WebhookFields,
}

// ============================================================================
// Form Decoding
// ============================================================================

/// Decode an `application/x-www-form-urlencoded` body.
///
/// `+` decodes to a space and `%XX` escapes to their byte. Empty segments are
/// skipped and a segment without `=` is a field with an empty value. When a
/// key repeats, the first occurrence wins.
///
/// # Errors
///
/// Returns [`WebhookError::FormDecode`] for a `%` that is not followed by two
/// hex digits and for `;` separators, which are not part of the format.
pub fn parse_form(body: &[u8]) -> Result<WebhookFields, WebhookError> {
    check_form_syntax(body)?;
    Ok(url::form_urlencoded::parse(body)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect())
}

fn check_form_syntax(body: &[u8]) -> Result<(), WebhookError> {
    if let Some(position) = body.iter().position(|b| *b == b';') {
        return Err(WebhookError::FormDecode {
            message: format!("Invalid semicolon separator at byte {}", position),
        });
    }

    let mut position = 0;
    while let Some(offset) = body[position..].iter().position(|b| *b == b'%') {
        let escape = position + offset;
        let digits = body.get(escape + 1..escape + 3).unwrap_or_default();
        if digits.len() != 2 || !digits.iter().all(u8::is_ascii_hexdigit) {
            return Err(WebhookError::FormDecode {
                message: format!("Invalid percent-escape at byte {}", escape),
            });
        }
        position = escape + 3;
    }

    Ok(())
}

// ============================================================================
// Validation Pipeline
// ============================================================================

/// Validates Paddle webhook deliveries against Paddle's public key.
///
/// The validator is immutable and holds no per-delivery state. Build it once
/// at startup and share it, behind an `Arc` if needed, between request
/// handlers.
///
/// # Examples
///
/// ```rust,no_run
/// use paddle_webhooks::webhook::{WebhookRequest, WebhookValidator};
///
/// # fn example(pem: &str, body: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
/// let validator = WebhookValidator::from_pem(pem)?;
///
/// let request = WebhookRequest::new("application/x-www-form-urlencoded", body);
/// let webhook = validator.parse(&request)?;
/// println!("Received {} ({:?})", webhook.alert.kind(), webhook.alert.alert_id());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WebhookValidator {
    public_key: PublicKey,
}

impl WebhookValidator {
    /// Create a validator for an already parsed key
    pub fn new(public_key: PublicKey) -> Self {
        Self { public_key }
    }

    /// Create a validator from a PEM public key.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::KeyFormat`] if the key cannot be used.
    pub fn from_pem(pem: &str) -> Result<Self, VerificationError> {
        PublicKey::from_pem(pem).map(Self::new)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Verify a delivery and return its fields without decoding them.
    ///
    /// The returned map no longer contains `p_signature`.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::ContentType`] if the request is not form-encoded
    /// - [`WebhookError::FormDecode`] if the body is malformed
    /// - [`WebhookError::MissingSignature`] if `p_signature` is absent
    /// - [`WebhookError::Verification`] if the signature does not verify
    #[instrument(skip_all, fields(body_len = request.body.len()))]
    pub fn validate(&self, request: &WebhookRequest) -> Result<WebhookFields, WebhookError> {
        let result = self.validate_request(request);
        if let Err(e) = &result {
            log_rejection(e);
        }
        result
    }

    /// Verify already form-decoded fields.
    ///
    /// For callers whose HTTP framework decodes the form itself. The
    /// Content-Type check is the caller's responsibility in that case.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::MissingSignature`] if `p_signature` is absent
    /// - [`WebhookError::Verification`] if the signature does not verify
    pub fn validate_fields(&self, fields: WebhookFields) -> Result<WebhookFields, WebhookError> {
        let result = self.verify_fields(fields);
        if let Err(e) = &result {
            log_rejection(e);
        }
        result
    }

    /// Verify a delivery and decode it into its alert record.
    ///
    /// # Errors
    ///
    /// The errors of [`WebhookValidator::validate`], and
    /// [`WebhookError::Decode`] if the verified payload cannot be decoded.
    pub fn parse(&self, request: &WebhookRequest) -> Result<VerifiedWebhook, WebhookError> {
        let fields = self.validate(request)?;
        into_verified(fields)
    }

    /// Verify already form-decoded fields and decode them.
    ///
    /// # Errors
    ///
    /// The errors of [`WebhookValidator::validate_fields`], and
    /// [`WebhookError::Decode`] if the verified payload cannot be decoded.
    pub fn parse_fields(&self, fields: WebhookFields) -> Result<VerifiedWebhook, WebhookError> {
        let fields = self.validate_fields(fields)?;
        into_verified(fields)
    }

    fn validate_request(&self, request: &WebhookRequest) -> Result<WebhookFields, WebhookError> {
        if request.content_type != FORM_CONTENT_TYPE {
            return Err(WebhookError::ContentType {
                content_type: request.content_type.clone(),
            });
        }

        let fields = parse_form(&request.body)?;
        debug!(field_count = fields.len(), "Decoded webhook form body");

        self.verify_fields(fields)
    }

    fn verify_fields(&self, mut fields: WebhookFields) -> Result<WebhookFields, WebhookError> {
        let signature = fields
            .remove(SIGNATURE_FIELD)
            .ok_or(WebhookError::MissingSignature)?;

        let serialized = php_serialize(&fields);
        self.public_key.verify(&serialized, &signature)?;

        debug!(field_count = fields.len(), "Webhook signature verified");
        Ok(fields)
    }
}

fn into_verified(fields: WebhookFields) -> Result<VerifiedWebhook, WebhookError> {
    match decode(&fields) {
        Ok(alert) => Ok(VerifiedWebhook { alert, fields }),
        Err(e) => {
            let error = WebhookError::from(e);
            log_rejection(&error);
            Err(error)
        }
    }
}

fn log_rejection(error: &WebhookError) {
    warn!(
        category = ?error.category(),
        error = %error,
        "Rejected webhook delivery"
    );
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
