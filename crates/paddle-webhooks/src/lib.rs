//! # Paddle Webhooks
//!
//! Verification and decoding of Paddle classic webhook deliveries.
//!
//! Paddle signs every webhook by PHP-serializing its form fields and signing
//! the result with RSA-SHA1. This crate reproduces that serialization byte for
//! byte, verifies the detached `p_signature` against Paddle's public key, and
//! decodes the verified fields into a typed [`Alert`].
//!
//! This crate provides:
//! - The PHP array serializer Paddle signs over ([`php_serialize`](mod@php_serialize))
//! - RSA-SHA1 PKCS#1 v1.5 signature verification ([`signature`])
//! - A registry of the classic alert types and their field shapes ([`alerts`])
//! - The request validation pipeline tying them together ([`webhook`])
//!
//! HTTP serving, retries and event persistence are left to the caller.
//!
//! # Examples
//!
//! ```rust,no_run
//! use paddle_webhooks::{Alert, WebhookRequest, WebhookValidator};
//!
//! # fn example(pem: &str, body: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! // Parse the key once; a bad key fails here rather than per delivery.
//! let validator = WebhookValidator::from_pem(pem)?;
//!
//! let request = WebhookRequest::new("application/x-www-form-urlencoded", body);
//! match validator.parse(&request) {
//!     Ok(webhook) => match webhook.alert {
//!         Alert::SubscriptionCreated(alert) => println!("New subscription {:?}", alert.subscription_id),
//!         other => println!("Received {}", other.kind()),
//!     },
//!     Err(e) if e.is_unknown_event_type() => println!("Authentic but unsupported: {}", e),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod alerts;
pub mod error;
pub mod php_serialize;
pub mod signature;
pub mod webhook;

// Re-export commonly used types at crate root for convenience
pub use alerts::{decode, Alert, AlertKind, Flag};
pub use error::{DecodeError, ErrorCategory, VerificationError, WebhookError};
pub use php_serialize::php_serialize;
pub use signature::{verify, PublicKey};
pub use webhook::{
    parse_form, VerifiedWebhook, WebhookFields, WebhookRequest, WebhookValidator,
    ALERT_NAME_FIELD, FORM_CONTENT_TYPE, SIGNATURE_FIELD,
};
