//! Error types for Paddle webhook processing.
//!
//! Errors are split by pipeline stage so that callers can tell an
//! unauthentic delivery apart from one that is merely newer than this crate.
//! None of these conditions are transient: retrying the same delivery can
//! never succeed, so nothing in this crate retries.

use thiserror::Error;

/// Errors raised while verifying the detached `p_signature` of a delivery.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The configured public key could not be used (configuration bug).
    #[error("Invalid public key: {message}")]
    KeyFormat { message: String },

    /// The signature value is not valid base64.
    #[error("Invalid signature encoding: {message}")]
    SignatureEncoding { message: String },

    /// The signature does not match the serialized payload.
    #[error("Signature does not match payload")]
    SignatureMismatch,
}

/// Errors raised while classifying and decoding a verified payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The `alert_name` discriminator is not one this crate knows about.
    #[error("Unknown alert type: '{alert_name}'")]
    UnknownEventType { alert_name: String },

    /// The payload does not fit the alert shape, e.g. a flag field whose
    /// value is neither an integer nor a boolean.
    #[error("Payload does not match '{alert_name}' shape: {message}")]
    Shape { alert_name: String, message: String },
}

/// Errors returned by the webhook validation pipeline.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request is not form-encoded; nothing was parsed.
    #[error("Webhook request has unsupported Content-Type '{content_type}'")]
    ContentType { content_type: String },

    /// The form-encoded body is malformed.
    #[error("Malformed form body: {message}")]
    FormDecode { message: String },

    /// The delivery carries no `p_signature` field.
    #[error("Webhook request has no p_signature field")]
    MissingSignature,

    /// Signature verification failed.
    #[error("Signature verification failed: {0}")]
    Verification(#[from] VerificationError),

    /// The verified payload could not be decoded.
    #[error("Payload decoding failed: {0}")]
    Decode(#[from] DecodeError),
}

/// Broad classification of a [`WebhookError`] for logging and alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Wrong transport encoding or malformed body.
    Transport,
    /// The integrator supplied an unusable public key.
    Configuration,
    /// The delivery is not authentic. Security relevant.
    Authentication,
    /// The platform sent an alert type this crate does not know yet.
    UnsupportedEvent,
    /// The verified payload does not fit its declared shape.
    Malformed,
}

impl WebhookError {
    /// Classify this error.
    ///
    /// Authentication failures should be treated as possible forgery;
    /// unsupported events usually mean the platform added a new alert type.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ContentType { .. } | Self::FormDecode { .. } => ErrorCategory::Transport,
            Self::MissingSignature => ErrorCategory::Authentication,
            Self::Verification(VerificationError::KeyFormat { .. }) => {
                ErrorCategory::Configuration
            }
            Self::Verification(_) => ErrorCategory::Authentication,
            Self::Decode(DecodeError::UnknownEventType { .. }) => ErrorCategory::UnsupportedEvent,
            Self::Decode(_) => ErrorCategory::Malformed,
        }
    }

    /// Check whether the delivery was rejected as not authentic.
    pub fn is_authentication_failure(&self) -> bool {
        self.category() == ErrorCategory::Authentication
    }

    /// Check whether the delivery failed only because its alert type is unknown.
    pub fn is_unknown_event_type(&self) -> bool {
        self.category() == ErrorCategory::UnsupportedEvent
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
