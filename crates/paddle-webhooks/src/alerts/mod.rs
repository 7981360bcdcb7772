//! Classification and decoding of verified webhook payloads.
//!
//! Every classic Paddle alert carries its type in the `alert_name` field.
//! [`decode`] looks that name up in the [`AlertKind`] registry and decodes the
//! remaining fields into the matching record. Product fulfillment deliveries
//! are the exception: they carry no `alert_name` and are recognised by their
//! `p_order_id` field instead.
//!
//! Decoding enforces shape, not completeness. Absent fields decode to `None`
//! and fields this crate does not know about are ignored, so new fields added
//! by the platform never break decoding.

pub mod flag;
mod records;

pub use flag::{Flag, ParseFlagError};
pub use records::*;

use crate::error::DecodeError;
use crate::webhook::{WebhookFields, ALERT_NAME_FIELD};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Field whose presence marks a fulfillment delivery.
pub const FULFILLMENT_MARKER_FIELD: &str = "p_order_id";

/// The alert types this crate can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlertKind {
    SubscriptionCreated,
    SubscriptionUpdated,
    SubscriptionCancelled,
    SubscriptionPaymentSucceeded,
    SubscriptionPaymentFailed,
    SubscriptionPaymentRefunded,
    PaymentSucceeded,
    PaymentRefunded,
    LockerProcessed,
    PaymentDisputeCreated,
    PaymentDisputeClosed,
    HighRiskTransactionCreated,
    HighRiskTransactionUpdated,
    TransferCreated,
    TransferPaid,
    NewAudienceMember,
    UpdateAudienceMember,
    InvoicePaid,
    InvoiceSent,
    InvoiceOverdue,
    /// Webhook fulfillment; has no `alert_name` on the wire.
    Fulfillment,
}

impl AlertKind {
    /// Every kind, in registry order.
    pub const ALL: [AlertKind; 21] = [
        AlertKind::SubscriptionCreated,
        AlertKind::SubscriptionUpdated,
        AlertKind::SubscriptionCancelled,
        AlertKind::SubscriptionPaymentSucceeded,
        AlertKind::SubscriptionPaymentFailed,
        AlertKind::SubscriptionPaymentRefunded,
        AlertKind::PaymentSucceeded,
        AlertKind::PaymentRefunded,
        AlertKind::LockerProcessed,
        AlertKind::PaymentDisputeCreated,
        AlertKind::PaymentDisputeClosed,
        AlertKind::HighRiskTransactionCreated,
        AlertKind::HighRiskTransactionUpdated,
        AlertKind::TransferCreated,
        AlertKind::TransferPaid,
        AlertKind::NewAudienceMember,
        AlertKind::UpdateAudienceMember,
        AlertKind::InvoicePaid,
        AlertKind::InvoiceSent,
        AlertKind::InvoiceOverdue,
        AlertKind::Fulfillment,
    ];

    /// Name of this kind. For every kind except [`AlertKind::Fulfillment`]
    /// this is the `alert_name` value on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubscriptionCreated => "subscription_created",
            Self::SubscriptionUpdated => "subscription_updated",
            Self::SubscriptionCancelled => "subscription_cancelled",
            Self::SubscriptionPaymentSucceeded => "subscription_payment_succeeded",
            Self::SubscriptionPaymentFailed => "subscription_payment_failed",
            Self::SubscriptionPaymentRefunded => "subscription_payment_refunded",
            Self::PaymentSucceeded => "payment_succeeded",
            Self::PaymentRefunded => "payment_refunded",
            Self::LockerProcessed => "locker_processed",
            Self::PaymentDisputeCreated => "payment_dispute_created",
            Self::PaymentDisputeClosed => "payment_dispute_closed",
            Self::HighRiskTransactionCreated => "high_risk_transaction_created",
            Self::HighRiskTransactionUpdated => "high_risk_transaction_updated",
            Self::TransferCreated => "transfer_created",
            Self::TransferPaid => "transfer_paid",
            Self::NewAudienceMember => "new_audience_member",
            Self::UpdateAudienceMember => "update_audience_member",
            Self::InvoicePaid => "invoice_paid",
            Self::InvoiceSent => "invoice_sent",
            Self::InvoiceOverdue => "invoice_overdue",
            Self::Fulfillment => "fulfillment",
        }
    }

    /// The `alert_name` value announcing this kind, if it has one.
    pub fn alert_name(&self) -> Option<&'static str> {
        match self {
            Self::Fulfillment => None,
            other => Some(other.as_str()),
        }
    }

    /// Look up the kind announced by an `alert_name` value.
    pub fn from_alert_name(alert_name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.alert_name() == Some(alert_name))
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AlertKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = DecodeError;

    /// Parse a kind name as returned by [`AlertKind::as_str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownEventType {
                alert_name: s.to_string(),
            })
    }
}

/// A decoded webhook payload.
///
/// Serializes as the bare record, without a variant tag; the record's own
/// `alert_name` field identifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Alert {
    SubscriptionCreated(SubscriptionCreatedAlert),
    SubscriptionUpdated(SubscriptionUpdatedAlert),
    SubscriptionCancelled(SubscriptionCancelledAlert),
    SubscriptionPaymentSucceeded(SubscriptionPaymentSucceededAlert),
    SubscriptionPaymentFailed(SubscriptionPaymentFailedAlert),
    SubscriptionPaymentRefunded(SubscriptionPaymentRefundedAlert),
    PaymentSucceeded(PaymentSucceededAlert),
    PaymentRefunded(PaymentRefundedAlert),
    LockerProcessed(LockerProcessedAlert),
    PaymentDisputeCreated(PaymentDisputeCreatedAlert),
    PaymentDisputeClosed(PaymentDisputeClosedAlert),
    HighRiskTransactionCreated(HighRiskTransactionCreatedAlert),
    HighRiskTransactionUpdated(HighRiskTransactionUpdatedAlert),
    TransferCreated(TransferCreatedAlert),
    TransferPaid(TransferPaidAlert),
    NewAudienceMember(NewAudienceMemberAlert),
    UpdateAudienceMember(UpdateAudienceMemberAlert),
    InvoicePaid(InvoicePaidAlert),
    InvoiceSent(InvoiceSentAlert),
    InvoiceOverdue(InvoiceOverdueAlert),
    Fulfillment(Fulfillment),
}

impl Alert {
    /// The kind of this alert.
    pub fn kind(&self) -> AlertKind {
        match self {
            Self::SubscriptionCreated(_) => AlertKind::SubscriptionCreated,
            Self::SubscriptionUpdated(_) => AlertKind::SubscriptionUpdated,
            Self::SubscriptionCancelled(_) => AlertKind::SubscriptionCancelled,
            Self::SubscriptionPaymentSucceeded(_) => AlertKind::SubscriptionPaymentSucceeded,
            Self::SubscriptionPaymentFailed(_) => AlertKind::SubscriptionPaymentFailed,
            Self::SubscriptionPaymentRefunded(_) => AlertKind::SubscriptionPaymentRefunded,
            Self::PaymentSucceeded(_) => AlertKind::PaymentSucceeded,
            Self::PaymentRefunded(_) => AlertKind::PaymentRefunded,
            Self::LockerProcessed(_) => AlertKind::LockerProcessed,
            Self::PaymentDisputeCreated(_) => AlertKind::PaymentDisputeCreated,
            Self::PaymentDisputeClosed(_) => AlertKind::PaymentDisputeClosed,
            Self::HighRiskTransactionCreated(_) => AlertKind::HighRiskTransactionCreated,
            Self::HighRiskTransactionUpdated(_) => AlertKind::HighRiskTransactionUpdated,
            Self::TransferCreated(_) => AlertKind::TransferCreated,
            Self::TransferPaid(_) => AlertKind::TransferPaid,
            Self::NewAudienceMember(_) => AlertKind::NewAudienceMember,
            Self::UpdateAudienceMember(_) => AlertKind::UpdateAudienceMember,
            Self::InvoicePaid(_) => AlertKind::InvoicePaid,
            Self::InvoiceSent(_) => AlertKind::InvoiceSent,
            Self::InvoiceOverdue(_) => AlertKind::InvoiceOverdue,
            Self::Fulfillment(_) => AlertKind::Fulfillment,
        }
    }

    /// The platform's unique id for this delivery, usable as an idempotency
    /// key. Fulfillment deliveries have none.
    pub fn alert_id(&self) -> Option<&str> {
        match self {
            Self::SubscriptionCreated(record) => record.alert_id.as_deref(),
            Self::SubscriptionUpdated(record) => record.alert_id.as_deref(),
            Self::SubscriptionCancelled(record) => record.alert_id.as_deref(),
            Self::SubscriptionPaymentSucceeded(record) => record.alert_id.as_deref(),
            Self::SubscriptionPaymentFailed(record) => record.alert_id.as_deref(),
            Self::SubscriptionPaymentRefunded(record) => record.alert_id.as_deref(),
            Self::PaymentSucceeded(record) => record.alert_id.as_deref(),
            Self::PaymentRefunded(record) => record.alert_id.as_deref(),
            Self::LockerProcessed(record) => record.alert_id.as_deref(),
            Self::PaymentDisputeCreated(record) => record.alert_id.as_deref(),
            Self::PaymentDisputeClosed(record) => record.alert_id.as_deref(),
            Self::HighRiskTransactionCreated(record) => record.alert_id.as_deref(),
            Self::HighRiskTransactionUpdated(record) => record.alert_id.as_deref(),
            Self::TransferCreated(record) => record.alert_id.as_deref(),
            Self::TransferPaid(record) => record.alert_id.as_deref(),
            Self::NewAudienceMember(record) => record.alert_id.as_deref(),
            Self::UpdateAudienceMember(record) => record.alert_id.as_deref(),
            Self::InvoicePaid(record) => record.alert_id.as_deref(),
            Self::InvoiceSent(record) => record.alert_id.as_deref(),
            Self::InvoiceOverdue(record) => record.alert_id.as_deref(),
            Self::Fulfillment(_) => None,
        }
    }
}

/// Classify a verified field map and decode it into its alert record.
///
/// # Errors
///
/// - [`DecodeError::UnknownEventType`] if `alert_name` is not in the
///   registry, or is absent from a payload that is not a fulfillment
/// - [`DecodeError::Shape`] if a typed field holds an unparsable value
#[instrument(skip_all, fields(alert_name = tracing::field::Empty))]
pub fn decode(fields: &WebhookFields) -> Result<Alert, DecodeError> {
    let kind = classify(fields)?;
    tracing::Span::current().record("alert_name", kind.as_str());

    let document = to_document(fields);
    let alert = match kind {
        AlertKind::SubscriptionCreated => {
            Alert::SubscriptionCreated(from_document(kind, document)?)
        }
        AlertKind::SubscriptionUpdated => {
            Alert::SubscriptionUpdated(from_document(kind, document)?)
        }
        AlertKind::SubscriptionCancelled => {
            Alert::SubscriptionCancelled(from_document(kind, document)?)
        }
        AlertKind::SubscriptionPaymentSucceeded => {
            Alert::SubscriptionPaymentSucceeded(from_document(kind, document)?)
        }
        AlertKind::SubscriptionPaymentFailed => {
            Alert::SubscriptionPaymentFailed(from_document(kind, document)?)
        }
        AlertKind::SubscriptionPaymentRefunded => {
            Alert::SubscriptionPaymentRefunded(from_document(kind, document)?)
        }
        AlertKind::PaymentSucceeded => Alert::PaymentSucceeded(from_document(kind, document)?),
        AlertKind::PaymentRefunded => Alert::PaymentRefunded(from_document(kind, document)?),
        AlertKind::LockerProcessed => Alert::LockerProcessed(from_document(kind, document)?),
        AlertKind::PaymentDisputeCreated => {
            Alert::PaymentDisputeCreated(from_document(kind, document)?)
        }
        AlertKind::PaymentDisputeClosed => {
            Alert::PaymentDisputeClosed(from_document(kind, document)?)
        }
        AlertKind::HighRiskTransactionCreated => {
            Alert::HighRiskTransactionCreated(from_document(kind, document)?)
        }
        AlertKind::HighRiskTransactionUpdated => {
            Alert::HighRiskTransactionUpdated(from_document(kind, document)?)
        }
        AlertKind::TransferCreated => Alert::TransferCreated(from_document(kind, document)?),
        AlertKind::TransferPaid => Alert::TransferPaid(from_document(kind, document)?),
        AlertKind::NewAudienceMember => Alert::NewAudienceMember(from_document(kind, document)?),
        AlertKind::UpdateAudienceMember => {
            Alert::UpdateAudienceMember(from_document(kind, document)?)
        }
        AlertKind::InvoicePaid => Alert::InvoicePaid(from_document(kind, document)?),
        AlertKind::InvoiceSent => Alert::InvoiceSent(from_document(kind, document)?),
        AlertKind::InvoiceOverdue => Alert::InvoiceOverdue(from_document(kind, document)?),
        AlertKind::Fulfillment => Alert::Fulfillment(from_document(kind, document)?),
    };

    debug!(field_count = fields.len(), "Decoded alert payload");
    Ok(alert)
}

fn classify(fields: &WebhookFields) -> Result<AlertKind, DecodeError> {
    match fields.get(ALERT_NAME_FIELD) {
        Some(alert_name) => AlertKind::from_alert_name(alert_name).ok_or_else(|| {
            DecodeError::UnknownEventType {
                alert_name: alert_name.to_string(),
            }
        }),
        None if fields.contains_key(FULFILLMENT_MARKER_FIELD) => Ok(AlertKind::Fulfillment),
        None => Err(DecodeError::UnknownEventType {
            alert_name: String::new(),
        }),
    }
}

// Every value stays a JSON string; typed fields parse themselves.
fn to_document(fields: &WebhookFields) -> serde_json::Value {
    serde_json::Value::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
            .collect(),
    )
}

fn from_document<T: DeserializeOwned>(
    kind: AlertKind,
    document: serde_json::Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(document).map_err(|e| DecodeError::Shape {
        alert_name: kind.as_str().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
