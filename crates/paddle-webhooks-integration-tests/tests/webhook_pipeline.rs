//! Integration tests for the webhook validation pipeline
//!
//! Deliveries are signed with the fixture key the way Paddle signs them and
//! pushed through the public API only.

mod common;

use common::{form_body, sign, signed_request, tampered_request, validator};
use paddle_webhooks::{
    Alert, AlertKind, DecodeError, ErrorCategory, VerificationError, WebhookError,
    WebhookRequest, WebhookValidator, FORM_CONTENT_TYPE, SIGNATURE_FIELD,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

const OTHER_PUBLIC_KEY_PEM: &str =
    include_str!("../../paddle-webhooks/tests/fixtures/other_public_key.pem");

/// Every registered alert type survives sign, deliver, verify and decode.
#[test]
fn test_every_alert_type_round_trips_through_pipeline() {
    let validator = validator();

    for kind in AlertKind::ALL {
        let fields: Vec<(&str, &str)> = match kind.alert_name() {
            Some(alert_name) => vec![
                ("alert_name", alert_name),
                ("alert_id", "1234567"),
                ("event_time", "2024-03-01 12:00:00"),
            ],
            None => vec![("p_order_id", "991"), ("event_time", "2024-03-01 12:00:00")],
        };

        let webhook = validator
            .parse(&signed_request(&fields))
            .unwrap_or_else(|e| panic!("{} should verify and decode: {}", kind, e));

        assert_eq!(webhook.alert.kind(), kind);
        assert_eq!(webhook.fields.len(), fields.len());
        assert!(!webhook.fields.contains_key(SIGNATURE_FIELD));
    }
}

#[test]
fn test_request_built_from_http_headers() {
    let fields = [("alert_name", "transfer_created"), ("payout_id", "po_77")];
    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), FORM_CONTENT_TYPE.to_string());
    headers.insert("user-agent".to_string(), "Paddle".to_string());

    let request = WebhookRequest::from_headers(&headers, form_body(&fields, &sign(&fields)));
    let webhook = validator().parse(&request).unwrap();

    match webhook.alert {
        Alert::TransferCreated(alert) => assert_eq!(alert.payout_id.as_deref(), Some("po_77")),
        other => panic!("Expected TransferCreated, got {:?}", other),
    }
}

/// Values that need percent-encoding must serialize from their decoded form.
#[test]
fn test_values_with_reserved_characters() {
    let fields = [
        ("alert_name", "subscription_created"),
        ("cancel_url", "https://checkout.paddle.com/subscription/cancel?user=1&token=a+b"),
        ("passthrough", r#"{"account":"acme","plan":"pro; annual"}"#),
        ("email", "ünïcödé+tag@example.com"),
    ];

    let webhook = validator().parse(&signed_request(&fields)).unwrap();

    match webhook.alert {
        Alert::SubscriptionCreated(alert) => {
            assert_eq!(alert.cancel_url.as_deref(), Some(fields[1].1));
            assert_eq!(alert.passthrough.as_deref(), Some(fields[2].1));
            assert_eq!(alert.email.as_deref(), Some(fields[3].1));
        }
        other => panic!("Expected SubscriptionCreated, got {:?}", other),
    }
}

#[test]
fn test_field_changed_after_signing_is_rejected() {
    let signed = [("alert_name", "payment_refunded"), ("amount", "10.00")];
    let delivered = [("alert_name", "payment_refunded"), ("amount", "1000.00")];

    let error = validator()
        .parse(&tampered_request(&signed, &delivered))
        .unwrap_err();

    assert!(matches!(
        error,
        WebhookError::Verification(VerificationError::SignatureMismatch)
    ));
    assert_eq!(error.category(), ErrorCategory::Authentication);
}

/// Changing the alert type is as much a forgery as changing an amount.
#[test]
fn test_alert_name_changed_after_signing_is_rejected() {
    let signed = [("alert_name", "payment_dispute_created"), ("order_id", "1")];
    let delivered = [("alert_name", "payment_dispute_closed"), ("order_id", "1")];

    let error = validator()
        .parse(&tampered_request(&signed, &delivered))
        .unwrap_err();

    assert!(error.is_authentication_failure());
}

#[test]
fn test_field_dropped_after_signing_is_rejected() {
    let signed = [
        ("alert_name", "subscription_cancelled"),
        ("passthrough", ""),
        ("user_id", "5"),
    ];
    let delivered = [("alert_name", "subscription_cancelled"), ("user_id", "5")];

    let result = validator().validate(&tampered_request(&signed, &delivered));

    assert!(result.is_err());
}

#[test]
fn test_other_key_rejects_delivery() {
    let validator =
        WebhookValidator::from_pem(OTHER_PUBLIC_KEY_PEM).expect("Other key should parse");

    let error = validator
        .validate(&signed_request(&[("alert_name", "transfer_paid")]))
        .unwrap_err();

    assert!(matches!(
        error,
        WebhookError::Verification(VerificationError::SignatureMismatch)
    ));
}

/// An authentic delivery of a type this crate does not know is reported as
/// such, not as a forgery, and its fields stay available.
#[test]
fn test_authentic_unknown_alert_is_distinguishable() {
    let request = signed_request(&[("alert_name", "subscription_renewed"), ("user_id", "9")]);
    let validator = validator();

    let error = validator.parse(&request).unwrap_err();
    assert!(matches!(
        &error,
        WebhookError::Decode(DecodeError::UnknownEventType { alert_name })
            if alert_name == "subscription_renewed"
    ));
    assert_eq!(error.category(), ErrorCategory::UnsupportedEvent);

    let fields = validator.validate(&request).unwrap();
    assert_eq!(fields.get("user_id"), Some("9"));
}

#[test]
fn test_json_delivery_is_rejected_before_verification() {
    let request = WebhookRequest::new(
        "application/json",
        r#"{"alert_name":"subscription_created","p_signature":"x"}"#,
    );

    let error = validator().parse(&request).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Transport);
    assert!(matches!(error, WebhookError::ContentType { .. }));
}

#[test]
fn test_validator_shared_between_threads() {
    let validator = Arc::new(validator());
    let requests: Vec<WebhookRequest> = ["1", "2", "3", "4"]
        .iter()
        .map(|id| signed_request(&[("alert_name", "locker_processed"), ("order_id", *id)]))
        .collect();

    let handles: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || validator.parse(&request).map(|webhook| webhook.alert))
        })
        .collect();

    for handle in handles {
        let alert = handle.join().expect("Thread panicked").expect("Delivery should verify");
        assert_eq!(alert.kind(), AlertKind::LockerProcessed);
    }
}
