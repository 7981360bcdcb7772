//! Field shapes of the Paddle alert payloads.
//!
//! Every field is optional: Paddle does not guarantee that a field is present
//! on every delivery, and new fields it adds are ignored. Field names are the
//! wire names. Values stay strings unless the field is an integer flag, which
//! is decoded into [`Flag`].

use super::flag::Flag;
use serde::{Deserialize, Serialize};

/// Product fulfillment delivery.
///
/// Sent for orders of products or plans configured with webhook fulfillment.
/// These deliveries carry no `alert_name`; every field is prefixed with `p_`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fulfillment {
    pub event_time: Option<String>,
    pub p_country: Option<String>,
    pub p_coupon: Option<String>,
    pub p_coupon_savings: Option<String>,
    pub p_currency: Option<String>,
    pub p_earnings: Option<String>,
    pub p_order_id: Option<String>,
    pub p_paddle_fee: Option<String>,
    pub p_price: Option<String>,
    pub p_product_id: Option<String>,
    pub p_quantity: Option<String>,
    pub p_sale_gross: Option<String>,
    pub p_tax_amount: Option<String>,
    pub p_used_price_override: Option<String>,
    pub passthrough: Option<String>,
    pub quantity: Option<String>,
}

/// `subscription_created`: a customer subscribed to a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCreatedAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub cancel_url: Option<String>,
    pub checkout_id: Option<String>,
    pub currency: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub next_bill_date: Option<String>,
    pub passthrough: Option<String>,
    pub quantity: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub subscription_id: Option<String>,
    pub subscription_plan_id: Option<String>,
    pub unit_price: Option<String>,
    pub user_id: Option<String>,
    pub update_url: Option<String>,
}

/// `subscription_updated`: plan, price, quantity, status or next payment
/// date of a subscription changed.
///
/// Carries both the old and new values of everything that can change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionUpdatedAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub cancel_url: Option<String>,
    pub checkout_id: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub new_price: Option<String>,
    pub new_quantity: Option<String>,
    pub new_unit_price: Option<String>,
    pub next_bill_date: Option<String>,
    pub old_price: Option<String>,
    pub old_quantity: Option<String>,
    pub old_unit_price: Option<String>,
    pub currency: Option<String>,
    pub passthrough: Option<String>,
    pub status: Option<String>,
    pub subscription_id: Option<String>,
    pub subscription_plan_id: Option<String>,
    pub user_id: Option<String>,
    pub update_url: Option<String>,
    pub old_next_bill_date: Option<String>,
    pub old_status: Option<String>,
    pub old_subscription_plan_id: Option<String>,
    pub paused_at: Option<String>,
    pub paused_from: Option<String>,
    pub paused_reason: Option<String>,
}

/// `subscription_cancelled`: a subscription was cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCancelledAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub cancellation_effective_date: Option<String>,
    pub checkout_id: Option<String>,
    pub currency: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub passthrough: Option<String>,
    pub quantity: Option<String>,
    pub status: Option<String>,
    pub subscription_id: Option<String>,
    pub subscription_plan_id: Option<String>,
    pub unit_price: Option<String>,
    pub user_id: Option<String>,
}

/// `subscription_payment_succeeded`: a subscription payment was collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPaymentSucceededAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub balance_currency: Option<String>,
    pub balance_earnings: Option<String>,
    pub balance_fee: Option<String>,
    pub balance_gross: Option<String>,
    pub balance_tax: Option<String>,
    pub checkout_id: Option<String>,
    pub country: Option<String>,
    pub coupon: Option<String>,
    pub currency: Option<String>,
    pub customer_name: Option<String>,
    pub earnings: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    pub fee: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub initial_payment: Option<Flag>,
    pub instalments: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub next_bill_date: Option<String>,
    pub next_payment_amount: Option<String>,
    pub order_id: Option<String>,
    pub passthrough: Option<String>,
    pub payment_method: Option<String>,
    pub payment_tax: Option<String>,
    pub plan_name: Option<String>,
    pub quantity: Option<String>,
    pub receipt_url: Option<String>,
    pub sale_gross: Option<String>,
    pub status: Option<String>,
    pub subscription_id: Option<String>,
    pub subscription_payment_id: Option<String>,
    pub subscription_plan_id: Option<String>,
    pub unit_price: Option<String>,
    pub user_id: Option<String>,
}

/// `subscription_payment_failed`: collecting a subscription payment failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPaymentFailedAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub amount: Option<String>,
    pub cancel_url: Option<String>,
    pub checkout_id: Option<String>,
    pub currency: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub next_retry_date: Option<String>,
    pub passthrough: Option<String>,
    pub quantity: Option<String>,
    pub status: Option<String>,
    pub subscription_id: Option<String>,
    pub subscription_plan_id: Option<String>,
    pub unit_price: Option<String>,
    pub update_url: Option<String>,
    pub subscription_payment_id: Option<String>,
    pub instalments: Option<String>,
    pub order_id: Option<String>,
    pub user_id: Option<String>,
    pub attempt_number: Option<String>,
}

/// `subscription_payment_refunded`: a subscription payment was refunded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPaymentRefundedAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub amount: Option<String>,
    pub balance_currency: Option<String>,
    pub balance_earnings_decrease: Option<String>,
    pub balance_fee_refund: Option<String>,
    pub balance_gross_refund: Option<String>,
    pub balance_tax_refund: Option<String>,
    pub checkout_id: Option<String>,
    pub currency: Option<String>,
    pub earnings_decrease: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    pub fee_refund: Option<String>,
    pub gross_refund: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub initial_payment: Option<Flag>,
    pub instalments: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub order_id: Option<String>,
    pub passthrough: Option<String>,
    pub quantity: Option<String>,
    pub refund_reason: Option<String>,
    pub refund_type: Option<String>,
    pub status: Option<String>,
    pub subscription_id: Option<String>,
    pub subscription_payment_id: Option<String>,
    pub subscription_plan_id: Option<String>,
    pub tax_refund: Option<String>,
    pub unit_price: Option<String>,
    pub user_id: Option<String>,
}

/// `payment_succeeded`: a one-off payment was received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSucceededAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub balance_currency: Option<String>,
    pub balance_earnings: Option<String>,
    pub balance_fee: Option<String>,
    pub balance_gross: Option<String>,
    pub balance_tax: Option<String>,
    pub checkout_id: Option<String>,
    pub country: Option<String>,
    pub coupon: Option<String>,
    pub currency: Option<String>,
    pub customer_name: Option<String>,
    pub earnings: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    pub fee: Option<String>,
    pub ip: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub order_id: Option<String>,
    pub passthrough: Option<String>,
    pub payment_method: Option<String>,
    pub payment_tax: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    pub receipt_url: Option<String>,
    pub sale_gross: Option<String>,
    pub used_price_override: Option<String>,
}

/// `payment_refunded`: a one-off payment was refunded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRefundedAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub amount: Option<String>,
    pub balance_currency: Option<String>,
    pub balance_earnings_decrease: Option<String>,
    pub balance_fee_refund: Option<String>,
    pub balance_gross_refund: Option<String>,
    pub balance_tax_refund: Option<String>,
    pub checkout_id: Option<String>,
    pub currency: Option<String>,
    pub earnings_decrease: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    pub fee_refund: Option<String>,
    pub gross_refund: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub order_id: Option<String>,
    pub passthrough: Option<String>,
    pub quantity: Option<String>,
    pub refund_reason: Option<String>,
    pub refund_type: Option<String>,
    pub tax_refund: Option<String>,
}

/// `locker_processed`: an order finished processing after payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockerProcessedAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub checkout_id: Option<String>,
    pub checkout_recovery: Option<String>,
    pub coupon: Option<String>,
    pub download: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    pub instructions: Option<String>,
    pub licence: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub order_id: Option<String>,
    pub product_id: Option<String>,
    pub quantity: Option<String>,
    pub source: Option<String>,
}

/// `payment_dispute_created`: a chargeback was raised against a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDisputeCreatedAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub amount: Option<String>,
    pub checkout_id: Option<String>,
    pub currency: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    pub fee_usd: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub order_id: Option<String>,
    pub passthrough: Option<String>,
    pub status: Option<String>,
}

/// `payment_dispute_closed`: a chargeback was contested and closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDisputeClosedAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub amount: Option<String>,
    pub checkout_id: Option<String>,
    pub currency: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    pub fee_usd: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub order_id: Option<String>,
    pub passthrough: Option<String>,
    pub status: Option<String>,
}

/// `high_risk_transaction_created`: a checkout was flagged for manual risk review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighRiskTransactionCreatedAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub case_id: Option<String>,
    pub checkout_id: Option<String>,
    pub created_at: Option<String>,
    pub customer_email_address: Option<String>,
    pub customer_user_id: Option<String>,
    pub event_time: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub passthrough: Option<String>,
    pub product_id: Option<String>,
    pub risk_score: Option<String>,
    pub status: Option<String>,
}

/// `high_risk_transaction_updated`: a flagged checkout was accepted or rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighRiskTransactionUpdatedAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub case_id: Option<String>,
    pub checkout_id: Option<String>,
    pub created_at: Option<String>,
    pub customer_email_address: Option<String>,
    pub customer_user_id: Option<String>,
    pub event_time: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub order_id: Option<String>,
    pub passthrough: Option<String>,
    pub product_id: Option<String>,
    pub risk_score: Option<String>,
}

/// `transfer_created`: a payout to the vendor was created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCreatedAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub event_time: Option<String>,
    pub payout_id: Option<String>,
    pub status: Option<String>,
}

/// `transfer_paid`: a payout to the vendor was paid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPaidAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub event_time: Option<String>,
    pub payout_id: Option<String>,
    pub status: Option<String>,
}

/// `new_audience_member`: a customer opted in to marketing email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAudienceMemberAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub created_at: Option<String>,
    pub email: Option<String>,
    pub event_time: Option<String>,
    #[serde(default, deserialize_with = "super::flag::optional")]
    pub marketing_consent: Option<Flag>,
    pub products: Option<String>,
    pub source: Option<String>,
    pub subscribed: Option<String>,
    pub user_id: Option<String>,
}

/// `update_audience_member`: the details of a marketing audience member changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAudienceMemberAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub event_time: Option<String>,
    pub new_customer_email: Option<String>,
    pub new_marketing_consent: Option<String>,
    pub old_customer_email: Option<String>,
    pub old_marketing_consent: Option<String>,
    pub products: Option<String>,
    pub source: Option<String>,
    pub updated_at: Option<String>,
    pub user_id: Option<String>,
}

/// `invoice_paid`: a manual invoice was paid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePaidAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub payment_id: Option<String>,
    pub amount: Option<String>,
    pub sale_gross: Option<String>,
    pub term_days: Option<String>,
    pub status: Option<String>,
    pub purchase_order_number: Option<String>,
    pub invoiced_at: Option<String>,
    pub currency: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub product_additional_information: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub customer_vat_number: Option<String>,
    pub customer_company_number: Option<String>,
    pub customer_address: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub customer_zipcode: Option<String>,
    pub country: Option<String>,
    pub contract_id: Option<String>,
    pub contract_start_date: Option<String>,
    pub contract_end_date: Option<String>,
    pub passthrough: Option<String>,
    pub date_created: Option<String>,
    pub balance_currency: Option<String>,
    pub payment_tax: Option<String>,
    pub payment_method: Option<String>,
    pub fee: Option<String>,
    pub earnings: Option<String>,
    pub balance_earnings: Option<String>,
    pub balance_fee: Option<String>,
    pub balance_tax: Option<String>,
    pub balance_gross: Option<String>,
    pub date_reconciled: Option<String>,
    pub event_time: Option<String>,
}

/// `invoice_sent`: a manual invoice was sent to the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSentAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub payment_id: Option<String>,
    pub amount: Option<String>,
    pub sale_gross: Option<String>,
    pub term_days: Option<String>,
    pub status: Option<String>,
    pub purchase_order_number: Option<String>,
    pub invoiced_at: Option<String>,
    pub currency: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub product_additional_information: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub customer_vat_number: Option<String>,
    pub customer_company_number: Option<String>,
    pub customer_address: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub customer_zipcode: Option<String>,
    pub country: Option<String>,
    pub contract_id: Option<String>,
    pub contract_start_date: Option<String>,
    pub contract_end_date: Option<String>,
    pub passthrough: Option<String>,
    pub date_created: Option<String>,
    pub balance_currency: Option<String>,
    pub payment_tax: Option<String>,
    pub payment_method: Option<String>,
    pub fee: Option<String>,
    pub earnings: Option<String>,
    pub event_time: Option<String>,
}

/// `invoice_overdue`: a manual invoice passed its payment term unpaid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceOverdueAlert {
    pub alert_name: Option<String>,
    pub alert_id: Option<String>,
    pub payment_id: Option<String>,
    pub amount: Option<String>,
    pub sale_gross: Option<String>,
    pub term_days: Option<String>,
    pub status: Option<String>,
    pub purchase_order_number: Option<String>,
    pub invoiced_at: Option<String>,
    pub currency: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub product_additional_information: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub customer_vat_number: Option<String>,
    pub customer_company_number: Option<String>,
    pub customer_address: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub customer_zipcode: Option<String>,
    pub country: Option<String>,
    pub contract_id: Option<String>,
    pub contract_start_date: Option<String>,
    pub contract_end_date: Option<String>,
    pub passthrough: Option<String>,
    pub date_created: Option<String>,
    pub balance_currency: Option<String>,
    pub payment_tax: Option<String>,
    pub payment_method: Option<String>,
    pub fee: Option<String>,
    pub earnings: Option<String>,
    pub event_time: Option<String>,
}
