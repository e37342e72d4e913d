//! Order, ticket and check-in payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a ticket order
///
/// Transitions are driven by the backend:
/// `PENDING_PAYMENT → AWAITING_VALIDATION → APPROVED | REJECTED | CANCELLED`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Waiting for the buyer to upload a PIX proof
    PendingPayment,
    /// Proof uploaded, waiting for an admin
    AwaitingValidation,
    /// Payment accepted, ticket issued
    Approved,
    /// Proof refused, buyer may upload again
    Rejected,
    /// Order withdrawn
    Cancelled,
}

/// Lifecycle state of an issued ticket
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Not used yet
    Valid,
    /// Checked in
    Used,
    /// Voided
    Cancelled,
}

/// A ticket purchase order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketOrder {
    /// Order id
    pub order_id: String,
    /// Event purchased
    pub event_id: String,
    /// Buyer
    pub user_id: String,
    /// Title of the event purchased
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    /// Buyer display name, present on admin listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Amount due in reais
    pub total_amount: f64,
    /// Coupon applied at purchase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    /// Current status
    pub order_status: OrderStatus,
    /// Uploaded PIX proof
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_proof_url: Option<String>,
    /// Why the proof was refused
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Internal admin notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last change
    pub updated_at: DateTime<Utc>,
    /// Ticket issued on approval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
}

/// A ticket issued for an approved order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventTicket {
    /// Ticket id
    pub ticket_id: String,
    /// Order the ticket was issued for
    pub order_id: String,
    /// Event admitted to
    pub event_id: String,
    /// Holder
    pub user_id: String,
    /// Holder display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_name: Option<String>,
    /// Title of the event admitted to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    /// Code checked at the entrance
    pub validation_code: String,
    /// Payload encoded in the QR code
    pub qr_code_data: String,
    /// Current status
    pub ticket_status: TicketStatus,
    /// Issue time
    pub issued_at: DateTime<Utc>,
    /// Check-in time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_at: Option<DateTime<Utc>>,
}

/// Record of a check-in
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketValidation {
    /// Validation id
    pub validation_id: String,
    /// Ticket checked in
    pub ticket_id: String,
    /// Staff member who checked it in
    pub validated_by: String,
    /// Check-in time
    pub validated_at: DateTime<Utc>,
}

/// `POST /orders` body
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Event to purchase
    pub event_id: String,
    /// Coupon to apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

/// `POST /orders/{id}/payment-proof` response
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProofUploadResponse {
    /// Stored proof location
    pub payment_proof_url: String,
}

/// `POST /orders/{id}/validate` body
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOrderRequest {
    /// Approve or reject
    pub approved: bool,
    /// Mandatory when rejecting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Internal notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ValidateOrderRequest {
    /// Approve, optionally with notes
    #[must_use]
    pub const fn approve(notes: Option<String>) -> Self {
        Self {
            approved: true,
            rejection_reason: None,
            notes,
        }
    }

    /// Reject with a reason
    #[must_use]
    pub const fn reject(reason: String) -> Self {
        Self {
            approved: false,
            rejection_reason: Some(reason),
            notes: None,
        }
    }
}

/// `POST /tickets/check-in` body
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    /// Code read from the ticket
    pub validation_code: String,
}

/// `POST /tickets/check-in` response
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    /// Ticket after check-in
    pub ticket: EventTicket,
    /// Check-in record
    pub validation: TicketValidation,
    /// Server message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_values() {
        let json = serde_json::to_string(&OrderStatus::AwaitingValidation).unwrap();
        assert_eq!(json, "\"AWAITING_VALIDATION\"");
        let status: OrderStatus = serde_json::from_str("\"PENDING_PAYMENT\"").unwrap();
        assert_eq!(status, OrderStatus::PendingPayment);
    }

    #[test]
    fn test_validate_request_omits_absent_fields() {
        let body = serde_json::to_value(ValidateOrderRequest::approve(None)).unwrap();
        assert_eq!(body, serde_json::json!({ "approved": true }));

        let body = serde_json::to_value(ValidateOrderRequest::reject("Comprovante ilegível".into()))
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "approved": false, "rejectionReason": "Comprovante ilegível" })
        );
    }

    #[test]
    fn test_decodes_order() {
        let order: TicketOrder = serde_json::from_value(serde_json::json!({
            "orderId": "ord-1",
            "eventId": "evt-1",
            "userId": "usr-1",
            "totalAmount": 30.5,
            "orderStatus": "REJECTED",
            "rejectionReason": "Valor divergente",
            "createdAt": "2025-01-01T10:00:00Z",
            "updatedAt": "2025-01-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(order.order_status, OrderStatus::Rejected);
        assert_eq!(order.rejection_reason.as_deref(), Some("Valor divergente"));
        assert!(order.payment_proof_url.is_none());
    }
}
