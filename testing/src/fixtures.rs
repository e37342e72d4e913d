//! Builders for API payloads used across component tests

use campus_api::types::{
    CheckInResponse, Event, EventTicket, EventType, OrderStatus, Participation,
    ParticipationStatus, TicketOrder, TicketStatus, TicketValidation,
};
use chrono::{DateTime, TimeDelta, Utc};

/// A well-formed validation code
pub const VALIDATION_CODE: &str = "a1b2c3d4-e5f6-7890-abcd-ef1234567890";

/// A two-hour workshop starting at `start`
#[must_use]
pub fn event(id: &str, start: DateTime<Utc>) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Evento {id}"),
        description: String::new(),
        event_type: EventType::Workshop,
        location: "Auditório Central".to_string(),
        start_date: start,
        end_date: start + TimeDelta::hours(2),
        capacity: Some(50),
        registered_count: 12,
        price: 25.0,
        organizer_id: "org-1".to_string(),
        organizer_name: Some("Centro Acadêmico".to_string()),
        image_url: None,
        workload_hours: Some(2),
    }
}

/// An order in `status` with no proof
#[must_use]
pub fn order(id: &str, status: OrderStatus) -> TicketOrder {
    let created_at = crate::test_time();
    TicketOrder {
        order_id: id.to_string(),
        event_id: "evt-1".to_string(),
        user_id: "usr-1".to_string(),
        event_title: Some("Semana de Computação".to_string()),
        user_name: Some("Ana Souza".to_string()),
        total_amount: 25.0,
        coupon_code: None,
        order_status: status,
        payment_proof_url: None,
        rejection_reason: None,
        notes: None,
        created_at,
        updated_at: created_at,
        ticket_id: None,
    }
}

/// A ticket in `status` carrying [`VALIDATION_CODE`]
#[must_use]
pub fn ticket(status: TicketStatus) -> EventTicket {
    EventTicket {
        ticket_id: "tkt-1".to_string(),
        order_id: "ord-1".to_string(),
        event_id: "evt-1".to_string(),
        user_id: "usr-1".to_string(),
        participant_name: Some("Ana Souza".to_string()),
        event_title: Some("Semana de Computação".to_string()),
        validation_code: VALIDATION_CODE.to_string(),
        qr_code_data: VALIDATION_CODE.to_string(),
        ticket_status: status,
        issued_at: crate::test_time(),
        used_at: None,
    }
}

/// A successful check-in of [`ticket`]
#[must_use]
pub fn check_in_response() -> CheckInResponse {
    let validated_at = crate::test_time();
    CheckInResponse {
        ticket: EventTicket {
            ticket_status: TicketStatus::Used,
            used_at: Some(validated_at),
            ..ticket(TicketStatus::Valid)
        },
        validation: TicketValidation {
            validation_id: "val-1".to_string(),
            ticket_id: "tkt-1".to_string(),
            validated_by: "staff-1".to_string(),
            validated_at,
        },
        message: Some("Check-in realizado".to_string()),
    }
}

/// A registration of `user_id` in `event_id`
#[must_use]
pub fn participation(user_id: &str, event_id: &str) -> Participation {
    Participation {
        id: format!("{user_id}:{event_id}"),
        user_id: user_id.to_string(),
        event_id: event_id.to_string(),
        status: ParticipationStatus::Registered,
        registered_at: crate::test_time(),
    }
}
