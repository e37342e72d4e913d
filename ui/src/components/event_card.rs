//! Event summary card shown in listings

use crate::format;
use campus_api::types::Event;
use chrono::FixedOffset;

/// Render-ready event card
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventCardView {
    /// Event id, for the detail link
    pub id: String,
    /// Title
    pub title: String,
    /// Event type label
    pub type_label: &'static str,
    /// Date and time range in the display offset
    pub schedule: String,
    /// Venue
    pub location: String,
    /// `R$ 25,00` or `Gratuito`
    pub price_label: String,
    /// `12/50 vagas`, or `12 inscritos` without a seat limit
    pub capacity_label: String,
    /// No seats left
    pub sold_out: bool,
    /// Organizer name
    pub organizer: Option<String>,
    /// Cover image
    pub image_url: Option<String>,
    /// Workload, e.g. `4h`
    pub workload_label: Option<String>,
}

/// Render an event card
#[must_use]
pub fn view(event: &Event, offset: FixedOffset) -> EventCardView {
    let price_label = if event.is_free() {
        "Gratuito".to_string()
    } else {
        format::brl(event.price)
    };

    let capacity_label = match event.capacity {
        Some(capacity) => format!("{}/{capacity} vagas", event.registered_count),
        None => format!("{} inscritos", event.registered_count),
    };

    EventCardView {
        id: event.id.clone(),
        title: event.title.clone(),
        type_label: event.event_type.label(),
        schedule: format::schedule(event.start_date, event.end_date, offset),
        location: event.location.clone(),
        price_label,
        capacity_label,
        sold_out: event.is_sold_out(),
        organizer: event.organizer_name.clone(),
        image_url: event.image_url.clone(),
        workload_label: event.workload_hours.map(|hours| format!("{hours}h")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::utc_offset;
    use campus_ui_testing::{fixtures, test_time};

    #[test]
    fn test_paid_workshop() {
        let card = view(&fixtures::event("evt-1", test_time()), utc_offset(-180));

        assert_eq!(card.type_label, "Workshop");
        assert_eq!(card.price_label, "R$ 25,00");
        assert_eq!(card.capacity_label, "12/50 vagas");
        assert_eq!(card.schedule, "01/03/2025, 09:00 - 11:00");
        assert_eq!(card.workload_label.as_deref(), Some("2h"));
        assert!(!card.sold_out);
    }

    #[test]
    fn test_free_sold_out_event() {
        let mut event = fixtures::event("evt-1", test_time());
        event.price = 0.0;
        event.registered_count = 50;

        let card = view(&event, utc_offset(-180));

        assert_eq!(card.price_label, "Gratuito");
        assert!(card.sold_out);
    }

    #[test]
    fn test_unlimited_capacity() {
        let mut event = fixtures::event("evt-1", test_time());
        event.capacity = None;

        let card = view(&event, utc_offset(-180));

        assert_eq!(card.capacity_label, "12 inscritos");
        assert!(!card.sold_out);
    }
}
