//! Event payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of academic event
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Talk
    Lecture,
    /// Hands-on session
    Workshop,
    /// Short course spanning several sessions
    Minicourse,
    /// Seminar
    Seminar,
    /// Multi-track conference
    Conference,
    /// Hackathon or competition
    Hackathon,
}

impl EventType {
    /// Portuguese label shown on cards
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lecture => "Palestra",
            Self::Workshop => "Workshop",
            Self::Minicourse => "Minicurso",
            Self::Seminar => "Seminário",
            Self::Conference => "Congresso",
            Self::Hackathon => "Hackathon",
        }
    }
}

/// An event as published by its organizer
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event id
    pub id: String,
    /// Title
    pub title: String,
    /// Long description
    #[serde(default)]
    pub description: String,
    /// Kind of event
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Venue or room
    #[serde(default)]
    pub location: String,
    /// Start of the event
    pub start_date: DateTime<Utc>,
    /// End of the event
    pub end_date: DateTime<Utc>,
    /// Seat limit, unlimited when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Seats already taken
    #[serde(default)]
    pub registered_count: u32,
    /// Ticket price in reais
    #[serde(default)]
    pub price: f64,
    /// Organizer user id
    pub organizer_id: String,
    /// Organizer display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    /// Cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Workload credited on the certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload_hours: Option<u32>,
}

impl Event {
    /// Whether tickets cost nothing
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }

    /// Whether every seat is taken
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.registered_count >= capacity)
    }
}
